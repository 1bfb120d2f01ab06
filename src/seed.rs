//! Sample content generation for local development.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::Result;
use crate::model::{NewSubmission, Status};
use crate::store::SubmissionStore;
use crate::validate::validate;

/// Word pool the generated prose is assembled from.
const WORDS: &[&str] = &[
    "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india", "juliet",
    "kilo", "lima", "miserable", "project", "retro", "crt", "terminal", "pixel", "vintage",
    "keyboard", "click", "backend", "api", "cache", "queue", "worker", "deploy", "failure",
    "lesson", "idea", "tech", "stack",
];

/// Tags sampled onto generated submissions.
const TAG_POOL: &[&str] = &[
    "python", "django", "react", "redis", "celery", "postgres", "docker", "aws",
];

/// Seeds a store with random retrospectives for local testing.
///
/// Every generated submission is published, carries one to four tags, and
/// has markdown in each canonical section. Content goes through the same
/// validation and creation path real submissions use.
///
/// # Arguments
///
/// * `store`: Store to create submissions in
/// * `count`: How many submissions to create
///
/// # Returns
///
/// Number of submissions created
///
/// # Errors
///
/// Returns an error when slug assignment or persistence fails
pub fn seed(store: &mut dyn SubmissionStore, count: usize) -> Result<usize> {
    let mut rng = rand::rng();
    let mut created = 0;

    for _ in 0..count {
        let new = random_submission(&mut rng);

        if let Err(errors) = validate(&new) {
            eprintln!("Warning: skipping invalid seed submission: {:?}", errors);
            continue;
        }

        store.create(new)?;
        created += 1;
    }

    Ok(created)
}

/// Builds one random submission.
fn random_submission(rng: &mut impl Rng) -> NewSubmission {
    let word_count = rng.random_range(2..=4);
    let title = title_case(&rand_words(rng, word_count));

    let mut tags: Vec<String> = Vec::new();
    for _ in 0..rng.random_range(1..=4) {
        if let Some(tag) = TAG_POOL.choose(rng) {
            tags.push(tag.to_string());
        }
    }

    let mut links = Vec::new();
    if rng.random_bool(0.4) {
        links.push(format!("https://example.com/{}", rand_words(rng, 1)));
    }
    if rng.random_bool(0.3) {
        links.push(format!("https://github.com/{}", rand_words(rng, 1)));
    }

    let tagline_len = rng.random_range(6..=10);
    let tagline = sentence(rng, tagline_len);
    let description = markdown_block(rng);
    let idea = markdown_block(rng);
    let tech = markdown_block(rng);
    let failure = markdown_block(rng);
    let lessons = markdown_block(rng);
    let wins_len = rng.random_range(1..=2);
    let wins = paragraph(rng, wins_len);
    let sections = vec![
        ("description".to_string(), description),
        ("idea".to_string(), idea),
        ("tech".to_string(), tech),
        ("failure".to_string(), failure),
        ("lessons".to_string(), lessons),
        ("wins".to_string(), wins),
    ];
    NewSubmission {
        title,
        tagline,
        sections,
        tags,
        links,
        status: Status::Published,
    }
}

/// Joins `n` random pool words with spaces.
fn rand_words(rng: &mut impl Rng, n: usize) -> String {
    (0..n)
        .filter_map(|_| WORDS.choose(rng))
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// One capitalized sentence of `n` words.
fn sentence(rng: &mut impl Rng, n: usize) -> String {
    let mut s = rand_words(rng, n);
    if let Some(first) = s.get(..1) {
        let upper = first.to_ascii_uppercase();
        s.replace_range(..1, &upper);
    }
    s.push('.');
    s
}

/// A few sentences separated by blank lines.
fn paragraph(rng: &mut impl Rng, sentences: usize) -> String {
    (0..sentences)
        .map(|_| {
            let n = rng.random_range(6..=12);
            sentence(rng, n)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Markdown-ish body: prose, a bullet list, more prose. No H1/H2; the
/// stripper would remove them on the way in anyway.
fn markdown_block(rng: &mut impl Rng) -> String {
    let bullets: Vec<String> = (0..rng.random_range(2..=4))
        .map(|_| {
            let n = rng.random_range(3..=7);
            format!("- {}", rand_words(rng, n))
        })
        .collect();

    let p1_len = rng.random_range(2..=4);
    let p1 = paragraph(rng, p1_len);
    let p2_len = rng.random_range(2..=3);
    let p2 = paragraph(rng, p2_len);
    format!("{}\n\n{}\n\n{}", p1, bullets.join("\n"), p2)
}

/// Capitalizes each space-separated word.
fn title_case(words: &str) -> String {
    words
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
