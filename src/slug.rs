//! URL slug derivation and collision-resistant assignment.

use rand::Rng;

use crate::error::{Error, Result};

/// Total attempts (1 initial + 4 retries) before slug assignment gives up.
pub const SLUG_ATTEMPTS: u32 = 5;

/// Length of the random suffix appended to every slug base.
const SUFFIX_LEN: usize = 6;

/// Maximum length of the title-derived portion of a slug.
const MAX_BASE_LEN: usize = 64;

/// Characters the random suffix is drawn from.
const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Normalizes free text into a lowercase ASCII URL slug.
///
/// Alphanumeric characters are kept (lowercased); hyphens and underscores
/// are preserved; every other run of characters collapses to a single
/// hyphen. Leading and trailing separators are trimmed. Non-ASCII
/// characters act as separators rather than being transliterated.
///
/// # Arguments
///
/// * `text`: Free text such as a title or tag name
///
/// # Returns
///
/// URL-safe slug string, possibly empty if the input had no ASCII
/// alphanumerics
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_sep = false;

    for ch in text.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_sep = false;
        } else if ch == '-' || ch == '_' {
            if !slug.is_empty() {
                slug.push(ch);
            }
            pending_sep = false;
        } else {
            pending_sep = true;
        }
    }

    slug.trim_matches(['-', '_']).to_string()
}

/// Derives the base portion of a slug from a title.
///
/// Slugifies the title and truncates to 64 characters. Falls back to the
/// literal base `"post"` when the title contains nothing slug-worthy
/// (e.g. all symbols or emoji).
pub fn slug_base(title: &str) -> String {
    let mut base = slugify(title);
    base.truncate(MAX_BASE_LEN);
    let base = base.trim_end_matches(['-', '_']).to_string();
    if base.is_empty() {
        "post".to_string()
    } else {
        base
    }
}

/// Generates a 6-character random suffix from lowercase letters and digits.
///
/// Draws from the thread-local CSPRNG. Slugs double as a lightweight
/// anti-enumeration mechanism, so a predictable generator is not acceptable
/// here.
pub fn short_id() -> String {
    let mut rng = rand::rng();
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

/// Assigns a unique slug for a new submission title.
///
/// Builds `base-suffix` candidates and consults `exists` (a predicate
/// backed by the store's unique index) until a free candidate is found.
/// Tries up to [`SLUG_ATTEMPTS`] suffixes.
///
/// The assigned slug is immutable once persisted: callers must never
/// re-invoke this for an existing record, even when the title changes.
///
/// # Arguments
///
/// * `title`: Submission title the slug is derived from
/// * `exists`: Returns true when a candidate is already taken
///
/// # Errors
///
/// Returns [`Error::SlugExhausted`] when all attempts collide.
pub fn assign_slug(title: &str, exists: impl FnMut(&str) -> bool) -> Result<String> {
    assign_slug_with(title, exists, short_id)
}

/// Slug assignment with an injectable suffix source.
///
/// Production code goes through [`assign_slug`]; tests substitute a
/// deterministic generator to exercise the collision loop.
pub fn assign_slug_with(
    title: &str,
    mut exists: impl FnMut(&str) -> bool,
    mut next_suffix: impl FnMut() -> String,
) -> Result<String> {
    let base = slug_base(title);

    for _ in 0..SLUG_ATTEMPTS {
        let candidate = format!("{}-{}", base, next_suffix());
        if !exists(&candidate) {
            return Ok(candidate);
        }
    }

    Err(Error::SlugExhausted {
        base,
        attempts: SLUG_ATTEMPTS,
    })
}
