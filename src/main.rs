use anyhow::{Context, Result};
use mortem::{
    Config, RenderCache, Status, Submission, SubmissionStore, TagIndexCache, build_tag_index,
    pages, seed,
};
use std::fs;

/// Number of retrospectives shown on the home page.
const HOME_LIMIT: usize = 20;

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    let mut store = mortem::JsonStore::open(&config.store)
        .with_context(|| format!("Failed to open store {}", config.store.display()))?;

    if let Some(count) = config.seed {
        let created = seed(&mut store, count).context("Failed to seed store")?;
        println!(
            "Seeded {} retrospectives into {}",
            created,
            config.store.display()
        );
    }

    fs::create_dir_all(&config.output).context("Failed to create output directory")?;

    let assets_dir = config.output.join("assets");
    fs::create_dir_all(&assets_dir).context("Failed to create assets directory")?;
    fs::write(
        assets_dir.join("site.css"),
        include_str!("../assets/site.css"),
    )
    .context("Failed to write site.css")?;

    let render_cache = RenderCache::new();
    let tag_cache = TagIndexCache::new();

    let published = store.published();
    let tag_index = tag_cache.get_or_build(|| build_tag_index(published.iter().map(|s| s.tags())));

    // Home page: most recent published retrospectives
    let mut recent: Vec<&Submission> = published.clone();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(HOME_LIMIT);

    let index_html = pages::generate_index(&config.site_name, &recent, &tag_index);
    let index_path = config.output.join("index.html");
    fs::write(&index_path, index_html.into_string())
        .with_context(|| format!("Failed to write index page to {}", index_path.display()))?;

    println!("Generated: {}", index_path.display());

    // Detail pages: everything except removed content stays reachable
    let post_dir = config.output.join("post");
    fs::create_dir_all(&post_dir).context("Failed to create post directory")?;

    let mut post_count = 0;
    for submission in store.submissions() {
        if submission.status == Status::Removed {
            continue;
        }

        let html = pages::generate_detail(&config.site_name, submission, &render_cache);
        let post_path = post_dir.join(format!("{}.html", submission.slug()));
        fs::write(&post_path, html.into_string())
            .with_context(|| format!("Failed to write post page {}", post_path.display()))?;

        post_count += 1;
    }

    println!("Generated {} retrospective pages", post_count);

    // Tag pages: published content only, newest first
    let tag_dir = config.output.join("tag");
    fs::create_dir_all(&tag_dir).context("Failed to create tag directory")?;

    let mut newest_first: Vec<&Submission> = published.clone();
    newest_first.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    for item in &tag_index.items {
        let tagged: Vec<&Submission> = newest_first
            .iter()
            .copied()
            .filter(|s| s.tags().iter().any(|t| t == &item.name))
            .collect();

        let html = pages::generate_tag(&config.site_name, item, &tag_index, &tagged);
        let tag_path = tag_dir.join(format!("{}.html", item.slug));
        fs::write(&tag_path, html.into_string())
            .with_context(|| format!("Failed to write tag page {}", tag_path.display()))?;
    }

    println!("Generated {} tag pages", tag_index.items.len());

    Ok(())
}
