//! Retrospective detail page generation

use maud::{Markup, PreEscaped, html};

use crate::cache::RenderCache;
use crate::components::layout::page_wrapper;
use crate::model::Submission;
use crate::slug::slugify;
use crate::util::format_timestamp;

/// Section names paired with their display headings, in page order.
///
/// The page owns the H1 (title) and these H2 headings, which is exactly
/// why user markdown has its own level-1 and level-2 headings stripped
/// before storage.
const SECTION_TITLES: &[(&str, &str)] = &[
    ("description", "The Project"),
    ("idea", "The Idea"),
    ("tech", "The Stack"),
    ("failure", "What Went Wrong"),
    ("lessons", "Lessons"),
    ("wins", "What Still Went Right"),
];

/// Generates a retrospective detail page
///
/// Renders every non-empty markdown section through the render cache, so
/// regenerating a site re-renders only edited content. Tags link back to
/// their listing pages; outbound project links carry
/// `rel="nofollow noopener"`.
///
/// # Arguments
///
/// * `site_name`: Site name for title and breadcrumb
/// * `submission`: Record to render (any status except removed)
/// * `cache`: Render cache shared across the whole generation run
///
/// # Returns
///
/// Complete HTML page as Markup
pub fn generate_detail(site_name: &str, submission: &Submission, cache: &RenderCache) -> Markup {
    page_wrapper(
        site_name,
        &submission.title,
        &["../assets/site.css"],
        html! {
            header class="post-header" {
                div class="breadcrumb" {
                    a href="../index.html" class="breadcrumb-link" { (site_name) }
                    span class="breadcrumb-separator" { "/" }
                    span class="breadcrumb-current" { (submission.title) }
                }
                h1 class="post-title" { (submission.title) }
                p class="post-tagline" { (submission.tagline) }
                div class="post-meta" {
                    span class="post-date" { (format_timestamp(submission.created_at)) }
                    @for tag in submission.tags() {
                        a class="post-tag" href=(format!("../tag/{}.html", slugify(tag))) { (tag) }
                    }
                }
            }

            main class="post-body" {
                @for (name, heading) in SECTION_TITLES {
                    @let rendered = cache.rendered_section(submission, name);
                    @if !rendered.is_empty() {
                        section class="post-section" {
                            h2 { (heading) }
                            div class="section-content" {
                                (PreEscaped(rendered))
                            }
                        }
                    }
                }

                @if !submission.links.is_empty() {
                    section class="post-section" {
                        h2 { "Links" }
                        ul class="link-list" {
                            @for link in &submission.links {
                                li {
                                    a href=(link) rel="nofollow noopener" { (link) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
