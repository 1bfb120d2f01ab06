//! Tag listing page generation

use maud::{Markup, html};

use crate::components::layout::page_wrapper;
use crate::components::tagbar::tag_bar;
use crate::model::Submission;
use crate::tags::{TagIndex, TagItem};
use crate::util::format_timestamp;

/// Generates a tag listing page
///
/// Lists every published retrospective carrying the tag, newest first
/// (already selected by the caller). The tag strip highlights the
/// current tag.
///
/// # Arguments
///
/// * `site_name`: Site name for title and breadcrumb
/// * `item`: Tag being viewed (slug and canonical name)
/// * `tags`: Full tag index for the navigation strip
/// * `submissions`: Published submissions carrying the tag, newest first
///
/// # Returns
///
/// Complete HTML page as Markup
pub fn generate_tag(
    site_name: &str,
    item: &TagItem,
    tags: &TagIndex,
    submissions: &[&Submission],
) -> Markup {
    page_wrapper(
        site_name,
        &format!("Tagged {}", item.name),
        &["../assets/site.css"],
        html! {
            header class="site-header" {
                div class="breadcrumb" {
                    a href="../index.html" class="breadcrumb-link" { (site_name) }
                    span class="breadcrumb-separator" { "/" }
                    span class="breadcrumb-current" { (item.name) }
                }
                h1 class="site-title" { (item.name) }
            }

            (tag_bar(&tags.items, Some(&item.slug), "../"))

            main {
                @if submissions.is_empty() {
                    p class="empty-state" { "No published retrospectives carry this tag." }
                } @else {
                    div class="post-list" {
                        @for submission in submissions {
                            article class="post-card" {
                                h2 class="post-title" {
                                    a href=(format!("../post/{}.html", submission.slug())) {
                                        (submission.title)
                                    }
                                }
                                p class="post-tagline" { (submission.tagline) }
                                span class="post-date" { (format_timestamp(submission.created_at)) }
                            }
                        }
                    }
                }
            }
        },
    )
}
