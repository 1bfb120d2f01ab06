//! Home page generation

use maud::{Markup, html};

use crate::components::layout::page_wrapper;
use crate::components::tagbar::tag_bar;
use crate::model::Submission;
use crate::tags::TagIndex;
use crate::util::format_timestamp;

/// Generates the home page
///
/// Lists the most recent published retrospectives (newest first, already
/// selected by the caller) with the tag strip above them.
///
/// # Arguments
///
/// * `site_name`: Site name for title and header
/// * `submissions`: Published submissions to list, newest first
/// * `tags`: Current tag index for the navigation strip
///
/// # Returns
///
/// Complete HTML page as Markup
pub fn generate_index(site_name: &str, submissions: &[&Submission], tags: &TagIndex) -> Markup {
    page_wrapper(
        site_name,
        "Latest retrospectives",
        &["assets/site.css"],
        html! {
            header class="site-header" {
                h1 class="site-title" { (site_name) }
                p class="site-subtitle" { "Project retrospectives: the idea, the stack, the failure, the lessons." }
            }

            (tag_bar(&tags.items, None, ""))

            main {
                @if submissions.is_empty() {
                    p class="empty-state" { "Nothing published yet." }
                } @else {
                    div class="post-list" {
                        @for submission in submissions {
                            article class="post-card" {
                                h2 class="post-title" {
                                    a href=(format!("post/{}.html", submission.slug())) {
                                        (submission.title)
                                    }
                                }
                                p class="post-tagline" { (submission.tagline) }
                                div class="post-meta" {
                                    span class="post-date" { (format_timestamp(submission.created_at)) }
                                    @for tag in submission.tags() {
                                        span class="post-tag" { (tag) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
