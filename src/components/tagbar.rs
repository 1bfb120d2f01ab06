//! Tag navigation component

use maud::{Markup, html};

use crate::tags::TagItem;

/// Renders the tag navigation strip
///
/// Shows every reachable tag as a link to its listing page, highlighting
/// the active tag when viewing one. Used on the index and tag pages.
///
/// # Arguments
///
/// * `items`: Tag items in index order
/// * `active`: Slug of the tag currently being viewed, if any
/// * `root`: Relative path prefix back to the site root ("" or "../")
///
/// # Returns
///
/// Tag strip markup, empty when no tags exist
pub fn tag_bar(items: &[TagItem], active: Option<&str>, root: &str) -> Markup {
    html! {
        @if !items.is_empty() {
            nav class="tag-bar" {
                @for item in items {
                    @if active == Some(item.slug.as_str()) {
                        span class="tag-link tag-active" { (item.name) }
                    } @else {
                        a class="tag-link" href=(format!("{}tag/{}.html", root, item.slug)) {
                            (item.name)
                        }
                    }
                }
            }
        }
    }
}
