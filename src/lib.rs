//! Static site generator for project post-mortem retrospectives.
//!
//! The core turns untrusted user markdown into safe HTML through a fixed
//! allow-list, assigns collision-resistant immutable URL slugs at creation
//! time, and derives an ordered de-duplicated tag index from published
//! content. Around that core sit a JSON-backed submission store and maud
//! page generation for the published site.

mod cache;
mod config;
mod error;
mod markdown;
mod model;
mod seed;
mod slug;
mod store;
mod tags;
mod util;
mod validate;

pub mod components;
pub mod pages;

pub use cache::{RENDER_TTL, RenderCache, TAG_INDEX_TTL, TtlCache};
pub use config::Config;
pub use error::{Error, Result};
pub use markdown::{
    MarkdownRenderer, ensure_link_rel, render_markdown, sanitize_html, strip_structural_headings,
};
pub use model::{NewSubmission, SECTIONS, Status, Submission, TAGLINE_MAX, TITLE_MAX};
pub use seed::seed;
pub use slug::{SLUG_ATTEMPTS, assign_slug, assign_slug_with, short_id, slug_base, slugify};
pub use store::{JsonStore, MemoryStore, SubmissionStore};
pub use tags::{TagIndex, TagIndexCache, TagItem, build_tag_index};
pub use util::format_timestamp;
pub use validate::{FieldError, validate};
