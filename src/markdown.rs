//! Markdown handling for user-authored content.
//!
//! Three stages guard everything a user writes: structural heading removal
//! before storage, markdown to HTML conversion, and allow-list
//! sanitization with link attribute enforcement on the way out.

mod headings;
mod renderer;
mod sanitize;

pub use headings::strip_structural_headings;
pub use renderer::{MarkdownRenderer, render_markdown};
pub use sanitize::{ensure_link_rel, sanitize_html};
