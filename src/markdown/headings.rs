//! Structural heading removal for user-authored markdown.

/// Removes top-level ATX headings from markdown text.
///
/// Drops every line that starts with the strict prefix `"# "` or `"## "`.
/// All other lines, including deeper headings (`###` and below), blank
/// lines, and ordering, are preserved verbatim. User sections are rendered
/// inside pages that already carry their own H1/H2 structure, so competing
/// top-level headings would break the visual hierarchy.
///
/// Lines with leading whitespace before the `#` are kept. That is a
/// deliberate limitation: only headings at column zero compete with the
/// page chrome.
///
/// # Arguments
///
/// * `markdown`: Multi-line markdown text, possibly empty
///
/// # Returns
///
/// The text with level-1 and level-2 heading lines removed
pub fn strip_structural_headings(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }

    let kept: Vec<&str> = markdown
        .lines()
        .filter(|line| !line.starts_with("# ") && !line.starts_with("## "))
        .collect();

    kept.join("\n")
}
