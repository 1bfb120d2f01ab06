//! Markdown to safe HTML conversion.

use comrak::Options;

use super::{ensure_link_rel, sanitize_html};

/// Renders untrusted markdown into allow-listed HTML.
///
/// Conversion is best-effort: malformed markdown is never an error, the
/// converter always produces some HTML which the sanitizer then reduces
/// to allow-listed structure. Raw HTML in the source flows through the
/// converter untouched so the sanitizer is the single place where the
/// allow-list is enforced.
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
}

impl<'a> MarkdownRenderer<'a> {
    /// Creates a renderer with the site's conversion options.
    ///
    /// - hard line breaks: bare newlines inside a paragraph become `<br>`
    /// - CommonMark list parsing (no pedantic indentation rules)
    /// - raw HTML is passed through to the sanitization stage
    pub fn new() -> Self {
        let mut options = Options::default();

        options.render.hardbreaks = true;
        options.render.unsafe_ = true;

        Self { options }
    }

    /// Renders markdown content to sanitized HTML.
    ///
    /// Pipeline: markdown conversion, allow-list sanitization, then `rel`
    /// enforcement on surviving anchors. Empty input yields an empty
    /// string with no wrapper markup.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown text, possibly containing raw HTML
    ///
    /// # Returns
    ///
    /// HTML containing only allow-listed tags and attributes
    pub fn render(&self, content: &str) -> String {
        if content.is_empty() {
            return String::new();
        }

        let html = comrak::markdown_to_html(content, &self.options);
        let cleaned = sanitize_html(&html);
        ensure_link_rel(&cleaned)
    }
}

impl<'a> Default for MarkdownRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper rendering one markdown string with default options.
pub fn render_markdown(text: &str) -> String {
    MarkdownRenderer::new().render(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_emphasis() {
        // Act
        let html = render_markdown("**bold** and *soft*");

        // Assert
        assert!(
            html.contains("<strong>bold</strong>"),
            "Should contain strong tag: {}",
            html
        );
        assert!(html.contains("<em>soft</em>"), "Should contain em tag: {}", html);
    }

    #[test]
    fn test_render_lists_and_blockquotes() {
        // Arrange
        let markdown = "- one\n- two\n\n> quoted";

        // Act
        let html = render_markdown(markdown);

        // Assert
        assert!(html.contains("<ul>"), "Should contain list: {}", html);
        assert!(html.contains("<li>one</li>"), "Should contain items: {}", html);
        assert!(html.contains("<blockquote>"), "Should contain quote: {}", html);
    }

    #[test]
    fn test_render_hard_line_breaks() {
        // Act
        let html = render_markdown("first\nsecond");

        // Assert
        assert!(
            html.contains("<br />"),
            "Bare newline should become a line break: {}",
            html
        );
    }

    #[test]
    fn test_render_code_blocks() {
        // Act
        let html = render_markdown("```\nlet x = 1;\n```");

        // Assert
        assert!(html.contains("<pre>"), "Should contain pre: {}", html);
        assert!(html.contains("<code>"), "Should contain code: {}", html);
        assert!(html.contains("let x = 1;"), "Should contain code text: {}", html);
    }

    #[test]
    fn test_render_strips_raw_span() {
        // Act
        let html = render_markdown("<span>hi</span>");

        // Assert
        assert!(!html.contains("<span>"), "span must be stripped: {}", html);
        assert!(html.contains("hi"), "Text content must survive: {}", html);
    }

    #[test]
    fn test_render_strips_script_entirely() {
        // Act
        let html = render_markdown("<script>alert('xss')</script>\n\nNormal text.");

        // Assert
        assert!(!html.contains("<script"), "script tag must not survive: {}", html);
        assert!(html.contains("Normal text"), "Surrounding text kept: {}", html);
    }

    #[test]
    fn test_render_link_gains_rel() {
        // Act
        let html = render_markdown("[link](https://example.com)");

        // Assert
        assert!(
            html.contains("<a href=\"https://example.com\" rel=\"nofollow noopener\">"),
            "Anchor should carry injected rel: {}",
            html
        );
    }

    #[test]
    fn test_render_existing_rel_preserved() {
        // Act
        let html = render_markdown("<a href=\"https://example.com\" rel=\"me\">link</a>");

        // Assert
        assert!(html.contains("rel=\"me\""), "rel=\"me\" should survive: {}", html);
        assert!(!html.contains("nofollow"), "No second rel injection: {}", html);
    }

    #[test]
    fn test_render_mailto_link() {
        // Act
        let html = render_markdown("[m](mailto:a@b.com)");

        // Assert
        assert!(
            html.contains("href=\"mailto:a@b.com\""),
            "mailto links are allowed: {}",
            html
        );
    }

    #[test]
    fn test_render_javascript_link_loses_href() {
        // Act
        let html = render_markdown("[bad](javascript:alert(1))");

        // Assert
        assert!(!html.contains("href"), "javascript href must be dropped: {}", html);
        assert!(
            html.contains("<a rel=\"nofollow noopener\">bad</a>"),
            "Anchor text remains with injected rel: {}",
            html
        );
    }

    #[test]
    fn test_render_onclick_removed_href_kept() {
        // Act
        let html = render_markdown("<a href=\"https://e.com\" onclick=\"x()\">l</a>");

        // Assert
        assert!(html.contains("href=\"https://e.com\""), "href kept: {}", html);
        assert!(!html.contains("onclick"), "onclick removed: {}", html);
    }

    #[test]
    fn test_render_empty_input() {
        assert_eq!(render_markdown(""), "", "Empty input yields empty output");
    }

    #[test]
    fn test_render_is_stable_on_own_output() {
        // Arrange
        let first = render_markdown("**bold** [l](https://e.com)\n\n<span>x</span>");

        // Act: feed sanitized output back through the renderer
        let second = render_markdown(&first);

        // Assert: no tag leakage, no rel duplication
        assert!(!second.contains("<span"), "No new tags may appear: {}", second);
        assert_eq!(
            second.matches("rel=").count(),
            first.matches("rel=").count(),
            "Re-rendering must not duplicate rel attributes"
        );
        for needle in ["<script", "<img", "onerror", "javascript:"] {
            assert!(!second.contains(needle), "Leaked {}: {}", needle, second);
        }
    }

    #[test]
    fn test_render_h1_h2_reduced_to_text() {
        // Arrange: structural headings are stripped before storage, but the
        // renderer must still neutralize any that reach it directly
        let markdown = "heading\n=======\n\n### sub";

        // Act
        let html = render_markdown(markdown);

        // Assert
        assert!(!html.contains("<h1>"), "Setext h1 must not survive: {}", html);
        assert!(html.contains("heading"), "Heading text kept: {}", html);
        assert!(html.contains("<h3>sub</h3>"), "h3 is allowed: {}", html);
    }
}
