//! Allow-list HTML sanitization and link attribute enforcement.
//!
//! Operates on the HTML produced by markdown conversion. Anything outside
//! a fixed allow-list of tags, attributes, and URL protocols is stripped
//! while the text content is preserved.

/// Tags allowed to survive sanitization. Everything else is stripped.
const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "ul", "ol", "li", "blockquote", "code", "pre", "em", "strong", "h3", "h4", "h5",
    "h6", "a",
];

/// Attributes allowed on anchor tags. No other tag keeps any attribute.
const ALLOWED_LINK_ATTRS: &[&str] = &["href", "title", "rel"];

/// URL protocols an `href` may use. Anything else drops the attribute.
const ALLOWED_PROTOCOLS: &[&str] = &["http", "https", "mailto"];

/// Parsed representation of a single HTML tag.
struct ParsedTag {
    /// Lowercased element name.
    name: String,
    /// True for `</...>` closing tags.
    closing: bool,
    /// Attribute names (lowercased) with entity-decoded values.
    attrs: Vec<(String, String)>,
    /// Bytes consumed from the input, including both angle brackets.
    len: usize,
}

/// Sanitizes an HTML fragment against the allow-list.
///
/// Scans the fragment linearly. Allowed tags are re-emitted in normalized
/// form (lowercase, double-quoted attributes, allow-listed attributes
/// only). Disallowed tags are removed while their text content is kept.
/// Comments and doctype/processing-instruction markup are dropped. A `<`
/// that does not open a parseable tag is escaped to `&lt;`.
///
/// Sanitization is structural, not validating: malformed fragments never
/// error, they just degrade to escaped text.
///
/// # Arguments
///
/// * `html`: HTML fragment, typically fresh markdown-converter output
///
/// # Returns
///
/// A fragment containing only allow-listed structure
pub fn sanitize_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        // Comments vanish wholesale, including their content
        if let Some(after) = rest.strip_prefix("<!--") {
            rest = match after.find("-->") {
                Some(end) => &after[end + 3..],
                None => "",
            };
            continue;
        }

        // Doctype declarations and processing instructions
        if rest.starts_with("<!") || rest.starts_with("<?") {
            rest = match rest.find('>') {
                Some(end) => &rest[end + 1..],
                None => "",
            };
            continue;
        }

        match parse_tag(rest) {
            Some(tag) => {
                emit_tag(&mut out, &tag);
                rest = &rest[tag.len..];
            }
            None => {
                out.push_str("&lt;");
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Injects `rel="nofollow noopener"` into anchors that lack a `rel`.
///
/// Walks the fragment matching `<a ...>` opening tags and checks their
/// parsed attributes for an existing `rel` token. Anchors that already
/// declare one (e.g. `rel="me"`) are left byte-for-byte untouched; the
/// check is attribute-aware, so a second pass never duplicates the
/// injection.
///
/// # Arguments
///
/// * `html`: Sanitized HTML fragment
///
/// # Returns
///
/// The fragment with every anchor carrying a `rel` attribute
pub fn ensure_link_rel(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find("<a") {
        out.push_str(&rest[..pos]);
        let candidate = &rest[pos..];

        match parse_tag(candidate) {
            Some(tag) if !tag.closing && tag.name == "a" => {
                let tag_src = &candidate[..tag.len];
                if tag.attrs.iter().any(|(name, _)| name == "rel") {
                    out.push_str(tag_src);
                } else {
                    let head = tag_src[..tag.len - 1].trim_end_matches('/').trim_end();
                    out.push_str(head);
                    out.push_str(" rel=\"nofollow noopener\">");
                }
                rest = &candidate[tag.len..];
            }
            _ => {
                // "<abbr", "</a>", or broken markup; copy the marker and move on
                out.push_str("<a");
                rest = &candidate[2..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Parses one tag starting at the `<` at the head of `s`.
///
/// Accepts opening, closing, and self-closing syntax with quoted or
/// unquoted attribute values. Returns None for markup that cannot be a
/// tag (no name, unterminated) so the caller can treat the `<` as text.
fn parse_tag(s: &str) -> Option<ParsedTag> {
    let bytes = s.as_bytes();
    let mut i = 1;

    let closing = bytes.get(i) == Some(&b'/');
    if closing {
        i += 1;
    }

    let name_start = i;
    if !bytes.get(i)?.is_ascii_alphabetic() {
        return None;
    }
    while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    let name = s[name_start..i].to_ascii_lowercase();

    let mut attrs = Vec::new();
    loop {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }
        if bytes[i] == b'>' {
            i += 1;
            break;
        }

        let attr_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'>' | b'/') {
            i += 1;
        }
        if i == attr_start {
            return None;
        }
        let attr_name = s[attr_start..i].to_ascii_lowercase();

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let mut value = String::new();
        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let quote = bytes[i];
                i += 1;
                let value_start = i;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
                if i >= bytes.len() {
                    return None;
                }
                value = decode_entities(&s[value_start..i]);
                i += 1;
            } else {
                let value_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                value = decode_entities(&s[value_start..i]);
            }
        }

        attrs.push((attr_name, value));
    }

    Some(ParsedTag {
        name,
        closing,
        attrs,
        len: i,
    })
}

/// Re-emits an allowed tag in normalized form; drops everything else.
fn emit_tag(out: &mut String, tag: &ParsedTag) {
    if !ALLOWED_TAGS.contains(&tag.name.as_str()) {
        return;
    }

    if tag.name == "br" {
        if !tag.closing {
            out.push_str("<br />");
        }
        return;
    }

    if tag.closing {
        out.push_str("</");
        out.push_str(&tag.name);
        out.push('>');
        return;
    }

    out.push('<');
    out.push_str(&tag.name);
    if tag.name == "a" {
        let mut seen: Vec<&str> = Vec::new();
        for (name, value) in &tag.attrs {
            if !ALLOWED_LINK_ATTRS.contains(&name.as_str()) || seen.contains(&name.as_str()) {
                continue;
            }
            if name == "href" && !href_allowed(value) {
                continue;
            }
            seen.push(name);
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
    }
    out.push('>');
}

/// Extracts the URL scheme, if any, from an entity-decoded href value.
///
/// ASCII control characters are ignored during the scan because browsers
/// strip tab/newline/carriage-return from URLs before resolving them, so
/// `java\tscript:` must still read as the `javascript` scheme. A `/`,
/// `?`, or `#` before any `:` means the URL is relative.
fn scheme_of(url: &str) -> Option<String> {
    let mut scheme = String::new();
    for ch in url.trim().chars() {
        if ch.is_ascii_control() {
            continue;
        }
        match ch {
            ':' => return Some(scheme.to_ascii_lowercase()),
            '/' | '?' | '#' => return None,
            _ => scheme.push(ch),
        }
    }
    None
}

/// Whether an href value may be kept. Relative URLs are always allowed;
/// absolute URLs must use an allow-listed protocol.
fn href_allowed(url: &str) -> bool {
    match scheme_of(url) {
        None => true,
        Some(scheme) => ALLOWED_PROTOCOLS.contains(&scheme.as_str()),
    }
}

/// Decodes HTML entities in an attribute value.
///
/// Handles the named entities markup generators emit plus numeric
/// references, so protocol checks see the URL a browser would. Unknown
/// entities pass through unchanged.
fn decode_entities(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        if let Some(semi) = rest.find(';')
            && let Some(decoded) = decode_entity(&rest[1..semi])
        {
            out.push(decoded);
            rest = &rest[semi + 1..];
            continue;
        }
        out.push('&');
        rest = &rest[1..];
    }

    out.push_str(rest);
    out
}

/// Decodes a single entity body (the text between `&` and `;`).
fn decode_entity(name: &str) -> Option<char> {
    if name.len() > 12 {
        return None;
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "colon" => Some(':'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = if let Some(hex) = num.strip_prefix(['x', 'X']) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                num.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}

/// Escapes a value for emission inside a double-quoted attribute.
fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_tags_survive() {
        // Arrange
        let html = "<p>text <strong>bold</strong> <em>em</em></p>";

        // Act
        let result = sanitize_html(html);

        // Assert
        assert_eq!(result, html, "Allow-listed structure should be untouched");
    }

    #[test]
    fn test_disallowed_tag_stripped_text_kept() {
        // Act
        let result = sanitize_html("<span>hi</span>");

        // Assert
        assert!(!result.contains("<span>"), "span should be stripped: {}", result);
        assert!(result.contains("hi"), "Text content should survive: {}", result);
    }

    #[test]
    fn test_script_tag_stripped_text_kept() {
        // Act
        let result = sanitize_html("<script>alert('x')</script>");

        // Assert
        assert!(!result.contains("<script"), "script should be stripped");
        assert!(
            result.contains("alert('x')"),
            "Inner text is preserved, not deleted: {}",
            result
        );
    }

    #[test]
    fn test_event_handler_attribute_removed() {
        // Act
        let result = sanitize_html("<a href=\"https://e.com\" onclick=\"x()\">l</a>");

        // Assert
        assert!(
            result.contains("href=\"https://e.com\""),
            "href should be kept: {}",
            result
        );
        assert!(!result.contains("onclick"), "onclick should be removed: {}", result);
    }

    #[test]
    fn test_attributes_stripped_from_non_anchor_tags() {
        // Act
        let result = sanitize_html("<p class=\"x\" id=\"y\">t</p>");

        // Assert
        assert_eq!(result, "<p>t</p>", "Non-anchor tags keep no attributes");
    }

    #[test]
    fn test_javascript_protocol_drops_href() {
        // Act
        let result = sanitize_html("<a href=\"javascript:alert(1)\">bad</a>");

        // Assert
        assert!(!result.contains("href"), "Disallowed protocol drops href: {}", result);
        assert!(result.contains("<a>bad</a>"), "Anchor and text remain: {}", result);
    }

    #[test]
    fn test_mailto_protocol_allowed() {
        // Act
        let result = sanitize_html("<a href=\"mailto:a@b.com\">m</a>");

        // Assert
        assert!(
            result.contains("href=\"mailto:a@b.com\""),
            "mailto should be allowed: {}",
            result
        );
    }

    #[test]
    fn test_relative_href_allowed() {
        // Act
        let result = sanitize_html("<a href=\"/tag/python.html\">t</a>");

        // Assert
        assert!(
            result.contains("href=\"/tag/python.html\""),
            "Relative URLs have no scheme to reject: {}",
            result
        );
    }

    #[test]
    fn test_entity_obfuscated_protocol_rejected() {
        // Arrange: &colon; decodes to ':' in a browser
        let html = "<a href=\"javascript&colon;alert(1)\">x</a>";

        // Act
        let result = sanitize_html(html);

        // Assert
        assert!(!result.contains("href"), "Obfuscated scheme must be caught: {}", result);
    }

    #[test]
    fn test_control_character_obfuscated_protocol_rejected() {
        // Arrange: browsers strip tabs and newlines from URLs
        let html = "<a href=\"java\tscript:alert(1)\">x</a>";

        // Act
        let result = sanitize_html(html);

        // Assert
        assert!(!result.contains("href"), "Tab-split scheme must be caught: {}", result);
    }

    #[test]
    fn test_uppercase_scheme_normalized() {
        // Act
        let result = sanitize_html("<a href=\"JaVaScRiPt:alert(1)\">x</a>");

        // Assert
        assert!(!result.contains("href"), "Scheme check is case-insensitive: {}", result);
    }

    #[test]
    fn test_comments_dropped() {
        // Act
        let result = sanitize_html("before<!-- secret -->after");

        // Assert
        assert_eq!(result, "beforeafter");
    }

    #[test]
    fn test_stray_angle_bracket_escaped() {
        // Act
        let result = sanitize_html("1 < 2 and <not closed");

        // Assert
        assert!(result.contains("1 &lt; 2"), "Stray '<' becomes &lt;: {}", result);
        assert!(!result.contains("<not"), "Unterminated tag escaped: {}", result);
    }

    #[test]
    fn test_single_quoted_and_unquoted_attributes() {
        // Act
        let single = sanitize_html("<a href='https://e.com'>s</a>");
        let bare = sanitize_html("<a href=https://e.com>b</a>");

        // Assert
        assert!(
            single.contains("href=\"https://e.com\""),
            "Single-quoted value normalized: {}",
            single
        );
        assert!(
            bare.contains("href=\"https://e.com\""),
            "Unquoted value normalized: {}",
            bare
        );
    }

    #[test]
    fn test_duplicate_attribute_first_wins() {
        // Act
        let result = sanitize_html("<a href=\"https://a.com\" href=\"https://b.com\">x</a>");

        // Assert
        assert!(result.contains("https://a.com"), "First href wins: {}", result);
        assert!(!result.contains("https://b.com"), "Second href dropped: {}", result);
    }

    #[test]
    fn test_ensure_link_rel_injects_when_missing() {
        // Act
        let result = ensure_link_rel("<a href=\"https://e.com\">l</a>");

        // Assert
        assert_eq!(
            result,
            "<a href=\"https://e.com\" rel=\"nofollow noopener\">l</a>"
        );
    }

    #[test]
    fn test_ensure_link_rel_preserves_existing() {
        // Arrange
        let html = "<a href=\"https://e.com\" rel=\"me\">l</a>";

        // Act
        let result = ensure_link_rel(html);

        // Assert
        assert_eq!(result, html, "Existing rel must not be overwritten");
        assert!(!result.contains("nofollow"), "No injection on top of rel=\"me\"");
    }

    #[test]
    fn test_ensure_link_rel_is_idempotent() {
        // Act
        let once = ensure_link_rel("<a href=\"https://e.com\">l</a>");
        let twice = ensure_link_rel(&once);

        // Assert
        assert_eq!(once, twice, "Second pass must not duplicate rel");
        assert_eq!(
            twice.matches("rel=").count(),
            1,
            "Exactly one rel attribute: {}",
            twice
        );
    }

    #[test]
    fn test_ensure_link_rel_bare_anchor() {
        // Act
        let result = ensure_link_rel("<a>x</a>");

        // Assert
        assert_eq!(result, "<a rel=\"nofollow noopener\">x</a>");
    }

    #[test]
    fn test_ensure_link_rel_multiple_anchors() {
        // Arrange
        let html = "<a href=\"https://a.com\">a</a> <a rel=\"me\" href=\"https://b.com\">b</a>";

        // Act
        let result = ensure_link_rel(html);

        // Assert
        assert!(
            result.contains("<a href=\"https://a.com\" rel=\"nofollow noopener\">"),
            "First anchor gets rel: {}",
            result
        );
        assert!(
            result.contains("<a rel=\"me\" href=\"https://b.com\">"),
            "Second anchor untouched: {}",
            result
        );
    }

    #[test]
    fn test_decode_entities_named_and_numeric() {
        assert_eq!(decode_entities("a&amp;b"), "a&b");
        assert_eq!(decode_entities("&#58;"), ":");
        assert_eq!(decode_entities("&#x3A;"), ":");
        assert_eq!(decode_entities("&unknown;"), "&unknown;");
        assert_eq!(decode_entities("no entities"), "no entities");
    }

    #[test]
    fn test_heading_allow_list_split() {
        // Act: h2 is page structure, h3 is user content
        let result = sanitize_html("<h2>big</h2><h3>small</h3>");

        // Assert
        assert!(!result.contains("<h2>"), "h2 should be stripped: {}", result);
        assert!(result.contains("<h3>small</h3>"), "h3 should be kept: {}", result);
        assert!(result.contains("big"), "h2 text survives: {}", result);
    }
}
