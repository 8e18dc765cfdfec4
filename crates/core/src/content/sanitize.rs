//! Allowlist HTML sanitizer for rich-text block content.
//!
//! Text blocks carry editor-produced HTML. The editor is supposed to hand
//! us pre-sanitized markup, but a block written directly against the
//! document store bypasses that, so the renderer sanitizes again before
//! emitting raw HTML. Only a small formatting vocabulary survives; every
//! other tag is stripped, and `<script>`-like elements lose their content
//! too. Attributes are dropped wholesale except `href` on anchors, which
//! must carry a safe scheme.

/// Tags that survive sanitization (lowercase).
const ALLOWED_TAGS: &[&str] = &[
    "a", "b", "blockquote", "br", "em", "h2", "h3", "i", "li", "ol", "p", "s", "span", "strong",
    "u", "ul",
];

/// Tags whose entire content is removed, not just the tag itself.
const DROP_CONTENT_TAGS: &[&str] = &["embed", "iframe", "noscript", "object", "script", "style"];

/// Sanitize a fragment of rich-text HTML.
///
/// Text outside tags passes through unchanged (entities included); a `<`
/// that does not open a parsable tag is re-escaped.
pub fn sanitize_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        rest = &rest[lt..];

        match parse_tag(rest) {
            Some(tag) => {
                let consumed = tag.len;
                emit_tag(&tag, &mut out);
                rest = &rest[consumed..];
                if !tag.closing && DROP_CONTENT_TAGS.contains(&tag.name.as_str()) {
                    rest = skip_dropped_content(rest, &tag.name);
                }
            }
            None => {
                // Not a tag; escape the stray `<` and move on.
                out.push_str("&lt;");
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

struct Tag {
    name: String,
    closing: bool,
    href: Option<String>,
    /// Bytes consumed from the input, including the trailing `>`.
    len: usize,
}

/// Parse a tag starting at a `<`. Returns `None` when the input is not a
/// well-formed-enough tag (no name, or no closing `>`).
fn parse_tag(input: &str) -> Option<Tag> {
    let bytes = input.as_bytes();
    let mut i = 1;

    let closing = bytes.get(i) == Some(&b'/');
    if closing {
        i += 1;
    }

    let name_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric()) {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    let name = input[name_start..i].to_ascii_lowercase();

    let close = input[i..].find('>')?;
    let attrs = &input[i..i + close];
    let href = if !closing && name == "a" {
        find_href(attrs).filter(|h| is_safe_href(h))
    } else {
        None
    };

    Some(Tag {
        name,
        closing,
        href,
        len: i + close + 1,
    })
}

fn emit_tag(tag: &Tag, out: &mut String) {
    if !ALLOWED_TAGS.contains(&tag.name.as_str()) {
        return;
    }
    if tag.closing {
        // <br> never closes.
        if tag.name != "br" {
            out.push_str("</");
            out.push_str(&tag.name);
            out.push('>');
        }
        return;
    }
    out.push('<');
    out.push_str(&tag.name);
    if let Some(href) = &tag.href {
        out.push_str(" href=\"");
        out.push_str(&escape_attr(href));
        out.push('"');
    }
    out.push('>');
}

/// Scan a tag's attribute region for an `href` value.
fn find_href(attrs: &str) -> Option<String> {
    let mut rest = attrs;
    loop {
        let eq = rest.find('=')?;
        let name = rest[..eq].trim().rsplit(char::is_whitespace).next()?;
        let value_region = rest[eq + 1..].trim_start();
        let (value, consumed) = match value_region.as_bytes().first() {
            Some(&q @ (b'"' | b'\'')) => {
                let end = value_region[1..].find(q as char)? + 1;
                (&value_region[1..end], end + 1)
            }
            _ => {
                let end = value_region
                    .find(char::is_whitespace)
                    .unwrap_or(value_region.len());
                (&value_region[..end], end)
            }
        };
        if name.eq_ignore_ascii_case("href") {
            return Some(value.to_string());
        }
        let advanced = eq + 1 + (rest[eq + 1..].len() - value_region.len()) + consumed;
        if advanced >= rest.len() {
            return None;
        }
        rest = &rest[advanced..];
    }
}

/// Accept http(s), mailto, and same-site relative links; reject anything
/// with another scheme (javascript:, data:, ...).
fn is_safe_href(href: &str) -> bool {
    let trimmed = href.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("mailto:")
    {
        return true;
    }
    if trimmed.starts_with('/') || trimmed.starts_with('#') {
        return true;
    }
    // A bare relative path is fine as long as no scheme sneaks in.
    !lower.contains(':')
}

/// After an opening drop-content tag, skip everything up to and including
/// its closing tag (or the rest of the input if unclosed).
fn skip_dropped_content<'a>(input: &'a str, name: &str) -> &'a str {
    let lower = input.to_ascii_lowercase();
    let needle = format!("</{name}");
    match lower.find(&needle) {
        Some(pos) => match input[pos..].find('>') {
            Some(gt) => &input[pos + gt + 1..],
            None => "",
        },
        None => "",
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_basic_formatting() {
        let input = "<p>Water <strong>sparingly</strong> in <em>winter</em>.</p>";
        assert_eq!(sanitize_html(input), input);
    }

    #[test]
    fn keeps_lists_and_quotes() {
        let input = "<ul><li>Light</li><li>Soil</li></ul><blockquote>Patience</blockquote>";
        assert_eq!(sanitize_html(input), input);
    }

    #[test]
    fn strips_script_including_content() {
        let input = "<p>hi</p><script>alert('x')</script><p>bye</p>";
        assert_eq!(sanitize_html(input), "<p>hi</p><p>bye</p>");
    }

    #[test]
    fn strips_unclosed_script_to_end() {
        let input = "<p>hi</p><script>alert('x')";
        assert_eq!(sanitize_html(input), "<p>hi</p>");
    }

    #[test]
    fn strips_unknown_tags_but_keeps_their_text() {
        let input = "<article><p>text</p></article>";
        assert_eq!(sanitize_html(input), "<p>text</p>");
    }

    #[test]
    fn drops_event_handler_attributes() {
        let input = "<p onclick=\"steal()\">hello</p>";
        assert_eq!(sanitize_html(input), "<p>hello</p>");
    }

    #[test]
    fn keeps_safe_links_and_drops_javascript_scheme() {
        assert_eq!(
            sanitize_html("<a href=\"https://verdia.example/care\">care</a>"),
            "<a href=\"https://verdia.example/care\">care</a>"
        );
        assert_eq!(
            sanitize_html("<a href=\"/shop\">shop</a>"),
            "<a href=\"/shop\">shop</a>"
        );
        assert_eq!(
            sanitize_html("<a href=\"javascript:alert(1)\">x</a>"),
            "<a>x</a>"
        );
    }

    #[test]
    fn escapes_stray_angle_bracket() {
        assert_eq!(sanitize_html("2 < 3 plants"), "2 &lt; 3 plants");
    }

    #[test]
    fn lowercases_and_normalizes_tags() {
        assert_eq!(sanitize_html("<P>Hi</P>"), "<p>Hi</p>");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(sanitize_html("just words & entities &amp;"), "just words & entities &amp;");
    }
}
