//! # Content sanitation
//!
//! Escape-first sanitizer for user-submitted markup. All input is HTML
//! escaped, then a small allowlist of bare formatting tags is restored.
//! A tag carrying any attribute never matches the restore patterns, so
//! event handlers and javascript: URLs cannot survive.

use domains::Sanitizer;

/// Formatting tags restored by the default policy. Attribute-less and
/// lowercase only.
pub const DEFAULT_ALLOWED_TAGS: &[&str] = &["b", "i", "em", "strong", "code", "pre"];

/// Escapes `raw` and restores the bare `allowed_tags`, converting line
/// breaks to `<br />` so the stored value renders as written.
pub fn sanitize(raw: &str, allowed_tags: &[&str]) -> String {
    let mut escaped = html_escape::encode_safe(raw).to_string();

    for tag in allowed_tags {
        let open = format!("&lt;{tag}&gt;");
        let close = format!("&lt;/{tag}&gt;");
        escaped = escaped
            .replace(&open, &format!("<{tag}>"))
            .replace(&close, &format!("</{tag}>"));
    }

    escaped.lines().collect::<Vec<_>>().join("<br />")
}

/// The sanitizer wired into the running application.
#[derive(Debug, Clone)]
pub struct HtmlSanitizer {
    allowed_tags: Vec<&'static str>,
}

impl HtmlSanitizer {
    pub fn new(allowed_tags: &[&'static str]) -> Self {
        Self {
            allowed_tags: allowed_tags.to_vec(),
        }
    }

    pub fn default_policy() -> Self {
        Self::new(DEFAULT_ALLOWED_TAGS)
    }
}

impl Sanitizer for HtmlSanitizer {
    fn clean(&self, raw: &str) -> String {
        sanitize(raw, &self.allowed_tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_tags_are_escaped() {
        let out = sanitize("<script>alert(1)</script>hi", DEFAULT_ALLOWED_TAGS);
        assert!(out.contains("&lt;script&gt;"));
        assert!(!out.contains("<script>"));
        assert!(out.ends_with("hi"));
    }

    #[test]
    fn allowed_bare_tags_survive() {
        let out = sanitize("some <b>bold</b> and <em>emphasis</em>", DEFAULT_ALLOWED_TAGS);
        assert_eq!(out, "some <b>bold</b> and <em>emphasis</em>");
    }

    #[test]
    fn attributes_keep_the_tag_escaped() {
        let out = sanitize(r#"<b onclick="steal()">x</b>"#, DEFAULT_ALLOWED_TAGS);
        assert!(out.starts_with("&lt;b onclick="));
        // The bare closing tag is still fine to restore.
        assert!(out.ends_with("x</b>"));
    }

    #[test]
    fn literal_entity_text_is_not_mistaken_for_a_tag() {
        // A user typing "&lt;b&gt;" literally gets it double-escaped, so the
        // restore pass must not turn it into real markup.
        let out = sanitize("&lt;b&gt;", DEFAULT_ALLOWED_TAGS);
        assert_eq!(out, "&amp;lt;b&amp;gt;");
    }

    #[test]
    fn newlines_become_line_breaks() {
        let out = sanitize("first\nsecond", DEFAULT_ALLOWED_TAGS);
        assert_eq!(out, "first<br />second");
    }

    #[test]
    fn sanitizer_trait_applies_configured_policy() {
        let strict = HtmlSanitizer::new(&[]);
        assert_eq!(strict.clean("<b>x</b>"), "&lt;b&gt;x&lt;/b&gt;");

        let default = HtmlSanitizer::default_policy();
        assert_eq!(default.clean("<code>x</code>"), "<code>x</code>");
    }
}
