use crate::encoder::HtmlEncoder;
use ammonia::Builder;
use std::collections::{HashMap, HashSet};

/// Strips every tag from a search term and escapes what is left.
#[derive(Debug, Clone)]
pub struct TermSanitizer {
    clean_content_tags: Vec<String>,
    strip_comments: bool,
}

impl TermSanitizer {
    /// Create a sanitizer that drops all markup.
    ///
    /// `script` and `style` lose their contents along with the tags; any other
    /// element keeps its text.
    pub fn new() -> Self {
        Self {
            clean_content_tags: vec!["script".to_string(), "style".to_string()],
            strip_comments: true,
        }
    }

    /// Set the elements whose contents are removed together with the tag
    pub fn with_clean_content_tags(mut self, tags: Vec<String>) -> Self {
        self.clean_content_tags = tags;
        self
    }

    /// Set whether to strip HTML comments
    pub fn with_strip_comments(mut self, strip: bool) -> Self {
        self.strip_comments = strip;
        self
    }

    /// Remove markup, then HTML-escape the remaining text, then trim.
    ///
    /// Stripping happens before escaping so that the escaper cannot turn
    /// malformed markup into text the stripper no longer recognises.
    pub fn sanitize(&self, term: &str) -> String {
        if term.is_empty() {
            return String::new();
        }

        let stripped = self.strip_tags(term);
        HtmlEncoder::encode_html(&stripped).trim().to_string()
    }

    /// Remove all tags, leaving text content
    pub fn strip_tags(&self, html: &str) -> String {
        let mut builder = Builder::default();

        builder
            .tags(HashSet::new())
            .generic_attributes(HashSet::new())
            .tag_attributes(HashMap::new())
            .clean_content_tags(self.clean_content_tags.iter().map(|s| s.as_str()).collect())
            .strip_comments(self.strip_comments);

        // The serializer writes U+00A0 as `&nbsp;`; keep it a character so
        // trimming and length see one whitespace char, not an entity.
        builder.clean(html).to_string().replace("&nbsp;", "\u{a0}")
    }
}

impl Default for TermSanitizer {
    fn default() -> Self {
        Self::new()
    }
}
