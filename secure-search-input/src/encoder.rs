/// HTML encoding utilities
pub struct HtmlEncoder;

impl HtmlEncoder {
    /// Encode the HTML special characters `& < > " '`.
    ///
    /// Existing entities are not recognised, so `&amp;` becomes `&amp;amp;`.
    pub fn encode_html(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#x27;"),
                _ => out.push(c),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_html() {
        let input = r#"<script>alert("XSS")</script>"#;
        let output = HtmlEncoder::encode_html(input);

        assert_eq!(
            output,
            "&lt;script&gt;alert(&quot;XSS&quot;)&lt;/script&gt;"
        );
        assert!(!output.contains('<'));
        assert!(!output.contains('>'));
    }

    #[test]
    fn test_encode_quotes_and_ampersand() {
        assert_eq!(HtmlEncoder::encode_html("Tom & 'Jerry'"), "Tom &amp; &#x27;Jerry&#x27;");
    }

    #[test]
    fn test_existing_entities_are_escaped_again() {
        assert_eq!(HtmlEncoder::encode_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(HtmlEncoder::encode_html("hello world"), "hello world");
        assert_eq!(HtmlEncoder::encode_html(""), "");
    }
}
