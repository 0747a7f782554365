use crate::patterns::PatternSet;
use once_cell::sync::Lazy;

// Common XSS attack patterns, in evaluation order
static XSS_PATTERNS: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::compile(&[
        ("script block", r"<script.*?>.*?</script>"),
        ("javascript protocol", r"javascript:"),
        ("event handler attribute", r"on\w+\s*="),
        ("iframe tag", r"<iframe.*?>"),
        ("object tag", r"<object.*?>"),
        ("embed tag", r"<embed.*?>"),
        ("link tag", r"<link.*?>"),
        ("meta tag", r"<meta.*?>"),
        ("vbscript protocol", r"vbscript:"),
        ("html data url", r"data:text/html"),
        ("css expression", r"expression\("),
        ("onerror in tag", r"<.*?onerror.*?>"),
        ("onload in tag", r"<.*?onload.*?>"),
        ("onclick in tag", r"<.*?onclick.*?>"),
        ("alert call", r"alert\("),
        ("confirm call", r"confirm\("),
        ("prompt call", r"prompt\("),
        ("cookie access", r"document\.cookie"),
        ("document write", r"document\.write"),
        ("eval call", r"eval\("),
    ])
});

/// Blacklist detector for script-injection payloads
pub struct XssDetector;

impl XssDetector {
    /// Check if the term contains a known XSS vector.
    ///
    /// Empty input is never an attack.
    pub fn detect(term: &str) -> bool {
        if term.is_empty() {
            return false;
        }
        XSS_PATTERNS.is_match(term)
    }

    /// Name the first rule the term trips, if any
    pub fn matching_pattern(term: &str) -> Option<&'static str> {
        if term.is_empty() {
            return None;
        }
        XSS_PATTERNS.first_match(term).map(|p| p.label)
    }

    /// Number of rules in the table
    pub fn rule_count() -> usize {
        XSS_PATTERNS.len()
    }
}
