use serde::Serialize;
use std::fmt;

/// Maximum accepted length of a search term, in characters
pub const MAX_TERM_LENGTH: usize = 100;

/// Why a term failed format validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TermIssue {
    Empty,
    TooLong,
}

impl TermIssue {
    pub fn message(&self) -> &'static str {
        match self {
            TermIssue::Empty => "Search term cannot be empty",
            TermIssue::TooLong => "Search term too long (max 100 characters)",
        }
    }
}

impl fmt::Display for TermIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Format and length rules for a (normally already sanitized) term
pub struct TermRules;

impl TermRules {
    /// Check the term against the format rules.
    ///
    /// Length is measured on the string as given, so entity expansion from
    /// sanitization counts against the limit.
    pub fn check(term: &str) -> Result<(), TermIssue> {
        if term.is_empty() {
            return Err(TermIssue::Empty);
        }

        if term.chars().count() > MAX_TERM_LENGTH {
            return Err(TermIssue::TooLong);
        }

        Ok(())
    }

    /// Validate and report as `(valid, message)`
    pub fn validate(term: &str) -> (bool, String) {
        match Self::check(term) {
            Ok(()) => (true, "Valid".to_string()),
            Err(issue) => (false, issue.message().to_string()),
        }
    }
}
