use crate::rules::{TermIssue, TermRules};
use crate::sanitizer::TermSanitizer;
use crate::sql::SqlInjectionDetector;
use crate::xss::XssDetector;
use serde::Serialize;

/// Why a raw term was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Rejection {
    XssDetected,
    SqlInjectionDetected,
    ValidationFailed(TermIssue),
}

impl Rejection {
    /// Message shown to the user. Never contains the submitted term.
    pub fn user_message(&self) -> String {
        match self {
            Rejection::XssDetected => {
                "Potential XSS attack detected. Input cleared for security.".to_string()
            }
            Rejection::SqlInjectionDetected => {
                "Potential SQL injection attack detected. Input cleared for security.".to_string()
            }
            Rejection::ValidationFailed(issue) => format!("Invalid input: {}", issue),
        }
    }

    /// Short machine-readable kind, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Rejection::XssDetected => "xss",
            Rejection::SqlInjectionDetected => "sql_injection",
            Rejection::ValidationFailed(TermIssue::Empty) => "empty",
            Rejection::ValidationFailed(TermIssue::TooLong) => "too_long",
        }
    }
}

/// Outcome of screening one raw term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Verdict {
    Accepted(String),
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }

    /// The sanitized term, if accepted
    pub fn accepted_term(&self) -> Option<&str> {
        match self {
            Verdict::Accepted(term) => Some(term),
            Verdict::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Verdict::Accepted(_) => None,
            Verdict::Rejected(rejection) => Some(*rejection),
        }
    }
}

/// A verdict together with the detection rule that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screening {
    pub verdict: Verdict,
    /// Label of the first matching XSS or SQL rule; `None` for accepted
    /// terms and validation failures
    pub rule: Option<&'static str>,
}

/// Screen a raw term, reporting which rule fired.
///
/// Detection always runs on the raw term; only a term that passes both
/// detectors is sanitized, and the length rule applies to the sanitized form.
/// Each rule table is scanned at most once.
pub fn screen(raw: &str) -> Screening {
    if let Some(rule) = XssDetector::matching_pattern(raw) {
        tracing::debug!(rule, "xss rule matched");
        return Screening {
            verdict: Verdict::Rejected(Rejection::XssDetected),
            rule: Some(rule),
        };
    }

    if let Some(rule) = SqlInjectionDetector::matching_pattern(raw) {
        tracing::debug!(rule, "sql injection rule matched");
        return Screening {
            verdict: Verdict::Rejected(Rejection::SqlInjectionDetected),
            rule: Some(rule),
        };
    }

    let sanitized = TermSanitizer::new().sanitize(raw);

    let verdict = match TermRules::check(&sanitized) {
        Ok(()) => Verdict::Accepted(sanitized),
        Err(issue) => Verdict::Rejected(Rejection::ValidationFailed(issue)),
    };

    Screening {
        verdict,
        rule: None,
    }
}

/// Screen a raw term
pub fn evaluate(raw: &str) -> Verdict {
    screen(raw).verdict
}
