//! # Secure Search Input
//!
//! Screening of a single free-text search field against script-injection and
//! SQL-injection payloads, followed by sanitization and format validation.
//!
//! ## Features
//!
//! - **XSS Detection** - blacklist of script tags, dangerous protocols,
//!   event handler attributes and call forms
//! - **SQL Injection Detection** - tautologies, keyword attacks, comment
//!   truncation and statement chaining
//! - **Sanitization** - strip all markup, HTML-escape the rest, trim
//! - **Validation** - non-empty, at most 100 characters
//!
//! ## Quick Start
//!
//! ```rust
//! use secure_search_input::{
//!     detect_sql_injection_attack, detect_xss_attack, sanitize_search_term,
//!     validate_search_term,
//! };
//!
//! assert!(detect_xss_attack("<script>alert('xss')</script>"));
//! assert!(detect_sql_injection_attack("' OR 1=1 --"));
//!
//! let clean = sanitize_search_term("  <b>hello</b> world ");
//! assert_eq!(clean, "hello world");
//! assert_eq!(validate_search_term(&clean), (true, "Valid".to_string()));
//! ```
//!
//! ## Pipeline
//!
//! ```rust
//! use secure_search_input::{evaluate, Rejection, Verdict};
//!
//! assert_eq!(evaluate("' OR 1=1 --"), Verdict::Rejected(Rejection::SqlInjectionDetected));
//! assert_eq!(evaluate("hello world"), Verdict::Accepted("hello world".to_string()));
//! ```
//!
//! The detectors are heuristics. Ordinary text such as `true=true` or a phrase
//! with `OR` between quoted words is reported as an attack.

pub mod encoder;
pub mod error;
pub mod patterns;
pub mod rules;
pub mod sanitizer;
pub mod sql;
pub mod verdict;
pub mod xss;

pub use encoder::HtmlEncoder;
pub use error::{InputError, Result};
pub use rules::{MAX_TERM_LENGTH, TermIssue, TermRules};
pub use sanitizer::TermSanitizer;
pub use sql::SqlInjectionDetector;
pub use verdict::{Rejection, Screening, Verdict, evaluate, screen};
pub use xss::XssDetector;

/// Returns true if the raw term matches any XSS rule
pub fn detect_xss_attack(term: &str) -> bool {
    XssDetector::detect(term)
}

/// Returns true if the raw term matches any SQL-injection rule
pub fn detect_sql_injection_attack(term: &str) -> bool {
    SqlInjectionDetector::detect(term)
}

/// Strip markup, escape HTML specials and trim
pub fn sanitize_search_term(term: &str) -> String {
    TermSanitizer::new().sanitize(term)
}

/// Returns `(valid, message)` for a sanitized term
pub fn validate_search_term(term: &str) -> (bool, String) {
    TermRules::validate(term)
}

/// Run the full pipeline, reporting a rejection as an error
pub fn evaluate_term(raw: &str) -> Result<String> {
    match evaluate(raw) {
        Verdict::Accepted(term) => Ok(term),
        Verdict::Rejected(rejection) => Err(rejection.into()),
    }
}
