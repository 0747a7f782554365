//! Compiled detection pattern tables.

use regex::{Regex, RegexBuilder};

/// A single named detection rule.
#[derive(Debug)]
pub struct Pattern {
    /// Short human-readable name, used in logs
    pub label: &'static str,
    /// The compiled expression
    pub regex: Regex,
}

/// An ordered set of rules, evaluated as a short-circuit OR.
#[derive(Debug)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Compile a table of `(label, expression)` pairs.
    ///
    /// Every expression is matched case-insensitively and `.` also matches
    /// newlines.
    pub fn compile(table: &[(&'static str, &'static str)]) -> Self {
        let patterns = table
            .iter()
            .map(|&(label, source)| Pattern {
                label,
                regex: RegexBuilder::new(source)
                    .case_insensitive(true)
                    .dot_matches_new_line(true)
                    .build()
                    .unwrap_or_else(|e| panic!("invalid built-in pattern {label}: {e}")),
            })
            .collect();

        Self { patterns }
    }

    /// Returns the first rule that matches, in table order.
    pub fn first_match(&self, text: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.regex.is_match(text))
    }

    /// Returns true if any rule matches.
    pub fn is_match(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.patterns.iter().map(|p| p.label)
    }
}
