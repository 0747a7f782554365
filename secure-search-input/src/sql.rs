use crate::patterns::PatternSet;
use once_cell::sync::Lazy;

// Common SQL injection patterns, in evaluation order
static SQL_PATTERNS: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::compile(&[
        ("single-quoted OR", r"'.*?OR.*?'.*?'"),
        ("double-quoted OR", r#"".*?OR.*?".*?""#),
        ("single-quoted AND", r"'.*?AND.*?'.*?'"),
        ("double-quoted AND", r#"".*?AND.*?".*?""#),
        ("single-quoted UNION SELECT", r"'.*?UNION.*?SELECT"),
        ("double-quoted UNION SELECT", r#"".*?UNION.*?SELECT"#),
        ("single-quoted DROP TABLE", r"'.*?DROP.*?TABLE"),
        ("double-quoted DROP TABLE", r#"".*?DROP.*?TABLE"#),
        ("single-quoted DELETE FROM", r"'.*?DELETE.*?FROM"),
        ("double-quoted DELETE FROM", r#"".*?DELETE.*?FROM"#),
        ("single-quoted INSERT INTO", r"'.*?INSERT.*?INTO"),
        ("double-quoted INSERT INTO", r#"".*?INSERT.*?INTO"#),
        ("single-quoted UPDATE SET", r"'.*?UPDATE.*?SET"),
        ("double-quoted UPDATE SET", r#"".*?UPDATE.*?SET"#),
        ("single-quoted EXEC call", r"'.*?EXEC.*?\("),
        ("double-quoted EXEC call", r#"".*?EXEC.*?\("#),
        ("single-quoted EXEC statement", r"'.*?EXEC\s+"),
        ("double-quoted EXEC statement", r#"".*?EXEC\s+"#),
        ("line comment", r"--"),
        ("block comment", r"/\*.*?\*/"),
        ("chained statement", r";\s*(DROP|DELETE|INSERT|UPDATE|EXEC)"),
        ("single-quoted numeric tautology", r"'\s*(OR|AND)\s+\d+\s*=\s*\d+"),
        ("double-quoted numeric tautology", r#""\s*(OR|AND)\s+\d+\s*=\s*\d+"#),
        ("single-quoted string tautology", r"'\s*(OR|AND)\s+'.*?'\s*=\s*'.*?'"),
        ("double-quoted string tautology", r#""\s*(OR|AND)\s+".*?"\s*=\s*".*?""#),
        ("one equals one", r"1\s*=\s*1"),
        ("zero equals zero", r"0\s*=\s*0"),
        ("true equals true", r"true\s*=\s*true"),
        ("false equals false", r"false\s*=\s*false"),
    ])
});

/// Blacklist detector for SQL-injection payloads
pub struct SqlInjectionDetector;

impl SqlInjectionDetector {
    /// Check if the term looks like an injection attempt.
    ///
    /// Empty input is never an attack.
    pub fn detect(term: &str) -> bool {
        if term.is_empty() {
            return false;
        }
        SQL_PATTERNS.is_match(term)
    }

    /// Name the first rule the term trips, if any
    pub fn matching_pattern(term: &str) -> Option<&'static str> {
        if term.is_empty() {
            return None;
        }
        SQL_PATTERNS.first_match(term).map(|p| p.label)
    }

    pub fn rule_count() -> usize {
        SQL_PATTERNS.len()
    }
}
