//! Keyword pseudo-complexity.
//!
//! A language-agnostic estimate: plain substring counts of branching keywords
//! and operators, plus one point per comprehension-like bracket. Keywords
//! inside strings, comments and longer identifiers are counted too.

use std::sync::LazyLock;

use regex::Regex;
use repometer_types::PseudoComplexity;

/// Substrings counted as decision points, each occurrence once.
pub const DECISION_KEYWORDS: &[&str] = &[
    "if ", "elif ", "else", "for ", "while ", "case ", "switch", "try", "catch", "except", "&&",
    "||", " and ", " or ",
];

static COMPREHENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\[({][^\[\]{}\n]{0,80}\bfor\b[^\[\]{}\n]{0,80}[\])}]")
        .expect("valid regex literal")
});

/// Non-overlapping occurrences of every decision keyword.
pub fn keyword_hits(text: &str) -> usize {
    DECISION_KEYWORDS
        .iter()
        .map(|kw| text.matches(kw).count())
        .sum()
}

/// Bracketed expressions containing a `for` clause on one line.
pub fn comprehensions(text: &str) -> usize {
    COMPREHENSION.find_iter(text).count()
}

pub fn pseudo_complexity(text: &str) -> PseudoComplexity {
    PseudoComplexity::new(keyword_hits(text), comprehensions(text))
}
