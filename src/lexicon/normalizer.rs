/*!
 * Source text normalization.
 *
 * Strips bracketed annotations (reference markers such as `[1]` or page
 * notes such as `[Page 2]`), removes a fixed set of punctuation characters
 * and collapses whitespace so that the registrar can split on single spaces.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static BRACKETED_SPAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    // `.` stops at newlines, so a span never crosses a line break
    Regex::new(r"\[.*?\]").unwrap()
});

static WHITESPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").unwrap()
});

/// Text normalizer with a configurable punctuation set.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stripped: Vec<char>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(";,.")
    }
}

impl Normalizer {
    /// Create a normalizer that removes every character of `punctuation`.
    pub fn new(punctuation: &str) -> Self {
        Self {
            stripped: punctuation.chars().collect(),
        }
    }

    /// Normalize raw text. Total over all inputs; empty output is valid.
    pub fn normalize(&self, raw_text: &str) -> String {
        if raw_text.is_empty() {
            return String::new();
        }

        let without_brackets = BRACKETED_SPAN_REGEX.replace_all(raw_text, "");
        let without_punctuation: String = without_brackets
            .chars()
            .filter(|c| !self.stripped.contains(c))
            .collect();

        WHITESPACE_RUN_REGEX
            .replace_all(&without_punctuation, " ")
            .trim()
            .to_string()
    }
}
