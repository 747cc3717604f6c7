//! Search term parsing
//!
//! Splits a free-text search string into a two-level boolean structure:
//! whitespace-separated groups are alternatives (OR), `+`-joined operands
//! within a group are conjunctions (AND). Each operand compiles to a
//! [`MatchPattern`]. The two levels are fixed by construction; there is no
//! deeper nesting.

use super::pattern::MatchPattern;
use crate::error::{normalize_text, QueryError};

/// The wildcard character of the query language.
pub const WILDCARD: char = '%';

/// Atomic unit of search text, with the wildcard flags already stripped off
/// the ends of `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub text: String,
    pub wildcard_start: bool,
    pub wildcard_end: bool,
}

impl Term {
    /// Derive wildcard flags from a leading/trailing `%` and strip them.
    pub fn parse(raw: &str) -> Self {
        let mut text = raw;
        let wildcard_start = text.starts_with(WILDCARD);
        if wildcard_start {
            text = &text[1..];
        }
        let wildcard_end = text.ends_with(WILDCARD);
        if wildcard_end {
            text = &text[..text.len() - 1];
        }
        Term {
            text: text.to_string(),
            wildcard_start,
            wildcard_end,
        }
    }
}

/// AND level: every pattern must match the field value.
#[derive(Debug, Clone, PartialEq)]
pub struct TermConjunction {
    pub patterns: Vec<MatchPattern>,
}

/// OR level: at least one conjunction must match. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TermGroup {
    pub alternatives: Vec<TermConjunction>,
}

impl TermGroup {
    /// Parse a raw search string.
    ///
    /// Input is NFKC-normalized and trimmed first; an input with no usable
    /// content is an error the caller maps to "empty filter" or "reject",
    /// depending on whether the field was mandatory.
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        let normalized = normalize_text(input);
        if normalized.is_empty() {
            return Err(QueryError::NoSearchTerm);
        }

        let mut alternatives = Vec::new();
        for group in normalized.split_whitespace() {
            let mut patterns = Vec::new();
            for operand in group.split('+') {
                patterns.push(MatchPattern::compile(&Term::parse(operand))?);
            }
            alternatives.push(TermConjunction { patterns });
        }
        Ok(TermGroup { alternatives })
    }

    /// OR-of-ANDs evaluation against one field value.
    pub fn matches(&self, value: &str) -> bool {
        self.alternatives
            .iter()
            .any(|conjunction| conjunction.patterns.iter().all(|p| p.matches(value)))
    }
}
