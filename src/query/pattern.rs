//! Match pattern compilation
//!
//! Turns one atomic search term into a case-insensitive match pattern.
//! A side of the term without a wildcard must sit on a word or underscore
//! boundary in the field value; a side with a wildcard is unconstrained.
//!
//! Example: `kiwi` matches `Kiwi Fruit` and `Kiwi_Fruit` but not
//! `Kiwifruit`; `kiwi%` matches all three.

use regex::Regex;

use super::parser::Term;
use crate::error::QueryError;

// The regex crate has no look-around, so the boundary is a consuming
// alternation: start/end of string, a non-word character, or an underscore.
// Equivalent under containment matching.
const LEFT_BOUNDARY: &str = r"(?:\A|[\W_])";
const RIGHT_BOUNDARY: &str = r"(?:[\W_]|\z)";

/// Compiled form of a [`Term`].
#[derive(Debug, Clone)]
pub enum MatchPattern {
    /// A bare wildcard term (`%`, `%%`): matches any value of any length.
    Any,
    /// A term with boundary rules applied on each side.
    Word(Regex),
}

impl MatchPattern {
    /// Compile a stripped term into a pattern.
    ///
    /// A term that stripped down to nothing is only valid if it actually had
    /// a wildcard; otherwise the operand was empty to begin with.
    pub fn compile(term: &Term) -> Result<Self, QueryError> {
        if term.text.is_empty() {
            if term.wildcard_start || term.wildcard_end {
                return Ok(MatchPattern::Any);
            }
            return Err(QueryError::EmptyTerm);
        }

        let mut pattern = String::from("(?i)");
        if !term.wildcard_start {
            pattern.push_str(LEFT_BOUNDARY);
        }
        // Term text is matched literally; `%` is this language's only
        // meta-character.
        pattern.push_str(&regex::escape(&term.text));
        if !term.wildcard_end {
            pattern.push_str(RIGHT_BOUNDARY);
        }
        Ok(MatchPattern::Word(Regex::new(&pattern)?))
    }

    /// Whether the pattern matches anywhere in the field value.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            MatchPattern::Any => true,
            MatchPattern::Word(regex) => regex.is_match(value),
        }
    }
}

impl PartialEq for MatchPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MatchPattern::Any, MatchPattern::Any) => true,
            (MatchPattern::Word(a), MatchPattern::Word(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}
