//! Error types for the search query compiler

use std::fmt;

use thiserror::Error;

/// Side of the creation-date range a group of parameters belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSide {
    From,
    To,
}

impl DateSide {
    /// Parameter-name prefix for this side (`from_date_*` / `to_date_*`).
    pub fn prefix(&self) -> &'static str {
        match self {
            DateSide::From => "from",
            DateSide::To => "to",
        }
    }
}

impl fmt::Display for DateSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Validation failures raised while compiling a search request.
///
/// All of these surface synchronously to the immediate caller; a request
/// either compiles to a complete filter or fails before anything is handed
/// to a store.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("search term is empty after wildcard stripping")]
    EmptyTerm,
    #[error("no usable search term")]
    NoSearchTerm,
    #[error("malformed {side} date: day, month and year must all be present, non-zero and form a real date")]
    MalformedDate { side: DateSide },
    #[error("no recognized search parameters")]
    UnrecognizedParameters,
    #[error("invalid match pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl QueryError {
    /// Stable code for programmatic handling of failures.
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::EmptyTerm => "empty_term",
            QueryError::NoSearchTerm => "no_search_term",
            QueryError::MalformedDate { .. } => "malformed_date",
            QueryError::UnrecognizedParameters => "unrecognized_parameters",
            QueryError::Pattern(_) => "invalid_pattern",
        }
    }
}

/// Normalize query text using Unicode NFKC and trim surrounding whitespace.
pub fn normalize_text(text: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    text.nfkc().collect::<String>().trim().to_string()
}
