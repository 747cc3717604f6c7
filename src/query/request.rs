//! Request compilation
//!
//! Ties mode selection, term parsing and filter assembly together: from raw
//! request parameters to the composite filter a store executes.

use tracing::debug;

use super::filter::{CompositeFilter, DateRange, FieldFilter, FilterClause, SearchField};
use super::mode::{select_mode, whole_date, SearchMode, SearchParams};
use super::parser::TermGroup;
use crate::error::{normalize_text, DateSide, QueryError};

/// What the compiler hands back to the caller: the classified mode, the
/// assembled filter (absent when no search should run at all), and an echo
/// of the search term so the caller can tell "no results" apart from
/// "no search performed".
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub mode: SearchMode,
    pub filter: Option<CompositeFilter>,
    pub search_term: Option<String>,
}

/// Compile a parameter set into a search outcome.
///
/// Lenient entry point: a parameter set with nothing to search by yields
/// `Empty` mode and no filter, the way the search page renders its blank
/// state.
pub fn compile(params: &SearchParams) -> Result<SearchOutcome, QueryError> {
    let mode = select_mode(params)?;
    let outcome = match mode {
        SearchMode::Empty => SearchOutcome {
            mode,
            filter: None,
            search_term: None,
        },
        SearchMode::SimpleName => simple_field(params, mode, SearchField::Name)?,
        SearchMode::SimplePi => simple_field(params, mode, SearchField::Pi)?,
        SearchMode::SimpleDate => simple_date(params)?,
        SearchMode::Advanced => advanced(params)?,
    };
    debug!(
        mode = ?outcome.mode,
        has_filter = outcome.filter.is_some(),
        "compiled search request"
    );
    Ok(outcome)
}

/// Compile for an API caller: a parameter set with nothing to query by is an
/// error rather than a blank page.
pub fn compile_strict(params: &SearchParams) -> Result<SearchOutcome, QueryError> {
    let outcome = compile(params)?;
    if outcome.mode == SearchMode::Empty {
        return Err(QueryError::UnrecognizedParameters);
    }
    Ok(outcome)
}

/// Single-field search: the field is mandatory here, so an empty term is a
/// validation failure, not an empty filter.
fn simple_field(
    params: &SearchParams,
    mode: SearchMode,
    field: SearchField,
) -> Result<SearchOutcome, QueryError> {
    let term = normalize_text(params.get(field.key()).unwrap_or_default());
    let terms = TermGroup::parse(&term)?;
    Ok(SearchOutcome {
        mode,
        filter: Some(CompositeFilter::single(FilterClause::Field(
            FieldFilter::new(field, terms),
        ))),
        search_term: Some(term),
    })
}

fn simple_date(params: &SearchParams) -> Result<SearchOutcome, QueryError> {
    let range = date_range(params)?;
    Ok(SearchOutcome {
        mode: SearchMode::SimpleDate,
        search_term: Some(describe_range(&range)),
        filter: Some(CompositeFilter::single(FilterClause::Created(range))),
    })
}

/// Advanced search: AND together whichever of name, pi and date range were
/// actually supplied. A field that is present but blank contributes nothing;
/// if nothing contributes, there is no filter and no query runs.
fn advanced(params: &SearchParams) -> Result<SearchOutcome, QueryError> {
    let mut clauses = Vec::new();
    let mut described = Vec::new();

    for field in [SearchField::Name, SearchField::Pi] {
        if let Some(raw) = params.get(field.key()) {
            let term = normalize_text(raw);
            if !term.is_empty() {
                let terms = TermGroup::parse(&term)?;
                clauses.push(FilterClause::Field(FieldFilter::new(field, terms)));
                described.push(format!("{}: {}", field.label(), term));
            }
        }
    }

    let range = date_range(params)?;
    if !range.is_empty() {
        described.push(describe_range(&range));
        clauses.push(FilterClause::Created(range));
    }

    let filter = CompositeFilter::from_clauses(clauses);
    let search_term = filter.is_some().then(|| described.join(", "));
    Ok(SearchOutcome {
        mode: SearchMode::Advanced,
        filter,
        search_term,
    })
}

/// Bounds for whichever date sides are whole; absent sides stay unbounded.
fn date_range(params: &SearchParams) -> Result<DateRange, QueryError> {
    let from = whole_date(params, DateSide::From)?;
    let to = whole_date(params, DateSide::To)?;
    Ok(DateRange::new(from, to))
}

fn describe_range(range: &DateRange) -> String {
    match (range.after, range.before) {
        (Some(after), Some(before)) => format!(
            "created {} to {}",
            after.format("%Y-%m-%d"),
            before.format("%Y-%m-%d")
        ),
        (Some(after), None) => format!("created after {}", after.format("%Y-%m-%d")),
        (None, Some(before)) => format!("created before {}", before.format("%Y-%m-%d")),
        (None, None) => String::new(),
    }
}
