//! Filter expressions
//!
//! Value types for the assembled search filter. Construction happens in the
//! query compiler; the only execution point is [`CompositeFilter::matches`],
//! which a store applies per record. If the storage engine ever changes,
//! that method is the single place to translate from.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::parser::TermGroup;
use crate::model::Experiment;

/// Searchable text fields of an experiment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Pi,
}

impl SearchField {
    /// Request parameter key that carries this field's search term.
    pub fn key(&self) -> &'static str {
        match self {
            SearchField::Name => "search_name",
            SearchField::Pi => "search_pi",
        }
    }

    /// Short label used in echo strings and logs.
    pub fn label(&self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Pi => "pi",
        }
    }

    fn value<'a>(&self, experiment: &'a Experiment) -> &'a str {
        match self {
            SearchField::Name => &experiment.name,
            SearchField::Pi => &experiment.pi,
        }
    }
}

/// One field bound to a parsed term group: the record matches when at least
/// one OR alternative has all of its AND patterns matching the field value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: SearchField,
    pub terms: TermGroup,
}

impl FieldFilter {
    pub fn new(field: SearchField, terms: TermGroup) -> Self {
        FieldFilter { field, terms }
    }

    pub fn matches(&self, experiment: &Experiment) -> bool {
        self.terms.matches(self.field.value(experiment))
    }
}

/// Exclusive creation-date bounds. An absent side imposes no bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    /// Matches records with `createddate` strictly after this instant.
    pub after: Option<DateTime<Utc>>,
    /// Matches records with `createddate` strictly before this instant.
    pub before: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Build bounds from whole date sides, at midnight UTC.
    pub fn new(after: Option<NaiveDate>, before: Option<NaiveDate>) -> Self {
        DateRange {
            after: after.map(midnight_utc),
            before: before.map(midnight_utc),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.after.is_none() && self.before.is_none()
    }

    pub fn matches(&self, experiment: &Experiment) -> bool {
        self.after.map_or(true, |from| experiment.createddate > from)
            && self.before.map_or(true, |to| experiment.createddate < to)
    }
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// One AND-joined constituent of the composite filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    Field(FieldFilter),
    Created(DateRange),
}

impl FilterClause {
    fn matches(&self, experiment: &Experiment) -> bool {
        match self {
            FilterClause::Field(field) => field.matches(experiment),
            FilterClause::Created(range) => range.matches(experiment),
        }
    }
}

/// The assembled filter: a non-empty AND of clauses.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeFilter {
    clauses: Vec<FilterClause>,
}

impl CompositeFilter {
    /// Wrap an assembled clause list. An empty list means no constraint was
    /// supplied at all, so no filter exists and no query should run.
    pub fn from_clauses(clauses: Vec<FilterClause>) -> Option<Self> {
        if clauses.is_empty() {
            None
        } else {
            Some(CompositeFilter { clauses })
        }
    }

    /// A composite with a single clause, for the simple search modes.
    pub fn single(clause: FilterClause) -> Self {
        CompositeFilter {
            clauses: vec![clause],
        }
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    /// Backend translation point: a record matches when every clause does.
    pub fn matches(&self, experiment: &Experiment) -> bool {
        self.clauses.iter().all(|clause| clause.matches(experiment))
    }
}
