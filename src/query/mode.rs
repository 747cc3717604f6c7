//! Search mode selection
//!
//! Classifies a raw parameter set into one of the five handling paths and
//! validates date completeness before any filter is built.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{DateSide, QueryError};

/// Parameter keys the compiler recognizes. Anything else is ignored.
pub const RECOGNIZED_KEYS: &[&str] = &[
    "search_name",
    "search_pi",
    "search_by",
    "from_date_day",
    "from_date_month",
    "from_date_year",
    "to_date_day",
    "to_date_month",
    "to_date_year",
];

const DATE_PARTS: &[&str] = &["day", "month", "year"];

/// Raw request parameters in arrival order. Lookup only, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

impl SearchParams {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        SearchParams {
            pairs: pairs.into_iter().collect(),
        }
    }

    /// Value of the first occurrence of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// How many distinct recognized keys are present. This count drives the
    /// advanced-search threshold.
    pub fn recognized_count(&self) -> usize {
        RECOGNIZED_KEYS
            .iter()
            .filter(|&&key| self.contains(key))
            .count()
    }
}

/// Classification of a request's parameters into one of the five handling
/// paths. Determined once per request; drives which filters are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Empty,
    SimpleName,
    SimplePi,
    SimpleDate,
    Advanced,
}

fn part_key(side: DateSide, part: &str) -> String {
    format!("{}_date_{}", side.prefix(), part)
}

/// Any of the side's three parts present at all.
fn has_part(params: &SearchParams, side: DateSide) -> bool {
    DATE_PARTS
        .iter()
        .any(|&part| params.contains(&part_key(side, part)))
}

/// A side is whole only when day, month and year are all present and none
/// of them is blank or the literal `"0"`.
fn is_whole(params: &SearchParams, side: DateSide) -> bool {
    DATE_PARTS.iter().all(|&part| {
        matches!(params.get(&part_key(side, part)), Some(value) if !value.is_empty() && value != "0")
    })
}

/// Resolve one date side to a calendar date.
///
/// Absent entirely → `Ok(None)`. Partially present, blank/zero parts, or
/// parts that do not form a real date → `MalformedDate` naming the side.
pub fn whole_date(params: &SearchParams, side: DateSide) -> Result<Option<NaiveDate>, QueryError> {
    if !has_part(params, side) {
        return Ok(None);
    }
    if !is_whole(params, side) {
        return Err(QueryError::MalformedDate { side });
    }

    let number = |part: &str| -> Result<u32, QueryError> {
        params
            .get(&part_key(side, part))
            .and_then(|value| value.parse().ok())
            .ok_or(QueryError::MalformedDate { side })
    };
    let day = number("day")?;
    let month = number("month")?;
    let year = number("year")?;

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .map(Some)
        .ok_or(QueryError::MalformedDate { side })
}

/// Decide which handling path a parameter set takes.
///
/// Priority order: empty set, date validation, the advanced-count
/// heuristic, then single-field precedence (name, pi, date). The heuristic
/// treats the request as advanced when more recognized parameters are
/// present than one search dimension accounts for: with both dates whole
/// anything beyond the six date keys, with one date whole anything beyond
/// its three keys, otherwise anything beyond a single key. The count must
/// strictly exceed the threshold.
pub fn select_mode(params: &SearchParams) -> Result<SearchMode, QueryError> {
    if params.recognized_count() == 0 {
        debug!("no recognized search parameters, treating as empty search");
        return Ok(SearchMode::Empty);
    }

    let from = whole_date(params, DateSide::From)?;
    let to = whole_date(params, DateSide::To)?;

    let threshold = match (from.is_some(), to.is_some()) {
        (true, true) => 6,
        (true, false) | (false, true) => 3,
        (false, false) => 1,
    };
    if params.recognized_count() > threshold {
        return Ok(SearchMode::Advanced);
    }

    if params.contains("search_name") {
        Ok(SearchMode::SimpleName)
    } else if params.contains("search_pi") {
        Ok(SearchMode::SimplePi)
    } else if from.is_some() || to.is_some() {
        Ok(SearchMode::SimpleDate)
    } else {
        // Recognized keys but nothing filterable, e.g. only `search_by`
        debug!("no filterable dimension in parameters, treating as empty search");
        Ok(SearchMode::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> SearchParams {
        SearchParams::from_pairs(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn test_empty_set_is_empty_mode() {
        assert_eq!(select_mode(&params(&[])).unwrap(), SearchMode::Empty);
    }

    #[test]
    fn test_unrecognized_keys_are_ignored() {
        let p = params(&[("page", "2"), ("utm_source", "mail")]);
        assert_eq!(p.recognized_count(), 0);
        assert_eq!(select_mode(&p).unwrap(), SearchMode::Empty);
    }

    #[test]
    fn test_single_name_is_simple_name() {
        let p = params(&[("search_name", "x")]);
        assert_eq!(select_mode(&p).unwrap(), SearchMode::SimpleName);
    }

    #[test]
    fn test_single_pi_is_simple_pi() {
        let p = params(&[("search_pi", "y")]);
        assert_eq!(select_mode(&p).unwrap(), SearchMode::SimplePi);
    }

    #[test]
    fn test_name_and_pi_is_advanced() {
        // count 2, no whole date, threshold 1
        let p = params(&[("search_name", "x"), ("search_pi", "y")]);
        assert_eq!(select_mode(&p).unwrap(), SearchMode::Advanced);
    }

    #[test]
    fn test_whole_date_alone_is_simple_date() {
        let p = params(&[
            ("from_date_day", "5"),
            ("from_date_month", "3"),
            ("from_date_year", "2015"),
        ]);
        assert_eq!(select_mode(&p).unwrap(), SearchMode::SimpleDate);
    }

    #[test]
    fn test_both_whole_dates_exactly_at_threshold_stay_simple() {
        // count 6, both dates whole, threshold 6: not strictly exceeded
        let p = params(&[
            ("from_date_day", "1"),
            ("from_date_month", "1"),
            ("from_date_year", "2020"),
            ("to_date_day", "1"),
            ("to_date_month", "1"),
            ("to_date_year", "2021"),
        ]);
        assert_eq!(select_mode(&p).unwrap(), SearchMode::SimpleDate);
    }

    #[test]
    fn test_both_whole_dates_plus_name_is_advanced() {
        let p = params(&[
            ("from_date_day", "1"),
            ("from_date_month", "1"),
            ("from_date_year", "2020"),
            ("to_date_day", "1"),
            ("to_date_month", "1"),
            ("to_date_year", "2021"),
            ("search_name", "kiwi"),
        ]);
        assert_eq!(select_mode(&p).unwrap(), SearchMode::Advanced);
    }

    #[test]
    fn test_one_whole_date_plus_name_is_advanced() {
        // count 4, one whole date, threshold 3
        let p = params(&[
            ("from_date_day", "1"),
            ("from_date_month", "1"),
            ("from_date_year", "2020"),
            ("search_name", "kiwi"),
        ]);
        assert_eq!(select_mode(&p).unwrap(), SearchMode::Advanced);
    }

    #[test]
    fn test_partial_date_is_malformed() {
        let p = params(&[("from_date_day", "5"), ("from_date_month", "3")]);
        let err = select_mode(&p).unwrap_err();
        assert!(matches!(
            err,
            QueryError::MalformedDate {
                side: DateSide::From
            }
        ));
    }

    #[test]
    fn test_blank_year_is_malformed() {
        let p = params(&[
            ("from_date_day", "5"),
            ("from_date_month", "3"),
            ("from_date_year", ""),
        ]);
        assert!(matches!(
            select_mode(&p).unwrap_err(),
            QueryError::MalformedDate {
                side: DateSide::From
            }
        ));
    }

    #[test]
    fn test_zero_part_is_malformed() {
        let p = params(&[
            ("to_date_day", "0"),
            ("to_date_month", "3"),
            ("to_date_year", "2015"),
        ]);
        assert!(matches!(
            select_mode(&p).unwrap_err(),
            QueryError::MalformedDate { side: DateSide::To }
        ));
    }

    #[test]
    fn test_partial_date_checked_before_advanced() {
        // Would otherwise be advanced (count 3 > 1), but the broken date
        // must be reported first
        let p = params(&[
            ("search_name", "x"),
            ("search_pi", "y"),
            ("to_date_day", "5"),
        ]);
        assert!(matches!(
            select_mode(&p).unwrap_err(),
            QueryError::MalformedDate { side: DateSide::To }
        ));
    }

    #[test]
    fn test_impossible_date_is_malformed() {
        let p = params(&[
            ("from_date_day", "30"),
            ("from_date_month", "2"),
            ("from_date_year", "2015"),
        ]);
        assert!(matches!(
            select_mode(&p).unwrap_err(),
            QueryError::MalformedDate {
                side: DateSide::From
            }
        ));
    }

    #[test]
    fn test_non_numeric_part_is_malformed() {
        let p = params(&[
            ("from_date_day", "first"),
            ("from_date_month", "3"),
            ("from_date_year", "2015"),
        ]);
        assert!(matches!(
            select_mode(&p).unwrap_err(),
            QueryError::MalformedDate {
                side: DateSide::From
            }
        ));
    }

    #[test]
    fn test_whole_date_resolves() {
        let p = params(&[
            ("from_date_day", "5"),
            ("from_date_month", "3"),
            ("from_date_year", "2015"),
        ]);
        let date = whole_date(&p, DateSide::From).unwrap().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2015, 3, 5).unwrap());
        assert_eq!(whole_date(&p, DateSide::To).unwrap(), None);
    }

    #[test]
    fn test_search_by_alone_is_empty() {
        // Recognized and counted, but not a filterable dimension
        let p = params(&[("search_by", "Primary Investigator")]);
        assert_eq!(select_mode(&p).unwrap(), SearchMode::Empty);
    }

    #[test]
    fn test_name_with_search_by_is_advanced() {
        // search_by shifts the count past the threshold; preserved source
        // behavior of the count heuristic
        let p = params(&[("search_name", "x"), ("search_by", "Name")]);
        assert_eq!(select_mode(&p).unwrap(), SearchMode::Advanced);
    }

    #[test]
    fn test_duplicate_keys_count_once_and_first_wins() {
        let p = SearchParams::from_pairs(vec![
            ("search_name".to_string(), "first".to_string()),
            ("search_name".to_string(), "second".to_string()),
        ]);
        assert_eq!(p.recognized_count(), 1);
        assert_eq!(p.get("search_name"), Some("first"));
        assert_eq!(select_mode(&p).unwrap(), SearchMode::SimpleName);
    }
}
