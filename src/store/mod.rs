//! Record stores
//!
//! The storage seam the compiler hands its filter to. The compiler never
//! queries anything itself; a store takes an assembled [`CompositeFilter`]
//! and returns matching records in its own order.

mod memory;

pub use memory::MemoryStore;

use crate::model::Experiment;
use crate::query::filter::CompositeFilter;
use crate::query::request::SearchOutcome;

/// A backend able to execute a composite filter.
pub trait ExperimentStore {
    /// Execute the filter, returning matches in store order.
    fn search(&self, filter: &CompositeFilter) -> Vec<Experiment>;
}

/// Run the outcome's filter against a store.
///
/// `None` means no search was performed at all (the outcome carried no
/// filter), as opposed to a search that matched nothing.
pub fn materialize(
    store: &dyn ExperimentStore,
    outcome: &SearchOutcome,
) -> Option<Vec<Experiment>> {
    outcome.filter.as_ref().map(|filter| store.search(filter))
}
