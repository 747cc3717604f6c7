//! Experiment records
//!
//! The record type searches run over. Record sets are plain JSON arrays so
//! they can be produced by whatever loads them into the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One lab experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub name: String,
    /// Principal investigator
    pub pi: String,
    pub createddate: DateTime<Utc>,
    #[serde(default)]
    pub createdby: String,
    #[serde(default)]
    pub description: String,
}
