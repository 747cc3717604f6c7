//! In-memory record store
//!
//! Holds a record set loaded from a JSON file (or built in code) and
//! evaluates filters by scanning it in insertion order.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::ExperimentStore;
use crate::model::Experiment;
use crate::query::filter::CompositeFilter;

#[derive(Debug)]
pub struct MemoryStore {
    experiments: Vec<Experiment>,
}

impl MemoryStore {
    pub fn new(experiments: Vec<Experiment>) -> Self {
        MemoryStore { experiments }
    }

    /// Load a record set from a JSON array file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read record file {}", path.display()))?;
        let experiments: Vec<Experiment> = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse record file {}", path.display()))?;
        Ok(MemoryStore::new(experiments))
    }

    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }
}

impl ExperimentStore for MemoryStore {
    fn search(&self, filter: &CompositeFilter) -> Vec<Experiment> {
        self.experiments
            .iter()
            .filter(|experiment| filter.matches(experiment))
            .cloned()
            .collect()
    }
}
