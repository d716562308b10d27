//! The static states dataset.
//!
//! [`StatesDataset`] holds the reference records in their fixed file order
//! and resolves state codes. It is built once at startup and shared behind an
//! `Arc`.
//!
//! # Example
//!
//! ```no_run
//! use states_api::dataset::StatesDataset;
//!
//! let dataset = StatesDataset::load("./data/states.json").unwrap();
//! let ohio = dataset.resolve("oh").unwrap();
//! println!("{} has capital {}", ohio.name, ohio.capital_city);
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{StatesError, StatesResult};
use crate::models::StateRecord;

/// Filter applied to the full listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contiguity {
    /// Only the contiguous 48.
    Contiguous,
    /// Only Alaska and Hawaii.
    NonContiguous,
}

impl Contiguity {
    /// Returns true if the record passes this filter.
    pub fn matches(self, record: &StateRecord) -> bool {
        match self {
            Contiguity::Contiguous => record.is_contiguous(),
            Contiguity::NonContiguous => !record.is_contiguous(),
        }
    }
}

/// Immutable, ordered collection of state records.
#[derive(Debug, Clone)]
pub struct StatesDataset {
    records: Vec<StateRecord>,
    by_code: HashMap<String, usize>,
}

impl StatesDataset {
    /// Builds a dataset from records, keeping their order.
    ///
    /// Fails if a code is not two letters or appears twice.
    pub fn new(records: Vec<StateRecord>) -> StatesResult<Self> {
        let mut by_code = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            let well_formed =
                record.code.len() == 2 && record.code.chars().all(|c| c.is_ascii_uppercase());
            if !well_formed {
                return Err(StatesError::DatasetError {
                    path: "<memory>".to_string(),
                    message: format!("invalid state code '{}'", record.code),
                });
            }
            if by_code.insert(record.code.clone(), position).is_some() {
                return Err(StatesError::DatasetError {
                    path: "<memory>".to_string(),
                    message: format!("duplicate state code '{}'", record.code),
                });
            }
        }
        Ok(Self { records, by_code })
    }

    /// Loads the dataset from a JSON array file.
    pub fn load<P: AsRef<Path>>(path: P) -> StatesResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|e| StatesError::DatasetError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        let records: Vec<StateRecord> =
            serde_json::from_str(&content).map_err(|e| StatesError::DatasetError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        Self::new(records).map_err(|err| match err {
            StatesError::DatasetError { message, .. } => StatesError::DatasetError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Looks up a record by code, case-insensitively.
    ///
    /// # Returns
    ///
    /// The matching record, or `StateNotFound` carrying the uppercased code.
    pub fn resolve(&self, code: &str) -> StatesResult<&StateRecord> {
        let code = code.to_ascii_uppercase();
        self.by_code
            .get(&code)
            .map(|&position| &self.records[position])
            .ok_or(StatesError::StateNotFound { code })
    }

    /// All records in dataset order.
    pub fn records(&self) -> &[StateRecord] {
        &self.records
    }

    /// Records passing the optional contiguity filter, in dataset order.
    pub fn filtered(&self, contiguity: Option<Contiguity>) -> impl Iterator<Item = &StateRecord> {
        self.records
            .iter()
            .filter(move |record| contiguity.is_none_or(|c| c.matches(record)))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
