//! Response views built by joining the dataset with the fact store.

use serde::{Deserialize, Serialize};

use super::StateRecord;

/// A state record enriched with its fun facts.
///
/// `funfacts` is omitted entirely when the store has no entry for the state,
/// but is emitted (possibly empty) when one exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedState {
    /// The reference fields.
    #[serde(flatten)]
    pub record: StateRecord,
    /// The stored fun facts, if any entry exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funfacts: Option<Vec<String>>,
}

impl EnrichedState {
    /// Wraps a record with an optional fact list.
    pub fn new(record: StateRecord, funfacts: Option<Vec<String>>) -> Self {
        Self { record, funfacts }
    }
}

/// The view returned by every fun-fact mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunFactsView {
    /// The state name.
    pub state: String,
    /// The two-letter code.
    pub state_code: String,
    /// The capital city.
    pub capital: String,
    /// The full fact list after the mutation.
    pub funfacts: Vec<String>,
}

impl FunFactsView {
    /// Builds the view from a record and its current facts.
    pub fn new(record: &StateRecord, funfacts: Vec<String>) -> Self {
        Self {
            state: record.name.clone(),
            state_code: record.code.clone(),
            capital: record.capital_city.clone(),
            funfacts,
        }
    }
}
