//! Read-side merge of the dataset with stored fun facts.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use crate::dataset::{Contiguity, StatesDataset};
use crate::error::{StatesError, StatesResult};
use crate::models::{EnrichedState, StateRecord};
use crate::store::FactStore;

/// Joins dataset records with their stored fun facts.
#[derive(Clone)]
pub struct FunFactsService {
    dataset: Arc<StatesDataset>,
    store: Arc<dyn FactStore>,
}

impl FunFactsService {
    /// Creates the service over a shared dataset and store.
    pub fn new(dataset: Arc<StatesDataset>, store: Arc<dyn FactStore>) -> Self {
        Self { dataset, store }
    }

    /// Lists every state, optionally filtered by contiguity.
    ///
    /// The store is read once and indexed by code; records keep dataset order
    /// and carry `funfacts` only when the store has an entry for them.
    pub async fn list_all(&self, contiguity: Option<Contiguity>) -> StatesResult<Vec<EnrichedState>> {
        let mut facts_by_code: HashMap<String, Vec<String>> = self
            .store
            .find_all()
            .await?
            .into_iter()
            .map(|entry| (entry.state_code, entry.funfacts))
            .collect();

        let states: Vec<EnrichedState> = self
            .dataset
            .filtered(contiguity)
            .map(|record| EnrichedState::new(record.clone(), facts_by_code.remove(&record.code)))
            .collect();

        debug!(
            states = states.len(),
            filter = ?contiguity,
            "Merged states with fun facts"
        );
        Ok(states)
    }

    /// Returns a single resolved state with its fun facts, if any.
    pub async fn get_one(&self, record: &StateRecord) -> StatesResult<EnrichedState> {
        let funfacts = self
            .store
            .find(&record.code)
            .await?
            .map(|entry| entry.funfacts);
        Ok(EnrichedState::new(record.clone(), funfacts))
    }

    /// Returns one of the state's fun facts, chosen uniformly at random.
    ///
    /// # Errors
    /// `NoFunFacts` if the state has no entry or an empty list.
    pub async fn random_fact(&self, record: &StateRecord) -> StatesResult<String> {
        let facts = self
            .store
            .find(&record.code)
            .await?
            .map(|entry| entry.funfacts)
            .unwrap_or_default();

        pick_fact(&facts, &mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| StatesError::NoFunFacts {
                state: record.name.clone(),
            })
    }
}

/// Picks a uniformly random element, or `None` for an empty slice.
pub fn pick_fact<'a, R: Rng>(facts: &'a [String], rng: &mut R) -> Option<&'a String> {
    if facts.is_empty() {
        return None;
    }
    facts.get(rng.gen_range(0..facts.len()))
}
