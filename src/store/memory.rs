//! In-memory fact store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::FactStore;
use crate::error::{StatesError, StatesResult};
use crate::models::FactEntry;

/// Fact store backed by a map, for tests and throwaway deployments.
#[derive(Debug, Default)]
pub struct InMemoryFactStore {
    entries: RwLock<BTreeMap<String, FactEntry>>,
}

impl InMemoryFactStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with entries.
    pub fn with_entries(entries: impl IntoIterator<Item = FactEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| (entry.state_code.clone(), entry))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl FactStore for InMemoryFactStore {
    async fn find(&self, state_code: &str) -> StatesResult<Option<FactEntry>> {
        Ok(self.entries.read().await.get(state_code).cloned())
    }

    async fn find_all(&self) -> StatesResult<Vec<FactEntry>> {
        Ok(self.entries.read().await.values().cloned().collect())
    }

    async fn upsert(&self, entry: FactEntry) -> StatesResult<FactEntry> {
        self.entries
            .write()
            .await
            .insert(entry.state_code.clone(), entry.clone());
        Ok(entry)
    }

    async fn save(&self, entry: FactEntry) -> StatesResult<FactEntry> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(&entry.state_code) {
            Some(stored) => {
                *stored = entry.clone();
                Ok(entry)
            }
            None => Err(StatesError::storage(format!(
                "no fun facts document for state code '{}'",
                entry.state_code
            ))),
        }
    }
}
