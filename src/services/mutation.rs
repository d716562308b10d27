//! Write-side fun-fact operations.
//!
//! Indexes are 1-based on the way in and converted here. Every operation is
//! keyed by the resolved record's code and performs a plain read-modify-write
//! against the store.

use std::sync::Arc;

use tracing::info;

use crate::error::{StatesError, StatesResult};
use crate::event_log::{EventLog, FUNFACT_LOG};
use crate::models::{FactEntry, FunFactsView, StateRecord};
use crate::store::FactStore;

/// Result of an add operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// The state's facts after the addition.
    pub view: FunFactsView,
    /// False when the request carried an empty batch.
    pub created: bool,
}

/// Adds, updates and deletes fun facts.
#[derive(Clone)]
pub struct FactMutationService {
    store: Arc<dyn FactStore>,
    log: EventLog,
}

impl FactMutationService {
    /// Creates the service over a shared store and log sink.
    pub fn new(store: Arc<dyn FactStore>, log: EventLog) -> Self {
        Self { store, log }
    }

    /// Appends facts to the state's list, creating the entry if needed.
    ///
    /// Facts already stored for the state are skipped; repeats within
    /// `new_facts` itself are kept.
    pub async fn add_facts(
        &self,
        record: &StateRecord,
        new_facts: Vec<String>,
    ) -> StatesResult<AddOutcome> {
        let created = !new_facts.is_empty();
        let mut entry = self
            .store
            .find(&record.code)
            .await?
            .unwrap_or_else(|| FactEntry::new(record.code.clone(), Vec::new()));

        let added = entry.append_new(new_facts);
        let entry = self.store.upsert(entry).await?;

        info!(
            state_code = %record.code,
            added,
            total = entry.funfacts.len(),
            "Fun facts added"
        );
        self.log
            .record(&format!("CREATE: Added fun facts to {}", record.code), FUNFACT_LOG)
            .await;

        Ok(AddOutcome {
            view: FunFactsView::new(record, entry.funfacts),
            created,
        })
    }

    /// Replaces the fact at a 1-based index.
    pub async fn update_fact(
        &self,
        record: &StateRecord,
        index: u64,
        text: String,
    ) -> StatesResult<FunFactsView> {
        let mut entry = self.load_non_empty(record).await?;
        let position = position(record, &entry, index)?;

        entry.funfacts[position] = text;
        let entry = self.store.save(entry).await?;

        info!(state_code = %record.code, index, "Fun fact updated");
        self.log
            .record(
                &format!("UPDATE: Fun fact #{index} updated for {}", record.name),
                FUNFACT_LOG,
            )
            .await;

        Ok(FunFactsView::new(record, entry.funfacts))
    }

    /// Removes the fact at a 1-based index; later facts shift down by one.
    pub async fn delete_fact(&self, record: &StateRecord, index: u64) -> StatesResult<FunFactsView> {
        let mut entry = self.load_non_empty(record).await?;
        let position = position(record, &entry, index)?;

        entry.funfacts.remove(position);
        let entry = self.store.save(entry).await?;

        info!(
            state_code = %record.code,
            index,
            remaining = entry.funfacts.len(),
            "Fun fact deleted"
        );
        self.log
            .record(
                &format!("DELETE: Fun fact #{index} deleted for {}", record.name),
                FUNFACT_LOG,
            )
            .await;

        Ok(FunFactsView::new(record, entry.funfacts))
    }

    async fn load_non_empty(&self, record: &StateRecord) -> StatesResult<FactEntry> {
        match self.store.find(&record.code).await? {
            Some(entry) if !entry.is_empty() => Ok(entry),
            _ => Err(StatesError::NoFunFacts {
                state: record.name.clone(),
            }),
        }
    }
}

/// Converts a 1-based index into a position within the entry.
fn position(record: &StateRecord, entry: &FactEntry, index: u64) -> StatesResult<usize> {
    usize::try_from(index)
        .ok()
        .and_then(|index| index.checked_sub(1))
        .filter(|&position| position < entry.funfacts.len())
        .ok_or_else(|| StatesError::FactIndexOutOfRange {
            state: record.name.clone(),
            index,
        })
}
