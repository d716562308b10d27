//! Persistence for per-state fun facts.
//!
//! The [`FactStore`] trait is a small repository over [`FactEntry`]
//! documents keyed by state code. It knows nothing about de-duplication or
//! index bounds; those rules belong to the services.

mod memory;
mod sqlite;

use async_trait::async_trait;

use crate::error::StatesResult;
use crate::models::FactEntry;

pub use memory::InMemoryFactStore;
pub use sqlite::SqliteFactStore;

/// Repository trait for fun-fact documents.
///
/// Implementations must be safe to share between request tasks. Writes
/// replace whole documents, so concurrent read-modify-write cycles on the
/// same state are last-write-wins.
#[async_trait]
pub trait FactStore: Send + Sync {
    /// Finds the entry for a state code.
    async fn find(&self, state_code: &str) -> StatesResult<Option<FactEntry>>;

    /// Returns every stored entry.
    async fn find_all(&self) -> StatesResult<Vec<FactEntry>>;

    /// Creates the entry, or replaces it if one exists for the same code.
    async fn upsert(&self, entry: FactEntry) -> StatesResult<FactEntry>;

    /// Replaces an existing entry.
    ///
    /// # Errors
    /// Returns `StatesError::Storage` if no entry exists for the code.
    async fn save(&self, entry: FactEntry) -> StatesResult<FactEntry>;
}
