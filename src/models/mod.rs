//! Core data models for the states API.
//!
//! This module contains the reference record, the persisted fact document
//! and the response views built from them.

mod fact_entry;
mod state_record;
mod views;

pub use fact_entry::FactEntry;
pub use state_record::{StateRecord, NON_CONTIGUOUS_CODES};
pub use views::{EnrichedState, FunFactsView};
