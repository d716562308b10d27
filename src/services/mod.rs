//! Business logic joining the static dataset with the fact store.
//!
//! - [`FunFactsService`] reads: full listing, single state, random fact.
//! - [`FactMutationService`] writes: add, update-at-index, delete-at-index.
//! - [`validation`] turns raw JSON request values into typed inputs.

mod funfacts;
mod mutation;
pub mod validation;

pub use funfacts::{pick_fact, FunFactsService};
pub use mutation::{AddOutcome, FactMutationService};
