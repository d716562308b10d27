//! Application state for the states API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ResponseSettings;
use crate::dataset::StatesDataset;
use crate::error::StatesError;
use crate::event_log::EventLog;
use crate::services::{FactMutationService, FunFactsService};
use crate::store::FactStore;

use super::response::ApiErrorResponse;

/// Shared application state.
///
/// Holds the immutable dataset, the services built over the fact store, the
/// event log sink and the error response policy.
#[derive(Clone)]
pub struct AppState {
    dataset: Arc<StatesDataset>,
    funfacts: FunFactsService,
    mutations: FactMutationService,
    event_log: EventLog,
    responses: Arc<ResponseSettings>,
}

impl AppState {
    /// Wires the services over a dataset and a fact store.
    pub fn new(
        dataset: StatesDataset,
        store: Arc<dyn FactStore>,
        event_log: EventLog,
        responses: ResponseSettings,
    ) -> Self {
        let dataset = Arc::new(dataset);
        Self {
            funfacts: FunFactsService::new(Arc::clone(&dataset), Arc::clone(&store)),
            mutations: FactMutationService::new(store, event_log.clone()),
            dataset,
            event_log,
            responses: Arc::new(responses),
        }
    }

    /// Returns the static dataset.
    pub fn dataset(&self) -> &StatesDataset {
        &self.dataset
    }

    /// Returns the read-side service.
    pub fn funfacts(&self) -> &FunFactsService {
        &self.funfacts
    }

    /// Returns the write-side service.
    pub fn mutations(&self) -> &FactMutationService {
        &self.mutations
    }

    /// Returns the event log sink.
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Converts an error into a response under the configured policy.
    pub fn reject(&self, error: StatesError) -> ApiErrorResponse {
        ApiErrorResponse::from_error(error, &self.responses)
    }
}
