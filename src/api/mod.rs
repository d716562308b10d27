//! HTTP API module for the states API.
//!
//! This module provides the REST endpoints over the states dataset and the
//! fun-fact store.

mod handlers;
mod middleware;
mod request;
mod resolver;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AddFactsRequest, DeleteFactRequest, StatesQuery, UpdateFactRequest};
pub use resolver::ResolvedState;
pub use response::{
    AdmissionResponse, ApiError, ApiErrorResponse, CapitalResponse, FunFactResponse,
    NicknameResponse, PopulationResponse, ServerFailure,
};
pub use state::AppState;
