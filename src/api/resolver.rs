//! State code resolution for `/states/:state` routes.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use tracing::debug;

use crate::error::StatesError;
use crate::models::StateRecord;

use super::response::ApiErrorResponse;
use super::state::AppState;

/// The dataset record named by the `:state` path segment.
///
/// Extraction uppercases the segment and looks it up; an unknown code
/// rejects the request before any body is read or any store is touched.
#[derive(Debug, Clone)]
pub struct ResolvedState(pub StateRecord);

#[async_trait]
impl FromRequestParts<AppState> for ResolvedState {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(code) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| state.reject(StatesError::validation(rejection.body_text())))?;

        match state.dataset().resolve(&code) {
            Ok(record) => Ok(ResolvedState(record.clone())),
            Err(err) => {
                debug!(state_code = %code, "Unknown state code");
                Err(state.reject(err))
            }
        }
    }
}
