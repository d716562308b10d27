//! Response types for the states API.
//!
//! This module defines the JSON bodies returned by the projection endpoints
//! and the error response structures used by every handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::{InvalidStateStatus, ResponseSettings};
use crate::error::StatesError;

/// Body of `GET /states/:state/capital`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalResponse {
    /// The state name.
    pub state: String,
    /// The capital city.
    pub capital: String,
}

/// Body of `GET /states/:state/nickname`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicknameResponse {
    /// The state name.
    pub state: String,
    /// The nickname.
    pub nickname: String,
}

/// Body of `GET /states/:state/population`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationResponse {
    /// The state name.
    pub state: String,
    /// Population with en-US digit grouping.
    pub population: String,
}

/// Body of `GET /states/:state/admission`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionResponse {
    /// The state name.
    pub state: String,
    /// Admission date as `YYYY-MM-DD`.
    pub admitted: String,
}

/// Body of `GET /states/:state/funfact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunFactResponse {
    /// A randomly chosen fun fact.
    pub funfact: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// Raw message of a server-side failure, attached to the response
/// extensions so the request logger can record it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerFailure(pub String);

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
    /// Unmasked failure message for server errors.
    pub failure: Option<ServerFailure>,
}

impl ApiErrorResponse {
    /// Builds a response with an explicit status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self {
            status,
            error,
            failure: None,
        }
    }

    /// Maps an error using the configured response policy.
    ///
    /// The policy picks the status for unknown state codes and decides
    /// whether raw storage messages reach the client.
    pub fn from_error(error: StatesError, policy: &ResponseSettings) -> Self {
        let is_state_not_found = matches!(error, StatesError::StateNotFound { .. });
        let mut response = Self::from(error);

        if is_state_not_found {
            response.status = match policy.invalid_state_status {
                InvalidStateStatus::BadRequest => StatusCode::BAD_REQUEST,
                InvalidStateStatus::NotFound => StatusCode::NOT_FOUND,
            };
        }
        if !policy.expose_storage_errors && response.status.is_server_error() {
            response.error.details = None;
        }
        response
    }

    /// Overrides the status code.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.error)).into_response();
        if let Some(failure) = self.failure {
            response.extensions_mut().insert(failure);
        }
        response
    }
}

impl From<StatesError> for ApiErrorResponse {
    fn from(error: StatesError) -> Self {
        let message = error.to_string();
        match error {
            StatesError::ConfigNotFound { .. }
            | StatesError::ConfigParseError { .. }
            | StatesError::DatasetError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message.clone()),
                failure: Some(ServerFailure(message)),
            },
            StatesError::StateNotFound { code } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "INVALID_STATE",
                    "Invalid state abbreviation parameter",
                    format!("'{}' is not a valid state abbreviation", code),
                ),
            ),
            StatesError::Validation { message } => {
                ApiErrorResponse::new(StatusCode::BAD_REQUEST, ApiError::validation_error(message))
            }
            StatesError::NoFunFacts { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("NO_FUN_FACTS", message),
            ),
            StatesError::FactIndexOutOfRange { index, .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "FACT_INDEX_OUT_OF_RANGE",
                    message,
                    format!("index {} does not address a stored fun fact", index),
                ),
            ),
            StatesError::Storage { message: raw } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORAGE_ERROR", "Storage failure", raw.clone()),
                failure: Some(ServerFailure(raw)),
            },
        }
    }
}
