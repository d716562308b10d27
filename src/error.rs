//! Error types for the states API.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the dataset, the fact store and the services can report.

use thiserror::Error;

/// The main error type for the states API.
///
/// All fallible operations return this error type; the HTTP layer maps each
/// variant onto a status code and a JSON error body.
///
/// # Example
///
/// ```
/// use states_api::error::StatesError;
///
/// let error = StatesError::StateNotFound {
///     code: "ZZ".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid state abbreviation parameter: ZZ");
/// ```
#[derive(Debug, Error)]
pub enum StatesError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file or environment value could not be parsed.
    #[error("Failed to parse configuration '{path}': {message}")]
    ConfigParseError {
        /// The file path or environment variable that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The static states dataset could not be loaded.
    #[error("Failed to load states dataset '{path}': {message}")]
    DatasetError {
        /// The path of the dataset file.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// The state code does not match any record in the dataset.
    #[error("Invalid state abbreviation parameter: {code}")]
    StateNotFound {
        /// The (uppercased) code that was requested.
        code: String,
    },

    /// A request body failed validation.
    #[error("{message}")]
    Validation {
        /// The message returned to the client.
        message: String,
    },

    /// The state has no stored fun facts.
    #[error("No Fun Facts found for {state}")]
    NoFunFacts {
        /// The state name.
        state: String,
    },

    /// The 1-based index does not address an existing fun fact.
    #[error("No Fun Fact found at that index for {state}")]
    FactIndexOutOfRange {
        /// The state name.
        state: String,
        /// The 1-based index supplied by the client.
        index: u64,
    },

    /// The fact store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// The raw message from the storage layer.
        message: String,
    },
}

impl StatesError {
    /// Shorthand for a [`StatesError::Validation`] error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`StatesError::Storage`] error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for StatesError {
    fn from(error: rusqlite::Error) -> Self {
        Self::storage(error.to_string())
    }
}

/// A type alias for Results that return StatesError.
pub type StatesResult<T> = Result<T, StatesError>;
