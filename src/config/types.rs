//! Configuration types for the states API.
//!
//! Every section and field has a default, so an empty YAML document is a
//! valid configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Listener settings.
    pub server: ServerSettings,
    /// Fact store settings.
    pub storage: StorageSettings,
    /// Static dataset settings.
    pub data: DataSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Error response policy.
    pub responses: ResponseSettings,
}

/// Listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3500,
        }
    }
}

/// Which fact store implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Volatile, process-local store.
    Memory,
    /// SQLite database file.
    Sqlite,
}

/// Fact store settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// The backend.
    pub backend: StorageBackend,
    /// Database location for the SQLite backend (a file path or `:memory:`).
    pub database_url: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            database_url: "states.db".to_string(),
        }
    }
}

/// Static dataset settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Path of the states JSON file.
    pub states_path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            states_path: PathBuf::from("data/states.json"),
        }
    }
}

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Subscriber output format.
    pub format: LogFormat,
    /// Default `EnvFilter` directive, used when `RUST_LOG` is unset.
    pub filter: String,
    /// Directory for request, fun-fact and error log files. `None` disables them.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: "info,states_api=debug".to_string(),
            log_dir: Some(PathBuf::from("logs")),
        }
    }
}

/// HTTP status used when a path names an unknown state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidStateStatus {
    /// 400 Bad Request.
    BadRequest,
    /// 404 Not Found.
    #[default]
    NotFound,
}

/// Error response policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResponseSettings {
    /// Status for unknown state codes.
    pub invalid_state_status: InvalidStateStatus,
    /// Whether raw storage error messages are returned to clients.
    pub expose_storage_errors: bool,
}

impl Default for ResponseSettings {
    fn default() -> Self {
        Self {
            invalid_state_status: InvalidStateStatus::NotFound,
            expose_storage_errors: true,
        }
    }
}
