//! Configuration loading and management for the states API.
//!
//! Settings come from an optional YAML file and are then overridden by
//! environment variables (`PORT`, `HOST`, `DATABASE_URI`, `STATES_DATA`,
//! `LOG_DIR`, `STORAGE_BACKEND`).
//!
//! # Example
//!
//! ```no_run
//! use states_api::config::SettingsLoader;
//!
//! let settings = SettingsLoader::load_or_default("./config/server.yaml")
//!     .and_then(|loader| loader.with_env(|key| std::env::var(key).ok()))
//!     .unwrap()
//!     .into_settings();
//! println!("Listening on port {}", settings.server.port);
//! ```

mod loader;
mod types;

pub use loader::SettingsLoader;
pub use types::{
    DataSettings, InvalidStateStatus, LogFormat, LoggingSettings, ResponseSettings,
    ServerSettings, Settings, StorageBackend, StorageSettings,
};
