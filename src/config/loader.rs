//! Configuration loading functionality.
//!
//! This module provides the [`SettingsLoader`] type for reading settings
//! from a YAML file and applying environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StatesError, StatesResult};

use super::types::{Settings, StorageBackend};

/// Loads settings from YAML and the environment.
///
/// # Example
///
/// ```
/// use states_api::config::SettingsLoader;
///
/// let settings = SettingsLoader::default()
///     .with_env(|key| (key == "PORT").then(|| "9000".to_string()))
///     .unwrap()
///     .into_settings();
/// assert_eq!(settings.server.port, 9000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    settings: Settings,
}

impl SettingsLoader {
    /// Loads settings from a YAML file.
    ///
    /// # Returns
    ///
    /// Returns an error if:
    /// - The file does not exist (`ConfigNotFound`)
    /// - The file is not valid YAML for [`Settings`] (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> StatesResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| StatesError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let settings = serde_yaml::from_str(&content).map_err(|e| StatesError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })?;

        Ok(Self { settings })
    }

    /// Like [`SettingsLoader::load`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> StatesResult<Self> {
        match Self::load(path) {
            Err(StatesError::ConfigNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`; tests pass a
    /// closure over a fixed map instead.
    pub fn with_env<F>(mut self, lookup: F) -> StatesResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = &mut self.settings;

        if let Some(port) = lookup("PORT") {
            settings.server.port = port.trim().parse().map_err(|_| env_error("PORT", &port))?;
        }
        if let Some(host) = lookup("HOST") {
            settings.server.host = host;
        }
        if let Some(url) = lookup("DATABASE_URI") {
            settings.storage.database_url = url;
        }
        if let Some(backend) = lookup("STORAGE_BACKEND") {
            settings.storage.backend = match backend.trim().to_ascii_lowercase().as_str() {
                "memory" => StorageBackend::Memory,
                "sqlite" => StorageBackend::Sqlite,
                _ => return Err(env_error("STORAGE_BACKEND", &backend)),
            };
        }
        if let Some(path) = lookup("STATES_DATA") {
            settings.data.states_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("LOG_DIR") {
            settings.logging.log_dir = (!dir.is_empty()).then(|| PathBuf::from(dir));
        }

        Ok(self)
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Consumes the loader, returning the settings.
    pub fn into_settings(self) -> Settings {
        self.settings
    }
}

fn env_error(key: &str, value: &str) -> StatesError {
    StatesError::ConfigParseError {
        path: key.to_string(),
        message: format!("invalid value '{value}'"),
    }
}
