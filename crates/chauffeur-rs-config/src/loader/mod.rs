//! Config loading: JSON5 file first, environment overlay on top.

pub mod env;


use crate::{ChauffeurConfig, ConfigError};
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::Path;

impl ChauffeurConfig {
    /// Load a config from a JSON5 file (no environment overlay).
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        info!("loading config from path: {}", path.as_ref().display());
        let contents = fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }

    /// Load a config from JSON5 contents (no environment overlay).
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        let config: ChauffeurConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the optional file at `path` and overlay the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::default(),
        };
        let config = base.with_env(|key| std::env::var(key).ok());
        config.validate()?;
        info!(
            "config loaded (file={}, table={})",
            path.is_some(),
            config.store.table
        );
        Ok(config)
    }

    /// Overlay values from `lookup`, which maps variable names to values.
    ///
    /// Empty values are treated as unset.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        env::apply(&mut self, lookup);
        self
    }

    /// Validate invariants serde cannot express.
    ///
    /// Missing credentials are not an error here; they are reported by the
    /// component that needs them so unrelated routes keep working.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.socket_addr()?;
        if self.store.table.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                path: "store.table".to_string(),
                message: "table name cannot be empty".to_string(),
            });
        }
        if let Some(field) = self
            .store
            .fingerprint_field
            .as_deref()
            .filter(|field| field.contains(['{', '}']))
        {
            return Err(ConfigError::InvalidField {
                path: "store.fingerprint_field".to_string(),
                message: format!("column name cannot contain braces, got {field:?}"),
            });
        }
        for (path, url) in [
            ("store.api_url", &self.store.api_url),
            ("mail.api_url", &self.mail.api_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidField {
                    path: path.to_string(),
                    message: format!("expected an http(s) url, got {url:?}"),
                });
            }
        }
        Ok(())
    }
}
