//! Config schema, loading, and environment overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub notify: NotifyConfig,
    pub logging: LoggingConfig,
}

/// Addresses the notification side effects use. Delivery itself is the
/// notifier backend's problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// From-address stamped on every outbound notification.
    pub from_address: String,
    /// Operations inbox notified when a lead is created.
    pub ops_recipients: Vec<String>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            from_address: "no-reply@prospect.local".to_string(),
            ops_recipients: vec!["ops@prospect.local".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing EnvFilter directive, e.g. "info" or "prospect_rs=debug".
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl Config {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| Error::Config(format!("failed to parse config: {e}")))
    }

    /// Load from a TOML file; a missing file yields defaults. Environment
    /// overrides are applied on top of whatever was loaded.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
            Self::from_toml_str(&contents)?
        } else {
            Self::default()
        };
        apply_env_overrides(&mut config);
        Ok(config)
    }

    /// `load`, falling back to defaults (with a warning) on any error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("config load failed, using defaults: {e}");
                let mut config = Self::default();
                apply_env_overrides(&mut config);
                config
            }
        }
    }
}

/// Environment variables win over file layers.
pub fn apply_env_overrides(config: &mut Config) {
    if let Ok(filter) = std::env::var("PROSPECT_LOG") {
        if filter.trim().is_empty() {
            tracing::warn!("empty PROSPECT_LOG, ignoring");
        } else {
            config.logging.filter = filter;
        }
    }
    if let Ok(from) = std::env::var("PROSPECT_NOTIFY_FROM") {
        if from.trim().is_empty() {
            tracing::warn!("empty PROSPECT_NOTIFY_FROM, ignoring");
        } else {
            config.notify.from_address = from;
        }
    }
}
