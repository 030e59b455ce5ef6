//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `$XDG_CONFIG_HOME/blockchain-cli/config.json` (or `--config`)
//! 3. Environment variables: `BLOCKCHAIN_*` prefix
//!
//! Settings are loaded once at startup and handed to the services; nothing
//! re-reads the file mid-run.

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::application::services::{ConfigKey, ConfigStore};
use crate::application::{ApplicationError, ApplicationResult};

/// Public API host used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://blockchain.info";

/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Placeholder shown instead of a stored API key.
pub const REDACTED: &str = "***";

/// Effective configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// API host, e.g. `https://blockchain.info`
    pub base_url: String,
    /// Stored for the user; not attached to requests.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Get the XDG config directory for the CLI.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "blockchain-cli").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.json"))
}

impl Settings {
    /// Load settings with layered precedence: defaults, then the store, then env vars.
    pub fn load(store: &ConfigStore) -> ApplicationResult<Self> {
        let stored = store.get_all()?;
        let current = Self::default().apply_stored(&stored)?;
        Self::apply_env_overrides(current, env_source())
    }

    /// Overlay entries read from the config file.
    ///
    /// Empty strings count as unset so a blanked key falls back to its default.
    fn apply_stored(mut self, stored: &Map<String, Value>) -> ApplicationResult<Self> {
        if let Some(url) = stored_text(stored, ConfigKey::BaseUrl) {
            self.base_url = url;
        }
        if let Some(key) = stored_text(stored, ConfigKey::ApiKey) {
            self.api_key = Some(key);
        }
        if let Some(secs) = stored_text(stored, ConfigKey::TimeoutSecs) {
            self.timeout_secs = parse_timeout(&secs)?;
        }
        Ok(self)
    }

    /// Apply BLOCKCHAIN_* environment variables as explicit overrides.
    ///
    /// `BLOCKCHAIN_BASE_URL`, `BLOCKCHAIN_API_KEY`, `BLOCKCHAIN_TIMEOUT_SECS`.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("base_url") {
            if !val.is_empty() {
                settings.base_url = val;
            }
        }
        if let Ok(val) = config.get_string("api_key") {
            if !val.is_empty() {
                settings.api_key = Some(val);
            }
        }
        if let Ok(val) = config.get_string("timeout_secs") {
            settings.timeout_secs = parse_timeout(&val)?;
        }

        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Configuration as shown to the user: the API key never appears in clear.
    pub fn redacted(&self) -> Value {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => REDACTED,
            _ => "",
        };
        json!({
            "baseUrl": self.base_url,
            "apiKey": api_key,
            "timeoutSecs": self.timeout_secs,
        })
    }
}

/// `BLOCKCHAIN_<KEY>` variables; keys are flat, so only the prefix needs a separator.
fn env_source() -> Environment {
    Environment::with_prefix("BLOCKCHAIN").prefix_separator("_")
}

fn stored_text(stored: &Map<String, Value>, key: ConfigKey) -> Option<String> {
    match stored.get(key.as_str())? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn parse_timeout(raw: &str) -> ApplicationResult<u64> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ApplicationError::config(format!(
            "timeoutSecs must be a positive integer, got '{}'",
            raw
        ))),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
