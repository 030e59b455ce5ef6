//! Persisted key-value configuration
//!
//! A flat JSON object on disk, e.g. `{"baseUrl": "...", "apiKey": "..."}`.
//! The file is created on the first `set` and never deleted.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::infrastructure::traits::FileSystem;

/// Keys understood by the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    BaseUrl,
    ApiKey,
    TimeoutSecs,
}

impl ConfigKey {
    /// Key as stored in the JSON file.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::BaseUrl => "baseUrl",
            ConfigKey::ApiKey => "apiKey",
            ConfigKey::TimeoutSecs => "timeoutSecs",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads and writes the configuration file.
pub struct ConfigStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored entries. A missing file is an empty configuration.
    pub fn get_all(&self) -> ApplicationResult<Map<String, Value>> {
        if !self.fs.exists(&self.path) {
            debug!("no config file at {}", self.path.display());
            return Ok(Map::new());
        }
        let content = self
            .fs
            .read_to_string(&self.path)
            .with_path_context("read config", &self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(ApplicationError::config(format!(
                "{}: expected a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(ApplicationError::config(format!(
                "parse {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Stored value for `key`; numbers and booleans are returned as text.
    pub fn get(&self, key: ConfigKey) -> ApplicationResult<Option<String>> {
        let all = self.get_all()?;
        Ok(match all.get(key.as_str()) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        })
    }

    /// Store `value` under `key`, creating the file and its directory if needed.
    pub fn set(&self, key: ConfigKey, value: &str) -> ApplicationResult<()> {
        let mut all = self.get_all()?;
        all.insert(key.as_str().to_string(), Value::String(value.to_string()));

        let content = serde_json::to_string_pretty(&Value::Object(all))
            .map_err(|e| ApplicationError::config(format!("serialize config: {}", e)))?;
        self.fs
            .ensure_parent(&self.path)
            .with_path_context("create config directory", &self.path)?;
        self.fs
            .write(&self.path, &format!("{}\n", content))
            .with_path_context("write config", &self.path)?;
        debug!("set {} in {}", key, self.path.display());
        Ok(())
    }

    /// True once an API key has been stored.
    pub fn is_configured(&self) -> ApplicationResult<bool> {
        Ok(self
            .get(ConfigKey::ApiKey)?
            .is_some_and(|key| !key.is_empty()))
    }
}
