//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{ConfigStore, ExplorerClient};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::http::ReqwestHttpClient;
use crate::infrastructure::traits::HttpClient;
use crate::infrastructure::InfraResult;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Settings loaded at startup
    pub settings: Arc<Settings>,

    /// Backing store of `settings`, used by the `config` commands
    pub config_store: ConfigStore,

    /// HTTP transport abstraction
    pub http: Arc<dyn HttpClient>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings, config_store: ConfigStore) -> InfraResult<Self> {
        let http = ReqwestHttpClient::new(settings.timeout())?;
        Ok(Self::with_deps(settings, config_store, Arc::new(http)))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        config_store: ConfigStore,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            config_store,
            http,
        }
    }

    /// API client bound to the configured base URL.
    pub fn explorer(&self) -> ApplicationResult<ExplorerClient> {
        ExplorerClient::new(&self.settings.base_url, Arc::clone(&self.http))
    }
}
