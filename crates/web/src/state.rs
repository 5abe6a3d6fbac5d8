//! Application state shared across handlers.

use std::sync::Arc;

use rolodex_core::StoreError;

use crate::config::RolodexConfig;
use crate::store::YamlStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; gives handlers access to the configuration
/// and the YAML store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RolodexConfig,
    store: YamlStore,
}

impl AppState {
    /// Create a new application state, opening the data directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the data directory cannot be created.
    pub fn new(config: RolodexConfig) -> Result<Self, StoreError> {
        let store = YamlStore::open(&config.data_dir)?;
        Ok(Self {
            inner: Arc::new(AppStateInner { config, store }),
        })
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &RolodexConfig {
        &self.inner.config
    }

    /// Get a reference to the YAML store.
    #[must_use]
    pub fn store(&self) -> &YamlStore {
        &self.inner.store
    }
}
