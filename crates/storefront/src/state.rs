//! Application state shared across handlers.

use std::sync::Arc;

use vast_core::settings::to_data_island;

use crate::catalog::CatalogStore;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration and the catalog store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogStore,
    settings_island: String,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Store the catalog is (or will be) published to
    ///
    /// # Errors
    ///
    /// Returns an error if the browser settings cannot be serialized.
    pub fn new(config: StorefrontConfig, catalog: CatalogStore) -> Result<Self, serde_json::Error> {
        let settings_island = to_data_island(&config.client_settings())?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                settings_island,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    /// Browser settings, serialized once for every page.
    #[must_use]
    pub fn settings_island(&self) -> &str {
        &self.inner.settings_island
    }
}
