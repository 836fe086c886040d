//! Catalog availability.
//!
//! The catalog is loaded in the background after the server starts. Pages
//! that render product grids wait for it through [`CatalogStore`], which
//! publishes availability through a `tokio::sync::watch` channel. A wait is
//! bounded by a timeout, after which the page renders the unavailable
//! placeholder instead.

mod loader;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use vast_core::Catalog;

pub use loader::{LoadError, load_from_path, spawn_load};

/// Shared handle to the catalog, once it is available.
#[derive(Clone, Debug)]
pub struct CatalogStore {
    tx: Arc<watch::Sender<Option<Arc<Catalog>>>>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// An empty store. Waiters block until [`publish`](Self::publish) is
    /// called or their timeout elapses.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// A store that is available immediately.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        let store = Self::new();
        store.publish(catalog);
        store
    }

    /// Make a catalog available and wake every waiter.
    pub fn publish(&self, catalog: Catalog) {
        self.tx.send_replace(Some(Arc::new(catalog)));
    }

    /// The catalog, if it has been published.
    #[must_use]
    pub fn current(&self) -> Option<Arc<Catalog>> {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Wait up to `timeout` for the catalog.
    ///
    /// Returns immediately when it is already available. Returns `None` if
    /// the timeout elapses first.
    pub async fn wait_available(&self, timeout: Duration) -> Option<Arc<Catalog>> {
        let mut rx = self.tx.subscribe();
        let result = match tokio::time::timeout(timeout, rx.wait_for(Option::is_some)).await {
            Ok(Ok(catalog)) => catalog.clone(),
            Ok(Err(_)) => None,
            Err(_) => {
                tracing::warn!(
                    timeout_ms = timeout.as_millis(),
                    "Catalog not available before timeout"
                );
                None
            }
        };
        result
    }
}
