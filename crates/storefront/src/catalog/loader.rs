//! Background catalog loading.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::task::JoinHandle;
use vast_core::{Catalog, CatalogError};

use super::CatalogStore;

/// Errors loading the catalog file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Read and validate a catalog file.
///
/// # Errors
///
/// Returns `LoadError` if the file cannot be read or is not a valid catalog.
pub async fn load_from_path(path: &Path) -> Result<Catalog, LoadError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Catalog::from_json(&json)?)
}

/// Load the catalog in the background and publish it to `store`.
///
/// On failure the store stays unavailable; pages render the unavailable
/// placeholder once their wait times out.
pub fn spawn_load(store: CatalogStore, path: PathBuf) -> JoinHandle<()> {
    tokio::spawn(async move {
        match load_from_path(&path).await {
            Ok(catalog) => {
                tracing::info!(
                    products = catalog.len(),
                    path = %path.display(),
                    "Catalog loaded"
                );
                store.publish(catalog);
            }
            Err(e) => {
                let event_id = sentry::capture_error(&e);
                tracing::error!(
                    error = %e,
                    sentry_event_id = %event_id,
                    "Catalog load failed"
                );
            }
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_file(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("vast-catalog-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_spawn_load_publishes() {
        let path = temp_file(
            r#"[{"id":"vst-001","title":"Runner","category":"shoes","price":149.0},
                {"id":"vst-002","title":"Jacket","category":"apparel","price":"119.00"}]"#,
        );
        let store = CatalogStore::new();
        spawn_load(store.clone(), path.clone()).await.unwrap();

        let catalog = store.current().unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.find("vst-002").is_some());
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_leaves_store_unavailable() {
        let store = CatalogStore::new();
        let path = std::env::temp_dir().join("vast-catalog-does-not-exist.json");
        spawn_load(store.clone(), path).await.unwrap();
        assert!(!store.is_available());
    }

    #[tokio::test]
    async fn test_invalid_catalog_is_rejected() {
        let path = temp_file(
            r#"[{"id":"a","title":"A","category":"x","price":1},
                {"id":"a","title":"B","category":"x","price":2}]"#,
        );
        let err = load_from_path(&path).await.unwrap_err();
        assert!(matches!(err, LoadError::Catalog(CatalogError::DuplicateId(_))));
        std::fs::remove_file(path).unwrap();
    }
}
