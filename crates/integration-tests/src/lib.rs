//! Integration tests for the VAST storefront.
//!
//! Requests are driven through the full router (middleware included) with
//! `tower::ServiceExt::oneshot`, so no server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vast-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `pages` - Home, shop, and product pages
//! - `health` - Liveness and readiness
//! - `security_headers` - CSP, request ids, and isolation headers

use std::path::Path;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use tower::ServiceExt;
use vast_core::Catalog;
use vast_storefront::catalog::CatalogStore;
use vast_storefront::config::StorefrontConfig;
use vast_storefront::state::AppState;

/// Six products, `p1` to `p6`, priced 10 to 60.
///
/// # Panics
///
/// Panics if the fixture is invalid.
#[must_use]
pub fn six_product_catalog() -> Catalog {
    let products: Vec<serde_json::Value> = (1..=6)
        .map(|i| {
            serde_json::json!({
                "id": format!("p{i}"),
                "title": format!("Product {i}"),
                "category": "test",
                "price": i * 10,
                "description": format!("Description {i}"),
                "images": [format!("/static/images/p{i}.jpg")],
                "variants": [{ "sku": format!("SKU-{i}"), "size": "M", "color": "Black" }],
            })
        })
        .collect();
    Catalog::from_json(&serde_json::Value::Array(products).to_string())
        .expect("fixture catalog is valid")
}

/// Router wired the way the binary wires it, minus Sentry.
pub struct TestContext {
    pub store: CatalogStore,
    pub app: Router,
}

impl TestContext {
    /// A storefront whose catalog is already available.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self::new(CatalogStore::with_catalog(catalog))
    }

    /// A storefront whose catalog never arrives unless published.
    #[must_use]
    pub fn without_catalog() -> Self {
        Self::new(CatalogStore::new())
    }

    /// # Panics
    ///
    /// Panics if the application state cannot be built.
    #[must_use]
    pub fn new(store: CatalogStore) -> Self {
        let config = StorefrontConfig {
            catalog_timeout: Duration::from_millis(200),
            ..StorefrontConfig::default()
        };
        let static_dir = config.static_dir.clone();
        let state = AppState::new(config, store.clone()).expect("state builds");
        Self {
            store,
            app: vast_storefront::app(state, Path::new(&static_dir)),
        }
    }

    /// Send a GET request and collect the response.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.get_with_headers(uri, &[]).await
    }

    /// Send a GET request carrying extra headers.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn get_with_headers(&self, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::builder().uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(Body::empty()).expect("request builds");
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// A collected response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Number of occurrences of `needle` in the body.
    #[must_use]
    pub fn count(&self, needle: &str) -> usize {
        self.body.matches(needle).count()
    }

    /// A header value as text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
