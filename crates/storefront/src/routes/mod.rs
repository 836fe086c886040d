//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (hero + featured grid)
//! GET  /index.html             - Home page
//! GET  /shop                   - Full product grid
//! GET  /product?id=...         - Product detail
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (catalog loaded)
//! ```
//!
//! The cart lives in the browser's local storage; there are no cart routes.

pub mod health;
pub mod home;
pub mod page;
pub mod products;
pub mod shop;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the health check routes.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

/// Create all page routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        .route("/index.html", get(home::home))
        // Catalog pages
        .route("/shop", get(shop::shop))
        .route("/product", get(products::show))
}
