//! Shared page chrome and the product grid partial.
//!
//! Every full page carries a [`PageContext`]: the navigation with the current
//! page marked, the CSP nonce for the bootstrap script, the empty mini-cart
//! shell, and the two JSON data islands the browser bundle reads on start.

use askama::Template;
use vast_core::grid::{GridContent, GridSection, NO_PRODUCTS_MESSAGE};
use vast_core::minicart::{EMPTY_CART_MESSAGE, MiniCartView};
use vast_core::nav::{NavItem, main_nav};
use vast_core::settings::{CATALOG_ISLAND_ID, SETTINGS_ISLAND_ID, to_data_island};
use vast_core::{Cart, Catalog};

use crate::error::Result;
use crate::middleware::CspNonce;
use crate::state::AppState;

/// Chrome shared by every full page.
pub struct PageContext {
    pub title: String,
    pub nav: Vec<NavItem>,
    pub nonce: String,
    /// Mini-cart as rendered before the browser reads the stored cart.
    pub mini_cart: MiniCartView,
    pub empty_cart_message: &'static str,
    pub settings_island_id: &'static str,
    pub settings_island: String,
    pub catalog_island_id: &'static str,
    /// Catalog JSON, or an empty array when the catalog is unavailable.
    pub catalog_island: String,
}

impl PageContext {
    /// Build the chrome for the page served at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be serialized.
    pub fn new(
        state: &AppState,
        path: &str,
        title: impl Into<String>,
        nonce: &CspNonce,
        catalog: Option<&Catalog>,
    ) -> Result<Self> {
        let config = state.config();
        let catalog_island = match catalog {
            Some(catalog) => to_data_island(catalog)?,
            None => "[]".to_string(),
        };
        let mini_cart = MiniCartView::build(
            &Cart::empty(),
            catalog.unwrap_or(&Catalog::default()),
            &config.shipping,
            config.currency,
        );

        Ok(Self {
            title: title.into(),
            nav: main_nav(path),
            nonce: nonce.value().to_string(),
            mini_cart,
            empty_cart_message: EMPTY_CART_MESSAGE,
            settings_island_id: SETTINGS_ISLAND_ID,
            settings_island: state.settings_island().to_string(),
            catalog_island_id: CATALOG_ISLAND_ID,
            catalog_island,
        })
    }
}

/// A grid container with its cards, or the unavailable placeholder.
#[derive(Template)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate<'a> {
    pub container_id: &'static str,
    pub content: &'a GridContent,
    pub empty_message: &'static str,
}

/// Render the grid for `section` from a catalog that may not have arrived.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_grid(catalog: Option<&Catalog>, section: GridSection) -> Result<String> {
    let content = GridContent::build(catalog, section);
    let html = ProductGridTemplate {
        container_id: section.container_id(),
        content: &content,
        empty_message: NO_PRODUCTS_MESSAGE,
    }
    .render()?;
    Ok(html)
}
