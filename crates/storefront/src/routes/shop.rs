//! Shop page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, http::Uri, response::IntoResponse};
use tracing::instrument;
use vast_core::grid::GridSection;

use super::page::{PageContext, render_grid};
use crate::error::Result;
use crate::filters;
use crate::middleware::CspNonce;
use crate::state::AppState;

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop.html")]
pub struct ShopTemplate {
    pub page: PageContext,
    /// Pre-rendered grid of every catalog product.
    pub shop_grid: String,
}

/// Display the full product listing.
#[instrument(skip(state, nonce))]
pub async fn shop(
    State(state): State<AppState>,
    nonce: CspNonce,
    uri: Uri,
) -> Result<impl IntoResponse> {
    let catalog = state
        .catalog()
        .wait_available(state.config().catalog_timeout)
        .await;

    let shop_grid = render_grid(catalog.as_deref(), GridSection::Shop)?;
    let page = PageContext::new(&state, uri.path(), "Shop | VAST", &nonce, catalog.as_deref())?;

    Ok(ShopTemplate { page, shop_grid })
}
