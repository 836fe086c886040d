//! Product details route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::Uri,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;
use vast_core::Product;

use super::page::PageContext;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CspNonce;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub images: Vec<ImageView>,
    pub variants: Vec<VariantView>,
}

/// Image display data for templates.
#[derive(Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

/// Variant display data for templates.
#[derive(Clone)]
pub struct VariantView {
    pub sku: String,
    pub label: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price: product.unit_price().display(),
            images: product
                .images
                .iter()
                .filter(|url| !url.is_empty())
                .map(|url| ImageView {
                    url: url.clone(),
                    alt: product.title.clone(),
                })
                .collect(),
            variants: product
                .variants
                .iter()
                .map(|variant| VariantView {
                    sku: variant.sku.to_string(),
                    label: variant
                        .options_label()
                        .unwrap_or_else(|| variant.sku.to_string()),
                })
                .collect(),
        }
    }
}

/// Query parameters for the details page.
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub id: Option<String>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "product.html")]
pub struct ProductShowTemplate {
    pub page: PageContext,
    pub product: ProductView,
}

/// Display product detail page.
///
/// Unknown or missing identifiers are a 404; a catalog that never became
/// available is a 503.
#[instrument(skip(state, nonce))]
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
    nonce: CspNonce,
    uri: Uri,
) -> Result<impl IntoResponse> {
    let id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::NotFound("product".to_string()))?;

    let catalog = state
        .catalog()
        .wait_available(state.config().catalog_timeout)
        .await
        .ok_or(AppError::CatalogUnavailable)?;

    let product = catalog
        .find(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    add_breadcrumb("navigation", "Viewed product page", Some(&[("product_id", id.as_str())]));

    let page = PageContext::new(
        &state,
        uri.path(),
        format!("{} | VAST", product.title),
        &nonce,
        Some(&*catalog),
    )?;

    Ok(ProductShowTemplate {
        page,
        product: ProductView::from(product),
    })
}
