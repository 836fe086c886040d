//! Home page route handler.

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

// =============================================================================
// Hero Configuration (Static content for the video block)
// =============================================================================

/// Hero video block configuration.
#[derive(Clone)]
pub struct HeroConfig {
    pub eyebrow: String,
    pub title: String,
    pub subtitle: String,
    pub cta_text: String,
    pub cta_url: String,
    /// Muted background loop.
    pub loop_src: String,
    pub poster: String,
    /// Full-resolution video for the modal, appended on first open.
    pub full_src: String,
}

impl HeroConfig {
    fn new(full_src: &str) -> Self {
        Self {
            eyebrow: "VAST Performance".to_string(),
            title: "Built for the long run".to_string(),
            subtitle: "Footwear and apparel engineered for speed, comfort, and every mile after."
                .to_string(),
            cta_text: "Shop the collection".to_string(),
            cta_url: "/shop".to_string(),
            loop_src: "/static/video/hero-loop-720.mp4".to_string(),
            poster: "/static/images/hero-poster.jpg".to_string(),
            full_src: full_src.to_string(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    pub hero: HeroConfig,
    /// Pre-rendered featured grid.
    pub featured_grid: String,
}

/// Display the home page.
///
/// Waits a bounded time for the catalog before rendering the featured grid.
#[instrument(skip(state, nonce))]
pub async fn home(
    State(state): State<AppState>,
    nonce: CspNonce,
    uri: Uri,
) -> Result<impl IntoResponse> {
    let catalog = state
        .catalog()
        .wait_available(state.config().catalog_timeout)
        .await;

    let featured_grid = render_grid(catalog.as_deref(), GridSection::Featured)?;
    let page = PageContext::new(&state, uri.path(), "VAST", &nonce, catalog.as_deref())?;

    Ok(HomeTemplate {
        page,
        hero: HeroConfig::new(&state.config().full_video_src),
        featured_grid,
    })
}
