//! Settings shared between the server and the browser bundle.
//!
//! The server serializes [`ClientSettings`] into a JSON data island in every
//! page; the browser bundle reads it back, falling back to defaults when the
//! island is missing or malformed.

use serde::{Deserialize, Serialize};

use crate::cart::CART_STORAGE_KEY;
use crate::checkout::ShippingPolicy;
use crate::types::CurrencyCode;

/// Default width below which an open mini-cart suppresses page scrolling.
pub const DEFAULT_MOBILE_BREAKPOINT_PX: u32 = 720;

/// Default full-resolution source for the hero modal.
pub const DEFAULT_FULL_VIDEO_SRC: &str = "/static/video/hero-full-1080.mp4";

/// DOM id of the settings data island.
pub const SETTINGS_ISLAND_ID: &str = "storefrontSettings";

/// DOM id of the catalog data island.
pub const CATALOG_ISLAND_ID: &str = "catalogData";

/// Browser-side settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientSettings {
    pub cart_storage_key: String,
    pub shipping: ShippingPolicy,
    pub mobile_breakpoint_px: u32,
    pub full_video_src: String,
    pub currency: CurrencyCode,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            cart_storage_key: CART_STORAGE_KEY.to_string(),
            shipping: ShippingPolicy::default(),
            mobile_breakpoint_px: DEFAULT_MOBILE_BREAKPOINT_PX,
            full_video_src: DEFAULT_FULL_VIDEO_SRC.to_string(),
            currency: CurrencyCode::default(),
        }
    }
}

impl ClientSettings {
    /// Parse settings from a data island, or use defaults.
    #[must_use]
    pub fn from_island(text: Option<&str>) -> Self {
        text.and_then(|raw| {
            serde_json::from_str(raw)
                .map_err(|e| tracing::warn!("Ignoring malformed storefront settings: {e}"))
                .ok()
        })
        .unwrap_or_default()
    }
}

/// Serialize a value for embedding inside a `<script type="application/json">`
/// element.
///
/// `<`, `>` and `&` are escaped as JSON unicode escapes so the text can never
/// close the script element or be read as markup.
///
/// # Errors
///
/// Returns the serialization error, if any.
pub fn to_data_island<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}
