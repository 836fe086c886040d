//! Data the server embeds in every page.

use vast_core::settings::{CATALOG_ISLAND_ID, SETTINGS_ISLAND_ID};
use vast_core::{Catalog, ClientSettings};
use web_sys::Document;

/// Settings and catalog read from the page's JSON data islands.
#[derive(Debug, Clone)]
pub struct PageData {
    pub settings: ClientSettings,
    /// Empty when the island is missing or malformed; cart lines then show
    /// placeholders.
    pub catalog: Catalog,
}

impl PageData {
    /// Read both islands, falling back to defaults.
    #[must_use]
    pub fn read(document: &Document) -> Self {
        let settings = ClientSettings::from_island(island_text(document, SETTINGS_ISLAND_ID).as_deref());
        let catalog = island_text(document, CATALOG_ISLAND_ID)
            .and_then(|json| {
                Catalog::from_json(&json)
                    .map_err(|e| log::warn!("Ignoring malformed catalog data: {e}"))
                    .ok()
            })
            .unwrap_or_default();

        Self { settings, catalog }
    }
}

fn island_text(document: &Document, id: &str) -> Option<String> {
    document.get_element_by_id(id)?.text_content()
}
