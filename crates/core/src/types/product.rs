//! Product records as supplied by the catalog loader.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ProductId, Sku};
use super::price::{CurrencyCode, Price};

/// A product in the catalog.
///
/// Immutable after load. The JSON shape matches the catalog fixture:
///
/// ```json
/// {
///   "id": "vst-001",
///   "title": "VAST Runner Elite",
///   "category": "shoes",
///   "price": 149.00,
///   "currency": "USD",
///   "description": "Lightweight running shoe...",
///   "images": ["images/shoe-1.jpg"],
///   "variants": [{ "sku": "VST-R-001", "size": "9", "color": "Black" }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    pub title: String,
    /// Category tag (e.g., "shoes", "apparel").
    pub category: String,
    /// Non-negative unit price.
    pub price: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub description: String,
    /// Ordered image paths; the first one is the card image.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Unit price with the product's currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::new(self.price, self.currency)
    }

    /// First non-empty image path, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(String::as_str)
            .filter(|path| !path.is_empty())
    }
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub sku: Sku,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Variant {
    /// Human-readable option summary, e.g. "10 / White".
    #[must_use]
    pub fn options_label(&self) -> Option<String> {
        match (&self.size, &self.color) {
            (Some(size), Some(color)) => Some(format!("{size} / {color}")),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }
}
