//! Product grid content.
//!
//! Cards are built as plain structs and handed to a template, so no markup
//! is assembled by string concatenation.

use crate::catalog::Catalog;
use crate::types::Product;

/// Placeholder shown when the catalog never became available or is empty.
pub const NO_PRODUCTS_MESSAGE: &str = "No products available.";

/// Which grid container is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSection {
    /// Home page teaser: the first four catalog entries.
    Featured,
    /// The full shop listing.
    Shop,
}

impl GridSection {
    /// DOM id of the container element.
    #[must_use]
    pub const fn container_id(self) -> &'static str {
        match self {
            Self::Featured => "featuredGrid",
            Self::Shop => "shopGrid",
        }
    }

    fn products(self, catalog: &Catalog) -> &[Product] {
        match self {
            Self::Featured => catalog.featured(),
            Self::Shop => catalog.products(),
        }
    }
}

/// Card image with its alt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardImage {
    pub src: String,
    pub alt: String,
}

/// A single product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    /// Product identifier, carried by the add-to-cart control.
    pub id: String,
    pub title: String,
    /// Formatted price, e.g. "$149.00".
    pub price: String,
    pub description: String,
    pub image: Option<CardImage>,
    /// Link to the product details page.
    pub details_href: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: product.unit_price().display(),
            description: product.description.clone(),
            image: product.primary_image().map(|src| CardImage {
                src: src.to_string(),
                alt: product.title.clone(),
            }),
            details_href: details_href(product.id.as_str()),
        }
    }
}

/// Details page URL for a product identifier.
#[must_use]
pub fn details_href(id: &str) -> String {
    format!("/product?id={}", urlencoding::encode(id))
}

/// What a grid container shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridContent {
    Cards(Vec<ProductCard>),
    /// Render [`NO_PRODUCTS_MESSAGE`] instead of cards.
    Unavailable,
}

impl GridContent {
    /// Build the content of `section` from a catalog that may not have arrived.
    #[must_use]
    pub fn build(catalog: Option<&Catalog>, section: GridSection) -> Self {
        match catalog {
            Some(catalog) if !catalog.is_empty() => Self::Cards(
                section
                    .products(catalog)
                    .iter()
                    .map(ProductCard::from)
                    .collect(),
            ),
            _ => Self::Unavailable,
        }
    }

    /// Cards to render; empty when unavailable.
    #[must_use]
    pub fn cards(&self) -> &[ProductCard] {
        match self {
            Self::Cards(cards) => cards,
            Self::Unavailable => &[],
        }
    }

    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::fixtures::{product, six_products};

    #[test]
    fn test_featured_renders_first_four() {
        let catalog = six_products();
        let content = GridContent::build(Some(&catalog), GridSection::Featured);
        let ids: Vec<&str> = content.cards().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3", "p4"]);
    }

    #[test]
    fn test_shop_renders_all() {
        let catalog = six_products();
        let content = GridContent::build(Some(&catalog), GridSection::Shop);
        assert_eq!(content.cards().len(), 6);
    }

    #[test]
    fn test_missing_or_empty_catalog_is_unavailable() {
        assert!(GridContent::build(None, GridSection::Shop).is_unavailable());
        assert!(GridContent::build(Some(&Catalog::default()), GridSection::Featured).is_unavailable());
    }

    #[test]
    fn test_card_fields() {
        let card = ProductCard::from(&product("vst 001/x", Decimal::new(14900, 2)));
        assert_eq!(card.price, "$149.00");
        assert_eq!(card.details_href, "/product?id=vst%20001%2Fx");
        assert_eq!(card.image.unwrap().src, "images/vst 001/x.jpg");
    }

    #[test]
    fn test_card_without_image() {
        let mut p = product("a", Decimal::ONE);
        p.images.clear();
        assert!(ProductCard::from(&p).image.is_none());
    }

    #[test]
    fn test_container_ids() {
        assert_eq!(GridSection::Featured.container_id(), "featuredGrid");
        assert_eq!(GridSection::Shop.container_id(), "shopGrid");
    }
}
