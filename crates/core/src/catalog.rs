//! The product catalog.
//!
//! An ordered, read-only sequence of products supplied once by a loader.
//! Views only ever borrow from it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Product, ProductId};

/// Number of products shown in the "featured" grid.
pub const FEATURED_LIMIT: usize = 4;

/// Errors that can occur when building a [`Catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two products share the same identifier.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    /// A product has a price below zero.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
    /// The catalog source is not valid JSON.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered product catalog with unique identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, validating id uniqueness and price sign.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` or `CatalogError::NegativePrice`.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if product.price.is_sign_negative() && !product.price.is_zero() {
                return Err(CatalogError::NegativePrice(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of product records.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The first [`FEATURED_LIMIT`] products in catalog order.
    #[must_use]
    pub fn featured(&self) -> &[Product] {
        let end = self.products.len().min(FEATURED_LIMIT);
        self.products.get(..end).unwrap_or_default()
    }

    /// Look up a product by identifier.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl TryFrom<Vec<Product>> for Catalog {
    type Error = CatalogError;

    fn try_from(products: Vec<Product>) -> Result<Self, Self::Error> {
        Self::new(products)
    }
}

impl From<Catalog> for Vec<Product> {
    fn from(catalog: Catalog) -> Self {
        catalog.products
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::fixtures::{product, six_products};
    use super::*;

    #[test]
    fn test_featured_is_first_four_in_order() {
        let catalog = six_products();
        let ids: Vec<&str> = catalog.featured().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3", "p4"]);
    }

    #[test]
    fn test_featured_with_fewer_products() {
        let catalog = Catalog::new(vec![product("a", Decimal::ONE)]).unwrap();
        assert_eq!(catalog.featured().len(), 1);
        assert!(Catalog::default().featured().is_empty());
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let result = Catalog::new(vec![
            product("a", Decimal::ONE),
            product("a", Decimal::TWO),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id.as_str() == "a"));
    }

    #[test]
    fn test_rejects_negative_price() {
        let result = Catalog::new(vec![product("a", Decimal::NEGATIVE_ONE)]);
        assert!(matches!(result, Err(CatalogError::NegativePrice(_))));
    }

    #[test]
    fn test_find() {
        let catalog = six_products();
        assert_eq!(catalog.find("p3").unwrap().price, Decimal::new(30, 0));
        assert!(catalog.find("missing").is_none());
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            Catalog::from_json("not json"),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"[
            {"id": "a", "title": "A", "category": "x", "price": 1},
            {"id": "a", "title": "B", "category": "x", "price": 2}
        ]"#;
        assert!(serde_json::from_str::<Catalog>(json).is_err());
    }
}
