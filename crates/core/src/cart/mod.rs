//! Shopping cart state.
//!
//! The cart is an ordered sequence of [`CartLine`]s, persisted as a whole
//! through a [`KeyValueStore`] under [`CART_STORAGE_KEY`]. Insertion order is
//! first-added order.
//!
//! # Invariants
//!
//! - Each product identifier appears at most once
//! - Every quantity is at least 1

mod storage;
mod store;

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

pub use storage::{KeyValueStore, MemoryStorage, StorageError};
pub use store::{CartError, CartStore};

/// Storage key holding the JSON-encoded cart.
pub const CART_STORAGE_KEY: &str = "vast_cart_v1";

/// A product identifier with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub qty: u32,
}

/// The full cart, serialized as a JSON array of `{id, qty}` records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from raw lines, restoring the invariants.
    ///
    /// Lines with a zero quantity are dropped and repeated identifiers are
    /// merged into the first occurrence.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::empty();
        for line in lines.into_iter().filter(|line| line.qty > 0) {
            match cart.lines.iter_mut().find(|l| l.id == line.id) {
                Some(existing) => existing.qty = existing.qty.saturating_add(line.qty),
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Decode a persisted cart.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the text is not an array of `{id, qty}` records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let lines: Vec<CartLine> = serde_json::from_str(json)?;
        Ok(Self::from_lines(lines))
    }

    /// Encode the full cart for persistence.
    #[must_use]
    pub fn to_json(&self) -> String {
        // A Vec of plain structs with string keys cannot fail to serialize
        serde_json::to_string(&self.lines).unwrap_or_else(|_| "[]".to_string())
    }

    /// Increment the line for `id`, or append it with quantity 1.
    pub fn add(&mut self, id: &ProductId) {
        match self.lines.iter_mut().find(|line| &line.id == id) {
            Some(line) => line.qty = line.qty.saturating_add(1),
            None => self.lines.push(CartLine {
                id: id.clone(),
                qty: 1,
            }),
        }
    }

    /// Quantity of `id` in the cart (0 if absent).
    #[must_use]
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.lines
            .iter()
            .find(|line| line.id.as_str() == id)
            .map_or(0, |line| line.qty)
    }

    /// Total number of items: the sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |sum, line| sum.saturating_add(line.qty))
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_add_appends_then_increments() {
        let mut cart = Cart::empty();
        cart.add(&id("a"));
        cart.add(&id("b"));
        cart.add(&id("a"));

        assert_eq!(
            cart.lines(),
            &[
                CartLine { id: id("a"), qty: 2 },
                CartLine { id: id("b"), qty: 1 },
            ]
        );
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_quantity_equals_number_of_adds() {
        let sequence = ["a", "b", "a", "c", "a", "b"];
        let mut cart = Cart::empty();
        for s in sequence {
            cart.add(&id(s));
        }
        for s in ["a", "b", "c"] {
            let expected = sequence.iter().filter(|x| **x == s).count();
            assert_eq!(cart.quantity_of(s) as usize, expected);
        }
        assert_eq!(cart.lines().len(), 3);
        assert_eq!(cart.quantity_of("d"), 0);
    }

    #[test]
    fn test_json_format() {
        let mut cart = Cart::empty();
        cart.add(&id("vst-001"));
        assert_eq!(cart.to_json(), r#"[{"id":"vst-001","qty":1}]"#);
    }

    #[test]
    fn test_from_json_restores_invariants() {
        let cart =
            Cart::from_json(r#"[{"id":"a","qty":2},{"id":"b","qty":0},{"id":"a","qty":1}]"#)
                .unwrap();
        assert_eq!(cart.lines(), &[CartLine { id: id("a"), qty: 3 }]);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Cart::from_json("definitely not json").is_err());
        assert!(Cart::from_json(r#"{"id":"a"}"#).is_err());
        assert!(Cart::from_json(r#"[{"id":"a","qty":-1}]"#).is_err());
    }
}
