//! Persisted cart store.

use thiserror::Error;

use super::storage::{KeyValueStore, StorageError};
use super::{CART_STORAGE_KEY, Cart};
use crate::types::ProductId;

/// Errors that can occur when mutating the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// The updated cart could not be written back.
    #[error("failed to persist cart: {0}")]
    Storage(#[from] StorageError),
}

/// Cart store over a text key-value backend.
///
/// Every read goes to storage, so two stores sharing a backend (or another
/// browser tab) always observe the latest persisted cart.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store using the default [`CART_STORAGE_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CART_STORAGE_KEY)
    }

    /// Create a store using a custom storage key.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Read the persisted cart.
    ///
    /// A missing key, an unreadable backend or malformed content all yield an
    /// empty cart. This never fails.
    pub fn load(&self) -> Cart {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::empty(),
            Err(e) => {
                tracing::warn!(key = %self.key, "Cart storage unreadable: {e}");
                return Cart::empty();
            }
        };

        Cart::from_json(&raw).unwrap_or_else(|e| {
            tracing::warn!(key = %self.key, "Discarding malformed cart data: {e}");
            Cart::empty()
        })
    }

    /// Add one unit of `id`: load, increment or append, write back.
    ///
    /// Returns the cart as persisted.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the backend rejects the write.
    pub fn add(&self, id: &ProductId) -> Result<Cart, CartError> {
        let mut cart = self.load();
        cart.add(id);
        self.storage.set_item(&self.key, &cart.to_json())?;
        tracing::debug!(product_id = %id, items = cart.item_count(), "Added to cart");
        Ok(cart)
    }

    /// Sum of quantities in the persisted cart.
    pub fn item_count(&self) -> u32 {
        self.load().item_count()
    }

    /// The storage key this store reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}
