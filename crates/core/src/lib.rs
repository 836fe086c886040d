//! VAST Core - Shared domain library.
//!
//! This crate provides the storefront's behavior as plain data and pure
//! state transitions, used by both components:
//! - `storefront` - Server that renders the HTML documents and product grids
//! - `web` - Browser bindings compiled to WebAssembly
//!
//! # Architecture
//!
//! The core crate contains no DOM or HTTP code. Everything the browser does is
//! expressed here as a state machine returning effects, or as an algorithm
//! driven through a small trait (storage, layout measurement), so it can be
//! unit tested without a browser.
//!
//! # Modules
//!
//! - [`types`] - Product records, type-safe IDs and prices
//! - [`catalog`] - The ordered, read-only product catalog
//! - [`cart`] - Cart lines and the persisted cart store
//! - [`checkout`] - Subtotal, shipping, and total computation
//! - [`minicart`] - Mini-cart view model and panel visibility
//! - [`grid`] - Product card builder for grid containers
//! - [`hero`] - Hero media controller state machine
//! - [`fit`] - Headline font-size fit routine
//! - [`nav`] - Main navigation highlighting
//! - [`scroll`] - Page scroll suppression shared by overlays
//! - [`settings`] - Settings shared with the browser bundle

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod fit;
pub mod grid;
pub mod hero;
pub mod minicart;
pub mod nav;
pub mod scroll;
pub mod settings;
pub mod types;

pub use cart::{CART_STORAGE_KEY, Cart, CartError, CartLine, CartStore};
pub use catalog::{Catalog, CatalogError};
pub use checkout::{ShippingPolicy, Totals};
pub use settings::ClientSettings;
pub use types::*;
