//! Delegated "add to cart" handling.

use std::rc::Rc;

use gloo::events::EventListener;
use vast_core::{CartStore, ProductId};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

use crate::dom::selectors;
use crate::minicart::MiniCart;
use crate::page::PageData;
use crate::storage::BrowserStorage;

/// Prefix of identifiers generated for controls without a `data-id`.
pub const PLACEHOLDER_PREFIX: &str = "pl-";

const PLACEHOLDER_DIGITS: usize = 6;

/// Listen for clicks on any `.add-to-cart` control, including ones
/// rendered after this call.
pub fn install(document: &Document, data: Rc<PageData>, mini_cart: Option<Rc<MiniCart>>) {
    let Some(body) = document.body() else {
        return;
    };
    let store = CartStore::with_key(
        BrowserStorage::local(),
        data.settings.cart_storage_key.clone(),
    );

    EventListener::new(&body, "click", move |event| {
        let Some(control) = add_to_cart_control(event) else {
            return;
        };
        let id = control
            .get_attribute("data-id")
            .filter(|id| !id.is_empty())
            .map_or_else(|| placeholder_id(js_sys::Math::random()), ProductId::new);

        match store.add(&id) {
            Ok(cart) => log::debug!("Added {id} to cart ({} items)", cart.item_count()),
            Err(e) => log::error!("Failed to add {id} to cart: {e}"),
        }
        if let Some(mini_cart) = &mini_cart {
            mini_cart.render();
        }
    })
    .forget();
}

fn add_to_cart_control(event: &Event) -> Option<Element> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    target.closest(selectors::ADD_TO_CART).ok().flatten()
}

/// Identifier for a control that carries none: the prefix followed by six
/// base-36 digits taken from `fraction`, a value in `[0, 1)`.
#[must_use]
pub fn placeholder_id(fraction: f64) -> ProductId {
    let mut rest = if fraction.is_finite() {
        fraction.fract().abs()
    } else {
        0.0
    };
    let mut id = String::with_capacity(PLACEHOLDER_PREFIX.len() + PLACEHOLDER_DIGITS);
    id.push_str(PLACEHOLDER_PREFIX);
    for _ in 0..PLACEHOLDER_DIGITS {
        rest *= 36.0;
        let digit = rest.floor();
        rest -= digit;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let digit = digit as u32;
        id.push(char::from_digit(digit.min(35), 36).unwrap_or('0'));
    }
    ProductId::new(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_id_shape() {
        for fraction in [0.0, 0.123_456, 0.5, 0.999_999_9] {
            let id = placeholder_id(fraction);
            let suffix = id.as_str().strip_prefix(PLACEHOLDER_PREFIX).unwrap_or_default();
            assert_eq!(suffix.len(), 6);
            assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_placeholder_id_digits() {
        // 0.5 in base 36 is 0.i
        assert_eq!(placeholder_id(0.5).as_str(), "pl-i00000");
        assert_eq!(placeholder_id(0.0).as_str(), "pl-000000");
    }

    #[test]
    fn test_placeholder_id_tolerates_bad_input() {
        assert_eq!(placeholder_id(f64::NAN).as_str(), "pl-000000");
        assert_eq!(placeholder_id(1.5).as_str(), "pl-i00000");
    }
}
