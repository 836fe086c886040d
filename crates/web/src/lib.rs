//! VAST Web - Browser bundle for the storefront.
//!
//! Compiled to WebAssembly and loaded by every page. On DOM ready it reads
//! the page's data islands and wires:
//! - the mini-cart popover and badge ([`minicart`])
//! - delegated "add to cart" clicks ([`cart_actions`])
//! - the hero video controller ([`hero`])
//! - the headline fit routine ([`headline`])
//! - image error fallbacks ([`images`])
//!
//! Each piece operates on whichever elements are present and does nothing
//! when its elements are absent.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart_actions;
pub mod dom;
pub mod headline;
pub mod hero;
pub mod images;
pub mod minicart;
pub mod page;
pub mod storage;

use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;

use crate::page::PageData;

/// Module entry point.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    let Some(document) = dom::document() else {
        return;
    };

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| bootstrap()).forget();
    } else {
        bootstrap();
    }
}

/// Wire every component present on the page.
fn bootstrap() {
    let Some(document) = dom::document() else {
        return;
    };
    let data = Rc::new(PageData::read(&document));

    images::install(&document);

    let mini_cart = minicart::MiniCart::mount(&document, Rc::clone(&data));
    if let Some(mini_cart) = &mini_cart {
        mini_cart.render();
    }
    cart_actions::install(&document, Rc::clone(&data), mini_cart);

    hero::install(&document, &data.settings);
    headline::install(&document);

    log::debug!("Storefront bundle ready: {} products", data.catalog.len());
}
