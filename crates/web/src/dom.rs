//! DOM lookup helpers and the element contract shared with the templates.

use std::cell::Cell;

use vast_core::scroll::{ScrollHolder, ScrollLocks};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Node, Window};

/// Element ids rendered by the storefront templates.
pub mod ids {
    pub const CART_TOGGLE: &str = "cartToggle";
    pub const CART_COUNT: &str = "cartCount";
    pub const MINI_CART: &str = "miniCart";
    pub const MINI_CART_ITEMS: &str = "miniCartItems";
    pub const MINI_CART_SUBTOTAL: &str = "miniCartSubtotal";
    pub const MINI_CART_SHIPPING: &str = "miniCartShipping";
    pub const MINI_CART_TOTAL: &str = "miniCartTotal";

    pub const HERO: &str = "hero";
    pub const HERO_VIDEO: &str = "heroVideo";
    pub const HERO_TITLE: &str = "heroTitle";
    pub const HERO_TOGGLE: &str = "heroToggle";
    pub const AUTOPLAY_FALLBACK: &str = "autoplayFallback";
    pub const WATCH_FULL: &str = "watchFull";
    pub const VIDEO_MODAL: &str = "videoModal";
    pub const MODAL_VIDEO: &str = "modalVideo";
    pub const MODAL_CLOSE: &str = "modalClose";
}

/// Class selectors rendered by the storefront templates.
pub mod selectors {
    pub const SITE_HEADER: &str = ".site-header";
    pub const MODAL_BACKDROP: &str = ".modal__backdrop";
    pub const HERO_TOGGLE_ICON: &str = ".hero__toggle-icon";
    pub const ADD_TO_CART: &str = ".add-to-cart";
    pub const FALLBACK_IMAGE: &str = "img[data-fallback]";
}

/// Body class that suppresses page scrolling.
pub const SCROLL_LOCK_CLASS: &str = "scroll-locked";

#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

#[must_use]
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Element by id, cast to `T`.
#[must_use]
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// First element matching `selector` under `root`, cast to `T`.
#[must_use]
pub fn query<T: JsCast>(root: &Element, selector: &str) -> Option<T> {
    root.query_selector(selector).ok().flatten()?.dyn_into::<T>().ok()
}

/// First element matching `selector` in the document, cast to `T`.
#[must_use]
pub fn query_document<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    document
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<T>()
        .ok()
}

pub fn set_aria_hidden(element: &Element, hidden: bool) {
    let _ = element.set_attribute("aria-hidden", if hidden { "true" } else { "false" });
}

/// Whether the event target lies inside `container`.
#[must_use]
pub fn contains_target(container: &Element, target: Option<&web_sys::EventTarget>) -> bool {
    target
        .and_then(|t| t.dyn_ref::<Node>())
        .is_some_and(|node| container.contains(Some(node)))
}

/// Viewport width in CSS pixels.
#[must_use]
pub fn viewport_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(f64::INFINITY)
}

thread_local! {
    static SCROLL_LOCKS: Cell<ScrollLocks> = const { Cell::new(ScrollLocks::new()) };
}

/// Claim or release the scroll lock for `holder`. `<body>` stays locked
/// while any holder claims it.
pub fn set_scroll_locked(document: &Document, holder: ScrollHolder, claim: bool) {
    let locked = SCROLL_LOCKS.with(|cell| {
        let mut locks = cell.get();
        let locked = locks.set(holder, claim);
        cell.set(locks);
        locked
    });
    let Some(body) = document.body() else {
        return;
    };
    let classes = body.class_list();
    let result = if locked {
        classes.add_1(SCROLL_LOCK_CLASS)
    } else {
        classes.remove_1(SCROLL_LOCK_CLASS)
    };
    if let Err(e) = result {
        log::warn!("Failed to update scroll lock: {e:?}");
    }
}
