//! Fallback for product images that fail to load.
//!
//! An `img[data-fallback]` that errors is hidden and its container gets the
//! `img-fallback` class, which paints a neutral placeholder.

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlImageElement};

use crate::dom::selectors;

const FALLBACK_ATTR: &str = "data-fallback";
const FALLBACK_CLASS: &str = "img-fallback";

/// Watch for image errors anywhere in the document, including images added
/// later by the mini-cart.
pub fn install(document: &Document) {
    // `error` does not bubble; listen in the capture phase.
    EventListener::new_with_options(
        document,
        "error",
        EventListenerOptions::run_in_capture_phase(),
        |event| {
            if let Some(img) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlImageElement>().ok())
                .filter(|img| img.has_attribute(FALLBACK_ATTR))
            {
                apply_fallback(&img);
            }
        },
    )
    .forget();

    // Images that already failed before this listener existed.
    let Ok(images) = document.query_selector_all(selectors::FALLBACK_IMAGE) else {
        return;
    };
    for index in 0..images.length() {
        if let Some(img) = images
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlImageElement>().ok())
            .filter(|img| img.complete() && img.natural_width() == 0)
        {
            apply_fallback(&img);
        }
    }
}

fn apply_fallback(img: &HtmlImageElement) {
    img.set_hidden(true);
    let _ = img.remove_attribute(FALLBACK_ATTR);
    if let Some(parent) = img.parent_element() {
        let _ = parent.class_list().add_1(FALLBACK_CLASS);
    }
}
