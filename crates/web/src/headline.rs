//! Headline fit: DOM layout and re-fit triggers.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use vast_core::fit::{FitConfig, FitTrigger, HeadlineFitter, HeadlineLayout, Measurement};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element, HtmlElement, Window};

use crate::dom::{self, ids, selectors};

/// The hero title measured against the hero block and the fixed header.
struct DomHeadline {
    window: Window,
    title: HtmlElement,
    container: Element,
    header: Option<Element>,
}

impl DomHeadline {
    /// Remove the inline override so stylesheet rules apply again.
    fn clear_override(&self) {
        let _ = self.title.style().remove_property("font-size");
    }
}

impl HeadlineLayout for DomHeadline {
    fn font_size(&self) -> f64 {
        self.window
            .get_computed_style(&self.title)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("font-size").ok())
            .and_then(|value| parse_px(&value))
            .unwrap_or(0.0)
    }

    fn set_font_size(&mut self, px: f64) {
        let _ = self.title.style().set_property("font-size", &format!("{px}px"));
    }

    fn measure(&self) -> Measurement {
        let container = self.container.get_bounding_client_rect();
        let heading = self.title.get_bounding_client_rect();
        Measurement {
            container_top: container.top(),
            container_height: container.height(),
            header_height: self
                .header
                .as_ref()
                .map_or(0.0, |h| h.get_bounding_client_rect().height()),
            heading_top: heading.top(),
            heading_height: heading.height(),
        }
    }
}

/// Parse a computed length such as `"48px"`.
fn parse_px(value: &str) -> Option<f64> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}

struct Headline {
    layout: RefCell<DomHeadline>,
    fitter: HeadlineFitter,
}

impl Headline {
    /// Clear any override, then fit on the next animation frame.
    fn recompute(self: &Rc<Self>) {
        self.layout.borrow().clear_override();

        let headline = Rc::clone(self);
        let frame = Closure::once_into_js(move || {
            let outcome = headline.fitter.fit(&mut *headline.layout.borrow_mut());
            log::debug!("Headline fit: {outcome:?}");
        });
        let window = self.layout.borrow().window.clone();
        if let Err(e) = window.request_animation_frame(frame.unchecked_ref()) {
            log::warn!("requestAnimationFrame failed: {e:?}");
        }
    }

    fn schedule(self: &Rc<Self>, trigger: FitTrigger) {
        match trigger.delay_ms() {
            0 => self.recompute(),
            delay => {
                let headline = Rc::clone(self);
                Timeout::new(delay, move || headline.recompute()).forget();
            }
        }
    }
}

/// Keep the hero title inside the hero block. No-op without both elements.
pub fn install(document: &Document) {
    let Some(window) = dom::window() else {
        return;
    };
    let Some(title) = dom::by_id::<HtmlElement>(document, ids::HERO_TITLE) else {
        return;
    };
    let Some(container) = document.get_element_by_id(ids::HERO) else {
        return;
    };

    let layout = DomHeadline {
        window: window.clone(),
        title,
        container,
        header: dom::query_document(document, selectors::SITE_HEADER),
    };
    // The floor derives from the stylesheet size captured before any override.
    let fitter = HeadlineFitter::new(FitConfig::default(), layout.font_size());
    let headline = Rc::new(Headline {
        layout: RefCell::new(layout),
        fitter,
    });

    for (event_type, trigger) in [
        ("resize", FitTrigger::Resize),
        ("orientationchange", FitTrigger::OrientationChange),
    ] {
        let headline = Rc::clone(&headline);
        EventListener::new(&window, event_type, move |_| headline.schedule(trigger)).forget();
    }

    if document.ready_state() == "complete" {
        headline.schedule(FitTrigger::PageLoad);
    } else {
        let headline = Rc::clone(&headline);
        EventListener::once(&window, "load", move |_| headline.schedule(FitTrigger::PageLoad))
            .forget();
    }

    if let Ok(ready) = document.fonts().ready() {
        spawn_local(async move {
            if JsFuture::from(ready).await.is_ok() {
                headline.schedule(FitTrigger::FontsReady);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("48px"), Some(48.0));
        assert_eq!(parse_px(" 37.5px "), Some(37.5));
        assert_eq!(parse_px("3em"), None);
        assert_eq!(parse_px(""), None);
    }
}
