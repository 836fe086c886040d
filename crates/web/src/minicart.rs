//! Mini-cart popover: badge, line items, totals, and visibility.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use vast_core::CartStore;
use vast_core::minicart::{
    EMPTY_CART_MESSAGE, MiniCartLine, MiniCartPanel, MiniCartView, PanelChange, ScrollLock,
};
use vast_core::scroll::ScrollHolder;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, KeyboardEvent};

use crate::dom::{self, ids};
use crate::page::PageData;
use crate::storage::BrowserStorage;

/// The mounted mini-cart.
pub struct MiniCart {
    document: Document,
    data: Rc<PageData>,
    store: CartStore<BrowserStorage>,
    panel: RefCell<MiniCartPanel>,
    root: Element,
    toggle: Option<Element>,
}

impl MiniCart {
    /// Mount on the page's mini-cart panel and wire its listeners.
    ///
    /// Returns `None` when the page has no mini-cart.
    pub fn mount(document: &Document, data: Rc<PageData>) -> Option<Rc<Self>> {
        let root = document.get_element_by_id(ids::MINI_CART)?;
        if !root.has_attribute("aria-hidden") {
            dom::set_aria_hidden(&root, true);
        }

        let store = CartStore::with_key(
            BrowserStorage::local(),
            data.settings.cart_storage_key.clone(),
        );
        let mini_cart = Rc::new(Self {
            document: document.clone(),
            panel: RefCell::new(MiniCartPanel::new(data.settings.mobile_breakpoint_px)),
            toggle: document.get_element_by_id(ids::CART_TOGGLE),
            data,
            store,
            root,
        });
        mini_cart.wire();
        Some(mini_cart)
    }

    /// Re-render badge, lines, and totals from the persisted cart.
    pub fn render(&self) {
        let settings = &self.data.settings;
        let view = MiniCartView::build(
            &self.store.load(),
            &self.data.catalog,
            &settings.shipping,
            settings.currency,
        );

        self.set_text(ids::CART_COUNT, &view.badge_text());
        self.set_text(ids::MINI_CART_SUBTOTAL, &view.subtotal_display());
        self.set_text(ids::MINI_CART_SHIPPING, &view.shipping_display());
        self.set_text(ids::MINI_CART_TOTAL, &view.total_display());

        if let Err(e) = self.render_lines(&view) {
            log::error!("Failed to render mini-cart lines: {e:?}");
        }
    }

    fn render_lines(&self, view: &MiniCartView) -> Result<(), JsValue> {
        let Some(container) = self.document.get_element_by_id(ids::MINI_CART_ITEMS) else {
            return Ok(());
        };
        container.set_text_content(None);

        if view.is_empty() {
            let empty = self.document.create_element("div")?;
            empty.set_class_name("mini-cart__empty");
            empty.set_text_content(Some(EMPTY_CART_MESSAGE));
            container.append_child(&empty)?;
            return Ok(());
        }

        for line in &view.lines {
            let row = self.line_element(line)?;
            container.append_child(&row)?;
        }
        Ok(())
    }

    fn line_element(&self, line: &MiniCartLine) -> Result<Element, JsValue> {
        let row = self.document.create_element("div")?;
        row.set_class_name(if line.resolved {
            "mini-item"
        } else {
            "mini-item mini-item--unresolved"
        });

        // The image fallback marks the image's parent, so the image sits in
        // its own media box rather than directly in the row.
        let media = self.document.create_element("div")?;
        media.set_class_name(line.media_class());
        if let Some(src) = &line.image {
            let img = self.document.create_element("img")?;
            img.set_attribute("src", src)?;
            img.set_attribute("alt", &line.title)?;
            img.set_attribute("data-fallback", "")?;
            media.append_child(&img)?;
        }
        row.append_child(&media)?;

        let body = self.document.create_element("div")?;
        let title = self.document.create_element("strong")?;
        title.set_class_name("mini-item__title");
        title.set_text_content(Some(&line.title));
        let summary = self.document.create_element("div")?;
        summary.set_class_name("mini-item__summary");
        summary.set_text_content(Some(&line.summary()));
        body.append_child(&title)?;
        body.append_child(&summary)?;
        row.append_child(&body)?;

        Ok(row)
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(element) = self.document.get_element_by_id(id) {
            element.set_text_content(Some(text));
        }
    }

    fn apply(&self, change: PanelChange) {
        dom::set_aria_hidden(&self.root, !change.open);
        if let Some(toggle) = &self.toggle {
            let _ = toggle.set_attribute("aria-expanded", if change.open { "true" } else { "false" });
        }
        match change.scroll {
            ScrollLock::Lock => dom::set_scroll_locked(&self.document, ScrollHolder::MiniCart, true),
            ScrollLock::Release => dom::set_scroll_locked(&self.document, ScrollHolder::MiniCart, false),
            ScrollLock::Keep => {}
        }
    }

    fn wire(self: &Rc<Self>) {
        if let Some(toggle) = &self.toggle {
            let mini_cart = Rc::clone(self);
            EventListener::new(toggle, "click", move |event| {
                // Keep the document handler from treating this as an outside click.
                event.stop_propagation();
                let change = mini_cart.panel.borrow_mut().toggle(dom::viewport_width());
                mini_cart.apply(change);
            })
            .forget();
        }

        let mini_cart = Rc::clone(self);
        EventListener::new(&self.document, "click", move |event| {
            let target = event.target();
            let inside_panel = dom::contains_target(&mini_cart.root, target.as_ref());
            let inside_toggle = mini_cart
                .toggle
                .as_ref()
                .is_some_and(|toggle| dom::contains_target(toggle, target.as_ref()));
            let change = mini_cart
                .panel
                .borrow_mut()
                .document_click(inside_panel, inside_toggle);
            if let Some(change) = change {
                mini_cart.apply(change);
            }
        })
        .forget();

        let mini_cart = Rc::clone(self);
        EventListener::new(&self.document, "keydown", move |event| {
            let is_escape = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|e| e.key() == "Escape");
            if !is_escape {
                return;
            }
            let change = mini_cart.panel.borrow_mut().escape();
            if let Some(change) = change {
                mini_cart.apply(change);
            }
        })
        .forget();
    }
}
