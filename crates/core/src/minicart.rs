//! Mini-cart view model and panel visibility.
//!
//! [`MiniCartView`] is everything the popover displays, computed from the
//! persisted cart and the catalog. [`MiniCartPanel`] tracks whether the
//! popover is shown and decides when background scrolling is locked.

use rust_decimal::Decimal;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::checkout::{ShippingPolicy, Totals};
use crate::types::{CurrencyCode, Price, ProductId};

/// Text shown in place of line items when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniCartLine {
    pub id: ProductId,
    pub title: String,
    pub image: Option<String>,
    pub quantity: u32,
    pub unit_price: Price,
    /// False when the product was not found in the catalog and placeholder
    /// values are shown instead.
    pub resolved: bool,
}

impl MiniCartLine {
    /// Quantity and unit price, e.g. "2 × $29.00".
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} × {}", self.quantity, self.unit_price.display())
    }

    /// Class of the line's media box. Lines without an image start out
    /// showing the placeholder background.
    #[must_use]
    pub const fn media_class(&self) -> &'static str {
        if self.image.is_some() {
            "mini-item__media"
        } else {
            "mini-item__media img-fallback"
        }
    }
}

/// Everything the mini-cart popover displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniCartView {
    pub item_count: u32,
    pub lines: Vec<MiniCartLine>,
    pub totals: Totals,
    pub currency: CurrencyCode,
}

impl MiniCartView {
    /// Build the view for a cart.
    ///
    /// Lines referencing products missing from the catalog fall back to a
    /// placeholder (title = identifier, price = 0, no image).
    #[must_use]
    pub fn build(
        cart: &Cart,
        catalog: &Catalog,
        policy: &ShippingPolicy,
        currency: CurrencyCode,
    ) -> Self {
        let lines = cart
            .lines()
            .iter()
            .map(|line| match catalog.find(line.id.as_str()) {
                Some(product) => MiniCartLine {
                    id: line.id.clone(),
                    title: product.title.clone(),
                    image: product.primary_image().map(str::to_string),
                    quantity: line.qty,
                    unit_price: product.unit_price(),
                    resolved: true,
                },
                None => MiniCartLine {
                    id: line.id.clone(),
                    title: line.id.to_string(),
                    image: None,
                    quantity: line.qty,
                    unit_price: Price::zero(currency),
                    resolved: false,
                },
            })
            .collect();

        Self {
            item_count: cart.item_count(),
            lines,
            totals: Totals::compute(cart, catalog, policy),
            currency,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Badge text.
    #[must_use]
    pub fn badge_text(&self) -> String {
        self.item_count.to_string()
    }

    #[must_use]
    pub fn subtotal_display(&self) -> String {
        self.money(self.totals.subtotal)
    }

    #[must_use]
    pub fn shipping_display(&self) -> String {
        self.money(self.totals.shipping)
    }

    #[must_use]
    pub fn total_display(&self) -> String {
        self.money(self.totals.total)
    }

    fn money(&self, amount: Decimal) -> String {
        Price::new(amount, self.currency).display()
    }
}

/// Background scroll change requested by a panel transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollLock {
    /// Suppress background scrolling.
    Lock,
    /// Restore background scrolling.
    Release,
    /// Leave scrolling as it is.
    Keep,
}

/// Result of a visibility transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelChange {
    pub open: bool,
    pub scroll: ScrollLock,
}

/// Shown/hidden state of the mini-cart popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiniCartPanel {
    open: bool,
    breakpoint_px: u32,
}

impl MiniCartPanel {
    /// A closed panel that locks scrolling below `breakpoint_px`.
    #[must_use]
    pub const fn new(breakpoint_px: u32) -> Self {
        Self {
            open: false,
            breakpoint_px,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Toggle button activation.
    pub fn toggle(&mut self, viewport_width: f64) -> PanelChange {
        if self.open {
            self.close()
        } else {
            self.open(viewport_width)
        }
    }

    /// Show the panel; locks scrolling on small viewports.
    pub fn open(&mut self, viewport_width: f64) -> PanelChange {
        self.open = true;
        let scroll = if viewport_width < f64::from(self.breakpoint_px) {
            ScrollLock::Lock
        } else {
            ScrollLock::Keep
        };
        PanelChange { open: true, scroll }
    }

    /// Hide the panel and restore scrolling.
    pub fn close(&mut self) -> PanelChange {
        self.open = false;
        PanelChange {
            open: false,
            scroll: ScrollLock::Release,
        }
    }

    /// A click anywhere in the document.
    ///
    /// Closes the panel when the click landed outside both the panel and its
    /// toggle. Returns `None` when nothing changes.
    pub fn document_click(&mut self, inside_panel: bool, inside_toggle: bool) -> Option<PanelChange> {
        (self.open && !inside_panel && !inside_toggle).then(|| self.close())
    }

    /// Escape key press. Returns `None` when the panel is already hidden.
    pub fn escape(&mut self) -> Option<PanelChange> {
        self.open.then(|| self.close())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{product, six_products};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_cart_view() {
        let view = MiniCartView::build(
            &Cart::empty(),
            &six_products(),
            &ShippingPolicy::default(),
            CurrencyCode::USD,
        );
        assert!(view.is_empty());
        assert_eq!(view.badge_text(), "0");
        assert_eq!(view.subtotal_display(), "$0.00");
        assert_eq!(view.shipping_display(), "$0.00");
        assert_eq!(view.total_display(), "$0.00");
    }

    #[test]
    fn test_badge_matches_sum_of_quantities() {
        let mut cart = Cart::empty();
        for id in ["p1", "p2", "p1", "p6", "p1"] {
            cart.add(&ProductId::new(id));
        }
        let view = MiniCartView::build(
            &cart,
            &six_products(),
            &ShippingPolicy::default(),
            CurrencyCode::USD,
        );
        assert_eq!(view.item_count, 5);
        assert_eq!(
            view.item_count,
            view.lines.iter().map(|l| l.quantity).sum::<u32>()
        );
    }

    #[test]
    fn test_total_formatting_with_flat_fee() {
        let catalog = Catalog::new(vec![product("hundred", dec("100"))]).unwrap();
        let mut cart = Cart::empty();
        cart.add(&ProductId::new("hundred"));
        let view = MiniCartView::build(&cart, &catalog, &ShippingPolicy::default(), CurrencyCode::USD);
        assert_eq!(view.total_display(), "$109.99");
        assert_eq!(view.lines[0].summary(), "1 × $100.00");
        assert_eq!(view.lines[0].image.as_deref(), Some("images/hundred.jpg"));
    }

    #[test]
    fn test_free_shipping_total() {
        let catalog = Catalog::new(vec![product("big", dec("151"))]).unwrap();
        let mut cart = Cart::empty();
        cart.add(&ProductId::new("big"));
        let view = MiniCartView::build(&cart, &catalog, &ShippingPolicy::default(), CurrencyCode::USD);
        assert_eq!(view.shipping_display(), "$0.00");
        assert_eq!(view.total_display(), "$151.00");
    }

    #[test]
    fn test_unknown_product_uses_placeholder() {
        let mut cart = Cart::empty();
        cart.add(&ProductId::new("pl-abc123"));
        let view = MiniCartView::build(
            &cart,
            &Catalog::default(),
            &ShippingPolicy::default(),
            CurrencyCode::USD,
        );
        let line = &view.lines[0];
        assert_eq!(line.title, "pl-abc123");
        assert_eq!(line.image, None);
        assert_eq!(line.unit_price.display(), "$0.00");
        assert!(!line.resolved);
        assert_eq!(view.total_display(), "$0.00");
    }

    #[test]
    fn test_line_image_gets_its_own_media_box() {
        let mut cart = Cart::empty();
        cart.add(&ProductId::new("p1"));
        cart.add(&ProductId::new("missing"));
        let view = MiniCartView::build(
            &cart,
            &six_products(),
            &ShippingPolicy::default(),
            CurrencyCode::USD,
        );
        // A failed image marks its parent, which must be the media box
        assert_eq!(view.lines[0].media_class(), "mini-item__media");
        assert_eq!(view.lines[1].media_class(), "mini-item__media img-fallback");
    }

    #[test]
    fn test_toggle_locks_scroll_on_small_viewport() {
        let mut panel = MiniCartPanel::new(720);
        let change = panel.toggle(480.0);
        assert_eq!(
            change,
            PanelChange {
                open: true,
                scroll: ScrollLock::Lock
            }
        );
        let change = panel.toggle(480.0);
        assert_eq!(change.scroll, ScrollLock::Release);
        assert!(!panel.is_open());
    }

    #[test]
    fn test_open_on_wide_viewport_keeps_scroll() {
        let mut panel = MiniCartPanel::new(720);
        assert_eq!(panel.open(1280.0).scroll, ScrollLock::Keep);
        assert_eq!(panel.open(720.0).scroll, ScrollLock::Keep);
    }

    #[test]
    fn test_outside_click_closes() {
        let mut panel = MiniCartPanel::new(720);
        panel.open(1024.0);
        assert_eq!(panel.document_click(true, false), None);
        assert_eq!(panel.document_click(false, true), None);
        assert!(panel.is_open());
        assert!(panel.document_click(false, false).is_some());
        assert!(!panel.is_open());
    }

    #[test]
    fn test_escape_only_when_open() {
        let mut panel = MiniCartPanel::new(720);
        assert_eq!(panel.escape(), None);
        panel.open(300.0);
        assert_eq!(panel.escape().map(|c| c.open), Some(false));
        assert_eq!(panel.document_click(false, false), None);
    }
}
