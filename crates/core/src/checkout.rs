//! Cart totals: subtotal, shipping, and total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::Catalog;

/// Flat-fee shipping with a free-shipping threshold.
///
/// Shipping is free for an empty cart and for subtotals strictly above
/// `free_over`; otherwise `flat_fee` is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingPolicy {
    pub free_over: Decimal,
    pub flat_fee: Decimal,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_over: Decimal::new(150, 0),
            flat_fee: Decimal::new(999, 2),
        }
    }
}

impl ShippingPolicy {
    /// Shipping charged for a given subtotal.
    #[must_use]
    pub fn shipping_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal.is_zero() || subtotal > self.free_over {
            Decimal::ZERO
        } else {
            self.flat_fee
        }
    }
}

/// Computed cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

impl Totals {
    /// Totals for a known subtotal.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal, policy: &ShippingPolicy) -> Self {
        let shipping = policy.shipping_for(subtotal);
        Self {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    /// Totals for a cart, pricing each line against the catalog.
    ///
    /// Lines whose product is not in the catalog are priced at zero.
    #[must_use]
    pub fn compute(cart: &Cart, catalog: &Catalog, policy: &ShippingPolicy) -> Self {
        let subtotal = cart
            .lines()
            .iter()
            .map(|line| {
                let unit = catalog.find(line.id.as_str()).map_or(Decimal::ZERO, |p| p.price);
                unit * Decimal::from(line.qty)
            })
            .sum();
        Self::from_subtotal(subtotal, policy)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;
    use crate::types::ProductId;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_subtotal_100_charges_flat_fee() {
        let totals = Totals::from_subtotal(dec("100"), &ShippingPolicy::default());
        assert_eq!(totals.shipping, dec("9.99"));
        assert_eq!(totals.total, dec("109.99"));
    }

    #[test]
    fn test_subtotal_151_ships_free() {
        let totals = Totals::from_subtotal(dec("151"), &ShippingPolicy::default());
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(format!("{:.2}", totals.total), "151.00");
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.shipping_for(dec("150")), dec("9.99"));
        assert_eq!(policy.shipping_for(dec("150.01")), Decimal::ZERO);
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let totals = Totals::compute(&Cart::empty(), &Catalog::default(), &ShippingPolicy::default());
        assert_eq!(totals, Totals::default());
        assert_eq!(format!("{:.2}", totals.total), "0.00");
    }

    #[test]
    fn test_compute_multiplies_quantities() {
        let catalog = Catalog::new(vec![
            product("shoe", dec("149")),
            product("tee", dec("29")),
        ])
        .unwrap();
        let mut cart = Cart::empty();
        cart.add(&ProductId::new("tee"));
        cart.add(&ProductId::new("tee"));
        cart.add(&ProductId::new("shoe"));

        let totals = Totals::compute(&cart, &catalog, &ShippingPolicy::default());
        assert_eq!(totals.subtotal, dec("207"));
        assert_eq!(totals.shipping, Decimal::ZERO);
    }

    #[test]
    fn test_unknown_product_priced_at_zero() {
        let mut cart = Cart::empty();
        cart.add(&ProductId::new("ghost"));
        let totals = Totals::compute(&cart, &Catalog::default(), &ShippingPolicy::default());
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.shipping, Decimal::ZERO);
    }

    #[test]
    fn test_custom_policy() {
        let policy = ShippingPolicy {
            free_over: dec("50"),
            flat_fee: dec("4.50"),
        };
        assert_eq!(Totals::from_subtotal(dec("20"), &policy).total, dec("24.50"));
        assert_eq!(Totals::from_subtotal(dec("60"), &policy).total, dec("60"));
    }

    #[test]
    fn test_policy_json_shape() {
        let json = serde_json::to_string(&ShippingPolicy::default()).unwrap();
        assert!(json.contains("freeOver") && json.contains("flatFee"));
        let parsed: ShippingPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ShippingPolicy::default());
    }
}
