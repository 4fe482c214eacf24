//! # Checkout Session
//!
//! The in-progress order at the till: cart lines, discount, payment method
//! and cash received.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Session Operations                          │
//! │                                                                         │
//! │  Cashier Action           Method                  State Change          │
//! │  ──────────────           ──────                  ────────────          │
//! │                                                                         │
//! │  Tap product ───────────► add_product() ────────► qty += 1 / new line  │
//! │                                                                         │
//! │  Press + / − ───────────► update_quantity() ────► clamp(1, stock)      │
//! │                                                                         │
//! │  Tap trash ─────────────► remove_product() ─────► line removed         │
//! │                                                                         │
//! │  Edit discount / tender ► set_discount() etc ───► totals() changes     │
//! │                                                                         │
//! │  Complete sale ─────────► (store commits) ──────► reset()              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by product id (adding the same product bumps quantity)
//! - Quantities changed through `add_product`/`update_quantity` stay within
//!   `[1, min(product.stock, MAX_ITEM_QUANTITY)]`, using the snapshot taken
//!   when the line was created
//! - At most [`MAX_CART_ITEMS`] distinct lines

use serde::{Deserialize, Serialize};

use crate::billing::{compute_totals, Totals};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, Discount, PaymentMethod, Product};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// The current order being rung up.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub items: Vec<CartItem>,
    pub discount: Discount,
    pub payment_method: PaymentMethod,
    pub cash_given: Money,
}

impl CheckoutSession {
    /// Creates an empty session: no lines, `Flat(0)`, cash, nothing tendered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Out-of-stock product (`stock <= 0`): no-op, returns `Ok(false)`
    /// - Already in cart: quantity + 1, unless already at the snapshot's stock
    /// - Not in cart: new line with quantity 1
    ///
    /// ## Returns
    /// `Ok(true)` if the cart changed.
    pub fn add_product(&mut self, product: &Product) -> CoreResult<bool> {
        if !product.is_available() {
            return Ok(false);
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            if item.quantity >= line_limit(&item.product) {
                return Ok(false);
            }
            item.quantity += 1;
            return Ok(true);
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(CartItem::new(product.clone(), 1));
        Ok(true)
    }

    /// Moves a line's quantity by `delta`, clamped to `[1, product.stock]`
    /// (and never above [`MAX_ITEM_QUANTITY`]).
    ///
    /// Unknown product ids are ignored.
    pub fn update_quantity(&mut self, product_id: &str, delta: i64) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = item.quantity.saturating_add(delta).min(line_limit(&item.product)).max(1);
        }
    }

    /// Removes a line. Returns `true` if a line was removed.
    pub fn remove_product(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        self.items.len() != before
    }

    pub fn set_discount(&mut self, discount: Discount) {
        self.discount = discount;
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    pub fn set_cash_given(&mut self, cash: Money) {
        self.cash_given = cash;
    }

    /// Live preview of the bill.
    pub fn totals(&self) -> Totals {
        compute_totals(&self.items, &self.discount, self.cash_given)
    }

    /// True when the "Complete Sale" action is allowed: the cart has lines
    /// and, for cash, the tender covers the payable amount.
    pub fn can_checkout(&self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        match self.payment_method {
            PaymentMethod::Cash => self.cash_given >= self.totals().final_amount,
            PaymentMethod::Upi | PaymentMethod::Card => true,
        }
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Back to an empty order with default discount and payment settings.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn line_limit(product: &Product) -> i64 {
    product.stock.min(MAX_ITEM_QUANTITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaxRate;
    use rust_decimal_macros::dec;

    fn test_product(id: &str, price: i64, stock: i64) -> Product {
        Product::new(id, format!("Product {}", id), "Test")
            .with_prices(Money::from_major(price / 2), Money::from_major(price))
            .with_stock(stock)
            .with_tax_rate(TaxRate::from_percent(5))
    }

    #[test]
    fn test_add_product() {
        let mut session = CheckoutSession::new();
        let product = test_product("1", 50, 10);

        assert!(session.add_product(&product).unwrap());
        assert!(session.add_product(&product).unwrap());

        assert_eq!(session.item_count(), 1);
        assert_eq!(session.total_quantity(), 2);
        assert_eq!(session.totals().sub_total, Money::from_major(100));
    }

    #[test]
    fn test_add_out_of_stock_is_noop() {
        let mut session = CheckoutSession::new();
        let product = test_product("1", 50, 0);

        assert!(!session.add_product(&product).unwrap());
        assert!(session.is_empty());
    }

    #[test]
    fn test_add_stops_at_stock() {
        let mut session = CheckoutSession::new();
        let product = test_product("1", 50, 2);

        session.add_product(&product).unwrap();
        session.add_product(&product).unwrap();
        assert!(!session.add_product(&product).unwrap());
        assert_eq!(session.total_quantity(), 2);
    }

    #[test]
    fn test_cart_size_limit() {
        let mut session = CheckoutSession::new();
        for i in 0..MAX_CART_ITEMS {
            session.add_product(&test_product(&i.to_string(), 10, 5)).unwrap();
        }
        let err = session.add_product(&test_product("overflow", 10, 5)).unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { .. }));
    }

    #[test]
    fn test_update_quantity_clamps() {
        let mut session = CheckoutSession::new();
        let product = test_product("1", 50, 3);
        session.add_product(&product).unwrap();

        session.update_quantity("1", 10);
        assert_eq!(session.items[0].quantity, 3);

        session.update_quantity("1", -10);
        assert_eq!(session.items[0].quantity, 1);

        session.update_quantity("1", 1);
        assert_eq!(session.items[0].quantity, 2);

        session.update_quantity("missing", 1);
        assert_eq!(session.total_quantity(), 2);
    }

    #[test]
    fn test_quantity_capped_below_large_stock() {
        let mut session = CheckoutSession::new();
        let product = test_product("1", 10, 5_000);
        session.add_product(&product).unwrap();

        session.update_quantity("1", i64::MAX);
        assert_eq!(session.items[0].quantity, MAX_ITEM_QUANTITY);
        assert!(!session.add_product(&product).unwrap());
    }

    #[test]
    fn test_remove_product() {
        let mut session = CheckoutSession::new();
        session.add_product(&test_product("1", 50, 3)).unwrap();
        session.add_product(&test_product("2", 20, 3)).unwrap();

        assert!(session.remove_product("1"));
        assert!(!session.remove_product("1"));
        assert_eq!(session.item_count(), 1);
    }

    #[test]
    fn test_can_checkout() {
        let mut session = CheckoutSession::new();
        assert!(!session.can_checkout());

        // 2 × 50 at 5% GST = 105 payable
        let product = test_product("1", 50, 10);
        session.add_product(&product).unwrap();
        session.add_product(&product).unwrap();

        session.set_cash_given(Money::from_major(100));
        assert!(!session.can_checkout());

        session.set_cash_given(Money::from_major(105));
        assert!(session.can_checkout());

        session.set_cash_given(Money::zero());
        session.set_payment_method(PaymentMethod::Upi);
        assert!(session.can_checkout());
    }

    #[test]
    fn test_reset() {
        let mut session = CheckoutSession::new();
        session.add_product(&test_product("1", 50, 10)).unwrap();
        session.set_discount(Discount::percentage(dec!(10)));
        session.set_payment_method(PaymentMethod::Card);
        session.set_cash_given(Money::from_major(500));

        session.reset();

        assert!(session.is_empty());
        assert_eq!(session.discount, Discount::none());
        assert_eq!(session.payment_method, PaymentMethod::Cash);
        assert_eq!(session.cash_given, Money::zero());
    }
}
