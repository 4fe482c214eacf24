//! # Billing Engine
//!
//! Computes the totals of a checkout: subtotal, discount, GST, payable,
//! profit and change due.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        compute_totals()                                 │
//! │                                                                         │
//! │  1. sub_total        = Σ selling_price × qty                            │
//! │  2. discount_amount  = Flat(v) → v                                      │
//! │                        Percentage(p) → p/100 × sub_total                │
//! │  3. per line:                                                           │
//! │       ratio          = line_total / sub_total   (0 if sub_total == 0)   │
//! │       discount_share = discount_amount × ratio                          │
//! │       taxable        = max(0, line_total − discount_share)              │
//! │       tax            = taxable × gst                                    │
//! │     tax_amount       = Σ tax                                            │
//! │  4. final_amount     = round_half_up(sub_total − discount + tax)        │
//! │  5. profit           = max(0, sub_total − discount) − Σ cost × qty      │
//! │  6. balance          = max(0, cash_given − final_amount)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! GST is charged per line at that product's own rate on its share of the
//! discounted value, so mixed-rate carts are taxed correctly.
//!
//! `profit` is taken from the unrounded net sale, so it can differ from
//! `final_amount − tax_amount − cost` by up to half a unit. Dashboard totals
//! are built on this exact formula.
//!
//! The function is pure: the checkout preview calls it on every edit and the
//! commit path calls it again with the same inputs, and both must agree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CartItem, Discount};

/// Per-line breakdown of the GST apportionment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineTotals {
    pub product_id: String,
    /// `selling_price × quantity`.
    pub line_total: Money,
    /// This line's share of the subtotal.
    pub ratio: Decimal,
    /// This line's share of the transaction discount.
    pub discount_share: Money,
    /// Value GST is charged on, floored at zero.
    pub taxable: Money,
    pub tax: Money,
}

/// Result of the billing engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub sub_total: Money,
    pub discount_amount: Money,
    pub tax_amount: Money,
    /// Payable, rounded to whole units.
    pub final_amount: Money,
    pub profit: Money,
    /// Change due for cash payments.
    pub balance: Money,
    pub lines: Vec<LineTotals>,
}

impl Totals {
    /// `sub_total − discount_amount`, floored at zero.
    pub fn amount_after_discount(&self) -> Money {
        (self.sub_total - self.discount_amount).clamp_non_negative()
    }

    /// Payable before rounding.
    pub fn unrounded_final(&self) -> Money {
        self.sub_total - self.discount_amount + self.tax_amount
    }
}

/// Runs the billing engine over `items`.
///
/// ## Example
/// ```rust
/// use quickbill_core::billing::compute_totals;
/// use quickbill_core::{CartItem, Discount, Money, Product, TaxRate};
/// use rust_decimal::Decimal;
///
/// let milk = Product::new("2", "Fresh Milk 1L", "Dairy")
///     .with_prices(Money::from_major(50), Money::from_major(60));
/// let soap = Product::new("3", "Artisan Soap", "Hygiene")
///     .with_prices(Money::from_major(25), Money::from_major(40))
///     .with_tax_rate(TaxRate::from_percent(12));
///
/// let items = vec![CartItem::new(milk, 1), CartItem::new(soap, 1)];
/// let totals = compute_totals(&items, &Discount::Percentage(Decimal::from(10)), Money::zero());
///
/// assert_eq!(totals.discount_amount, Money::from_major(10));
/// assert_eq!(totals.tax_amount, Money::from_minor(432));
/// assert_eq!(totals.final_amount, Money::from_major(94));
/// ```
pub fn compute_totals(items: &[CartItem], discount: &Discount, cash_given: Money) -> Totals {
    let sub_total: Money = items.iter().map(CartItem::line_total).sum();
    let discount_amount = discount.amount(sub_total);

    let lines: Vec<LineTotals> = items
        .iter()
        .map(|item| {
            let line_total = item.line_total();
            let ratio = line_total.ratio_of(sub_total);
            let discount_share = discount_amount.scale(ratio);
            let taxable = (line_total - discount_share).clamp_non_negative();
            LineTotals {
                product_id: item.product.id.clone(),
                line_total,
                ratio,
                discount_share,
                taxable,
                tax: taxable.calculate_tax(item.product.gst_rate),
            }
        })
        .collect();

    let tax_amount: Money = lines.iter().map(|l| l.tax).sum();
    let final_amount = (sub_total - discount_amount + tax_amount).round_half_up();

    let total_cost: Money = items.iter().map(CartItem::line_cost).sum();
    let profit = (sub_total - discount_amount).clamp_non_negative() - total_cost;

    let balance = (cash_given - final_amount).clamp_non_negative();

    Totals {
        sub_total,
        discount_amount,
        tax_amount,
        final_amount,
        profit,
        balance,
        lines,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
