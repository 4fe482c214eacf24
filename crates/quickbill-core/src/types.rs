//! # Domain Types
//!
//! Core domain types used throughout QuickBill.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │   SaleRecord    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  product (snap) │◄──│  items          │       │
//! │  │  cost_price     │   │  quantity       │   │  totals         │       │
//! │  │  selling_price  │   └─────────────────┘   │  payment_method │       │
//! │  │  stock          │                         │  profit         │       │
//! │  │  gst_rate       │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │    Discount     │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Flat(Money)    │   │  Cash           │       │
//! │  │  500 = 5%       │   │  Percentage(%)  │   │  Upi / Card     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `CartItem` carries a full copy of the product as it was when added, and a
//! `SaleRecord` keeps those copies. Later stock or price changes never rewrite
//! a completed sale.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::billing::Totals;
use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// GST rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5%, 1200 bps = 12%, 25 bps = 0.25% (the rate on rough diamonds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a whole percentage (5 → 5%).
    ///
    /// Saturates at `u32::MAX` bps; validation rejects anything above 100%.
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        TaxRate(pct.saturating_mul(100))
    }

    /// Creates a tax rate from a fractional percentage, rounded to the
    /// nearest basis point.
    pub fn from_percentage(pct: Decimal) -> Result<Self, ValidationError> {
        (pct * Decimal::ONE_HUNDRED)
            .round()
            .to_u32()
            .filter(|bps| *bps <= 10_000)
            .map(TaxRate)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "gst".to_string(),
                min: 0,
                max: 100,
            })
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (5% → 5).
    #[inline]
    pub fn percent(&self) -> Decimal {
        Decimal::new(self.0 as i64, 2)
    }

    /// Returns the rate as a fraction (5% → 0.05).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        Decimal::new(self.0 as i64, 4)
    }

    /// Zero tax rate (exempt goods).
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent().normalize())
    }
}

/// `gstPercent` wire form of a [`TaxRate`]: a JSON number in percent.
mod gst_percent {
    use super::*;

    pub fn serialize<S: Serializer>(rate: &TaxRate, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&rate.percent().normalize(), serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TaxRate, D::Error> {
        let pct = rust_decimal::serde::float::deserialize(deserializer)?;
        TaxRate::from_percentage(pct).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique key within the inventory.
    pub id: String,

    /// Display name shown to the cashier.
    pub name: String,

    /// Free-form grouping ("Dairy", "Grains", ...).
    pub category: String,

    /// What the shop paid per unit. Used for profit only.
    pub cost_price: Money,

    /// What the customer pays per unit, before GST.
    pub selling_price: Money,

    /// Units on hand. Not floored at zero.
    pub stock: i64,

    /// GST rate applied to this product's taxable value.
    ///
    /// On the wire this is `gstPercent` (a plain percentage such as `5` or
    /// `0.25`), stored internally in basis points.
    #[serde(rename = "gstPercent", with = "gst_percent")]
    pub gst_rate: TaxRate,

    /// Optional image reference for the product grid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    /// Creates a product with zero prices, zero stock and no GST.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            cost_price: Money::zero(),
            selling_price: Money::zero(),
            stock: 0,
            gst_rate: TaxRate::zero(),
            image: None,
        }
    }

    /// Sets cost and selling price.
    pub fn with_prices(mut self, cost_price: Money, selling_price: Money) -> Self {
        self.cost_price = cost_price;
        self.selling_price = selling_price;
        self
    }

    /// Sets the units on hand.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Sets the GST rate.
    pub fn with_tax_rate(mut self, rate: TaxRate) -> Self {
        self.gst_rate = rate;
        self
    }

    /// Sets the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// True when at least one unit can be put in a cart.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// True when `quantity` units are on hand.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }

    /// True when stock is below the highlight threshold.
    #[inline]
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.stock < threshold
    }

    /// Case-insensitive substring match of `term` against name or category.
    ///
    /// The term is used as typed (whitespace included). An empty term
    /// matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.category.to_lowercase().contains(&term)
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// One product and the quantity of it in a cart or a completed sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product as it was when added to the cart (frozen).
    pub product: Product,

    /// Units in this line.
    pub quantity: i64,
}

impl CartItem {
    /// Creates a line for `quantity` units of `product`.
    pub fn new(product: Product, quantity: i64) -> Self {
        CartItem { product, quantity }
    }

    /// `selling_price × quantity`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.selling_price * self.quantity
    }

    /// `cost_price × quantity`.
    #[inline]
    pub fn line_cost(&self) -> Money {
        self.product.cost_price * self.quantity
    }

    /// Id of the product in this line.
    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }
}

// =============================================================================
// Discount
// =============================================================================

/// A transaction-level discount.
///
/// Wire format matches the checkout form:
/// `{"type": "FLAT", "value": 20}` or `{"type": "PERCENTAGE", "value": 10}`.
/// Values are JSON numbers (decimal strings are also accepted on input).
/// Any other `type` fails to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Discount {
    /// Absolute currency amount off the subtotal.
    Flat(Money),
    /// Percentage of the subtotal (0–100 by convention, not enforced).
    Percentage(#[serde(with = "rust_decimal::serde::float")] Decimal),
}

impl Discount {
    /// Wire names accepted by [`Discount::from_parts`].
    pub const KINDS: [&'static str; 2] = ["FLAT", "PERCENTAGE"];

    /// No discount: `Flat(0)`.
    #[inline]
    pub fn none() -> Self {
        Discount::Flat(Money::zero())
    }

    /// Flat discount.
    #[inline]
    pub fn flat(amount: Money) -> Self {
        Discount::Flat(amount)
    }

    /// Percentage discount.
    #[inline]
    pub fn percentage(pct: Decimal) -> Self {
        Discount::Percentage(pct)
    }

    /// Builds a discount from a form's kind selector and numeric value.
    ///
    /// ## Example
    /// ```rust
    /// use quickbill_core::Discount;
    /// use rust_decimal::Decimal;
    ///
    /// let d = Discount::from_parts("percentage", Decimal::from(10)).unwrap();
    /// assert_eq!(d, Discount::Percentage(Decimal::from(10)));
    /// assert!(Discount::from_parts("bogo", Decimal::ONE).is_err());
    /// ```
    pub fn from_parts(kind: &str, value: Decimal) -> Result<Self, ValidationError> {
        match kind.trim().to_uppercase().as_str() {
            "FLAT" => Ok(Discount::Flat(Money::from_decimal(value))),
            "PERCENTAGE" => Ok(Discount::Percentage(value)),
            _ => Err(ValidationError::NotAllowed {
                field: "discount type".to_string(),
                allowed: Self::KINDS.iter().map(|k| k.to_string()).collect(),
            }),
        }
    }

    /// The currency amount this discount takes off `sub_total`.
    ///
    /// Not clamped: a flat discount may exceed the subtotal.
    pub fn amount(&self, sub_total: Money) -> Money {
        match self {
            Discount::Flat(amount) => *amount,
            Discount::Percentage(pct) => sub_total.percent_of(*pct),
        }
    }

    /// Raw value as entered (currency for Flat, percent for Percentage).
    pub fn value(&self) -> Decimal {
        match self {
            Discount::Flat(amount) => amount.amount(),
            Discount::Percentage(pct) => *pct,
        }
    }

    /// True for `Flat(0)` and `Percentage(0)`.
    pub fn is_none(&self) -> bool {
        self.value().is_zero()
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::none()
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Physical cash. The only method that takes a tendered amount.
    #[default]
    Cash,
    /// UPI transfer.
    Upi,
    /// Card on an external terminal.
    Card,
}

impl PaymentMethod {
    /// All methods, in the order the checkout shows them.
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Cash, PaymentMethod::Upi, PaymentMethod::Card];

    /// True if the cashier must enter the cash received.
    #[inline]
    pub fn requires_tender(&self) -> bool {
        match self {
            PaymentMethod::Cash => true,
            PaymentMethod::Upi | PaymentMethod::Card => false,
        }
    }

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "CARD",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CASH" => Ok(PaymentMethod::Cash),
            "UPI" => Ok(PaymentMethod::Upi),
            "CARD" => Ok(PaymentMethod::Card),
            _ => Err(ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: Self::ALL.iter().map(|m| m.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// Immutable snapshot of a completed transaction.
///
/// Lives in the sales ledger until refunded, at which point it is deleted
/// outright (there is no "refunded" status).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Lines as sold, with frozen product snapshots.
    pub items: Vec<CartItem>,
    /// Discount as entered at checkout.
    pub discount: Discount,
    pub sub_total: Money,
    pub discount_amount: Money,
    pub tax_amount: Money,
    /// Payable, rounded to whole units.
    pub final_amount: Money,
    pub payment_method: PaymentMethod,
    /// Cash received (cash sales only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_given: Option<Money>,
    /// Change returned (cash sales only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_due: Option<Money>,
    /// Pre-tax, post-discount net sale minus cost. Not rounded.
    pub profit: Money,
}

impl SaleRecord {
    /// Freezes a checkout into a record.
    ///
    /// `totals` must come from [`crate::billing::compute_totals`] over the
    /// same `items`, `discount` and `cash_given`. Id and timestamp are supplied
    /// by the caller so this stays free of clocks and randomness.
    pub fn settle(
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
        items: Vec<CartItem>,
        discount: Discount,
        payment_method: PaymentMethod,
        cash_given: Money,
        totals: &Totals,
    ) -> Self {
        let (cash_given, change_due) = if payment_method.requires_tender() {
            (Some(cash_given), Some(totals.balance))
        } else {
            (None, None)
        };

        SaleRecord {
            id: id.into(),
            timestamp,
            items,
            discount,
            sub_total: totals.sub_total,
            discount_amount: totals.discount_amount,
            tax_amount: totals.tax_amount,
            final_amount: totals.final_amount,
            payment_method,
            cash_given,
            change_due,
            profit: totals.profit,
        }
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// One-line history entry: `₹94 • 14:05 • CASH`.
    pub fn summary(&self) -> String {
        format!(
            "{}{} • {} • {}",
            crate::CURRENCY_SYMBOL,
            self.final_amount.amount().normalize(),
            self.timestamp.format("%H:%M"),
            self.payment_method
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn soap() -> Product {
        Product::new("3", "Artisan Soap", "Hygiene")
            .with_prices(Money::from_major(25), Money::from_major(40))
            .with_stock(200)
            .with_tax_rate(TaxRate::from_percent(12))
    }

    #[test]
    fn test_tax_rate_conversions() {
        let rate = TaxRate::from_percent(12);
        assert_eq!(rate.bps(), 1200);
        assert_eq!(rate.percent(), dec!(12));
        assert_eq!(rate.fraction(), dec!(0.12));
        assert_eq!(rate.to_string(), "12%");
        assert_eq!(TaxRate::from_percent(u32::MAX).bps(), u32::MAX);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(dec!(0.25)).unwrap().bps(), 25);
        assert_eq!(TaxRate::from_percentage(dec!(18)).unwrap().bps(), 1800);
        assert!(TaxRate::from_percentage(dec!(101)).is_err());
        assert!(TaxRate::from_percentage(dec!(-1)).is_err());
    }

    #[test]
    fn test_cart_item_totals() {
        let item = CartItem::new(soap(), 3);
        assert_eq!(item.line_total(), Money::from_major(120));
        assert_eq!(item.line_cost(), Money::from_major(75));
        assert_eq!(item.product_id(), "3");
    }

    #[test]
    fn test_product_search() {
        let p = soap();
        assert!(p.matches_search("soap"));
        assert!(p.matches_search("HYG"));
        assert!(p.matches_search(""));
        assert!(!p.matches_search("rice"));
        // Whitespace is part of the term.
        assert!(p.matches_search("n s"));
        assert!(!p.matches_search("soap "));
    }

    #[test]
    fn test_product_wire_format() {
        let json = serde_json::to_value(soap()).unwrap();
        assert_eq!(json["costPrice"], serde_json::json!(25.0));
        assert_eq!(json["sellingPrice"], serde_json::json!(40.0));
        assert_eq!(json["gstPercent"], serde_json::json!(12.0));
        assert!(json.get("gstRateBps").is_none());

        let parsed: Product = serde_json::from_str(
            r#"{"id":"1","name":"Premium Rice","category":"Grains","costPrice":40,"sellingPrice":50,"stock":100,"gstPercent":5}"#,
        )
        .unwrap();
        assert_eq!(parsed.gst_rate, TaxRate::from_percent(5));
        assert_eq!(parsed.selling_price, Money::from_major(50));

        let fractional: Product = serde_json::from_str(
            r#"{"id":"7","name":"Rough Diamond","category":"Gems","costPrice":1,"sellingPrice":2,"stock":1,"gstPercent":0.25}"#,
        )
        .unwrap();
        assert_eq!(fractional.gst_rate.bps(), 25);

        let too_high = serde_json::from_str::<Product>(
            r#"{"id":"8","name":"X","category":"Y","costPrice":1,"sellingPrice":2,"stock":1,"gstPercent":150}"#,
        );
        assert!(too_high.is_err());
    }

    #[test]
    fn test_discount_amount() {
        let sub_total = Money::from_major(200);
        assert_eq!(Discount::flat(Money::from_major(30)).amount(sub_total), Money::from_major(30));
        assert_eq!(Discount::percentage(dec!(10)).amount(sub_total), Money::from_major(20));
        // Flat discounts are not clamped to the subtotal.
        assert_eq!(Discount::flat(Money::from_major(500)).amount(sub_total), Money::from_major(500));
        assert!(Discount::default().is_none());
    }

    #[test]
    fn test_discount_wire_format() {
        let json = serde_json::to_value(Discount::percentage(dec!(10))).unwrap();
        assert_eq!(json["type"], "PERCENTAGE");

        assert_eq!(json["value"], serde_json::json!(10.0));

        let parsed: Discount = serde_json::from_str(r#"{"type":"FLAT","value":20}"#).unwrap();
        assert_eq!(parsed, Discount::flat(Money::from_major(20)));
        let legacy: Discount = serde_json::from_str(r#"{"type":"FLAT","value":"20"}"#).unwrap();
        assert_eq!(legacy, parsed);

        let unknown = serde_json::from_str::<Discount>(r#"{"type":"BOGO","value":"1"}"#);
        assert!(unknown.is_err());
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("UPI".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
        assert!("cheque".parse::<PaymentMethod>().is_err());
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
        assert!(PaymentMethod::Cash.requires_tender());
        assert!(!PaymentMethod::Card.requires_tender());
    }

    #[test]
    fn test_settle_records_tender_for_cash_only() {
        let items = vec![CartItem::new(soap(), 1)];
        let totals = crate::billing::compute_totals(&items, &Discount::none(), Money::from_major(50));
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 14, 5, 0).unwrap();

        let cash = SaleRecord::settle("a", at, items.clone(), Discount::none(), PaymentMethod::Cash, Money::from_major(50), &totals);
        assert_eq!(cash.cash_given, Some(Money::from_major(50)));
        assert_eq!(cash.change_due, Some(Money::from_major(5)));
        assert_eq!(cash.summary(), "₹45 • 14:05 • CASH");

        let card = SaleRecord::settle("b", at, items, Discount::none(), PaymentMethod::Card, Money::from_major(50), &totals);
        assert_eq!(card.cash_given, None);
        assert_eq!(card.change_due, None);
    }
}
