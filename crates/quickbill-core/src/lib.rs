//! # quickbill-core: Pure Business Logic for QuickBill POS
//!
//! This crate holds the billing rules of the point-of-sale as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       QuickBill Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Checkout / Inventory / Dashboard             │   │
//! │  │    Product grid ──► Cart ──► Discount + Tender ──► Commit       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ quickbill-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │ billing │ │  cart   │ │  stats  │  │   │
//! │  │   │ Product │ │  Money  │ │ Totals  │ │Checkout │ │Dashboard│  │   │
//! │  │   │  Sale   │ │ TaxRate │ │ GST     │ │ Session │ │  Stats  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO GLOBAL STATE • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 quickbill-store (stateful layer)                │   │
//! │  │        InventoryStore, SalesLedger, PosService, config          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, Discount, SaleRecord, ...)
//! - [`money`] - Decimal money type with round-half-up settlement
//! - [`billing`] - The billing engine (`compute_totals`)
//! - [`cart`] - Checkout session: cart lines, discount, tender
//! - [`stats`] - Dashboard aggregates derived from the sales ledger
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use quickbill_core::billing::compute_totals;
//! use quickbill_core::{CartItem, Discount, Money, Product, TaxRate};
//!
//! let rice = Product::new("1", "Premium Rice", "Grains")
//!     .with_prices(Money::from_major(40), Money::from_major(50))
//!     .with_stock(100)
//!     .with_tax_rate(TaxRate::from_percent(5));
//!
//! let items = vec![CartItem::new(rice, 2)];
//! let totals = compute_totals(&items, &Discount::none(), Money::zero());
//!
//! assert_eq!(totals.sub_total, Money::from_major(100));
//! assert_eq!(totals.tax_amount, Money::from_major(5));
//! assert_eq!(totals.final_amount, Money::from_major(105));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod cart;
pub mod error;
pub mod money;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use billing::{compute_totals, LineTotals, Totals};
pub use cart::CheckoutSession;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use stats::{DashboardStats, SalesFlowPoint};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency symbol used when rendering amounts.
///
/// The POS works in a single currency; there is no locale handling.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum units of one product on a single line.
///
/// Catches a mistyped quantity (1000 instead of 10) before it reaches stock.
pub const MAX_ITEM_QUANTITY: i64 = 999;
