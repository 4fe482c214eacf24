//! # Settlement
//!
//! The two state transitions of the till: committing a sale and refunding
//! one. Both take the inventory and ledger by `&mut` so the caller decides
//! how they are guarded (see [`crate::service::PosService`]).
//!
//! ## Commit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          commit_sale                                    │
//! │                                                                         │
//! │  1. validate_checkout    lines non-empty, qty ≥ 1, discount sane        │
//! │  2. stock check          all products known (+ enough units if enforced)│
//! │  3. compute_totals       billing engine                                 │
//! │  4. tender check         cash ≥ final_amount (if enforced)              │
//! │  ─────────────── nothing has changed up to here ───────────────         │
//! │  5. decrement stock                                                     │
//! │  6. prepend SaleRecord   uuid v4 id, Utc::now() timestamp               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use quickbill_core::validation::{validate_checkout, validate_tender};
use quickbill_core::{compute_totals, CartItem, Discount, Money, PaymentMethod, SaleRecord};

use crate::config::CheckoutSettings;
use crate::error::StoreResult;
use crate::inventory::InventoryStore;
use crate::ledger::SalesLedger;

/// Turns a checkout into a recorded sale.
///
/// Every check runs before the first mutation, so an `Err` leaves both
/// `inventory` and `ledger` untouched.
pub fn commit_sale(
    inventory: &mut InventoryStore,
    ledger: &mut SalesLedger,
    items: Vec<CartItem>,
    discount: Discount,
    payment_method: PaymentMethod,
    cash_given: Money,
    rules: &CheckoutSettings,
) -> StoreResult<SaleRecord> {
    validate_checkout(&items, &discount)?;

    if rules.enforce_stock_on_commit {
        inventory.check_available(&items)?;
    } else {
        inventory.check_known(&items)?;
    }

    let totals = compute_totals(&items, &discount, cash_given);
    debug!(
        sub_total = %totals.sub_total,
        discount = %totals.discount_amount,
        tax = %totals.tax_amount,
        final_amount = %totals.final_amount,
        "Checkout totals computed"
    );

    if rules.require_cash_tender {
        validate_tender(payment_method, cash_given, totals.final_amount)?;
    }

    inventory.decrement(&items);

    let sale = SaleRecord::settle(
        Uuid::new_v4().to_string(),
        Utc::now(),
        items,
        discount,
        payment_method,
        cash_given,
        &totals,
    );

    info!(
        sale_id = %sale.id,
        total = %sale.final_amount,
        items = sale.items.len(),
        method = %sale.payment_method,
        "Sale committed"
    );

    ledger.record(sale.clone());
    Ok(sale)
}

/// Reverses a sale: restores each line's stock and deletes the record.
///
/// Unknown `sale_id` is a no-op returning `None`.
pub fn refund_sale(inventory: &mut InventoryStore, ledger: &mut SalesLedger, sale_id: &str) -> Option<SaleRecord> {
    let Some(sale) = ledger.remove(sale_id) else {
        debug!(sale_id, "Refund for unknown sale ignored");
        return None;
    };

    inventory.restore(&sale.items);

    info!(sale_id, total = %sale.final_amount, items = sale.items.len(), "Sale refunded");
    Some(sale)
}
