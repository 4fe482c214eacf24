//! # POS Service
//!
//! The shared handle a till (or several) talks to.
//!
//! ## Thread Safety
//! Inventory and ledger sit behind one `Mutex`. A commit's stock check,
//! stock decrement and ledger prepend all happen under a single guard, as do
//! a refund's restore and removal, so two operators can never sell the same
//! last unit.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          PosService                                     │
//! │                                                                         │
//! │   config: StoreConfig  (read-only after construction)                   │
//! │                                                                         │
//! │   state: Mutex<StoreState> ─┬─ inventory: InventoryStore                │
//! │                             └─ ledger:    SalesLedger                   │
//! │                                                                         │
//! │   with_state(|s| ...)      read access   (products, stats, search)      │
//! │   with_state_mut(|s| ...)  write access  (commit, refund, adjust)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quickbill_core::{CheckoutSession, Money};
//! use quickbill_store::{PosService, StoreConfig};
//!
//! let service = PosService::with_starter_catalog(StoreConfig::default()).unwrap();
//! let rice = service.product("1").unwrap();
//!
//! let mut session = CheckoutSession::new();
//! session.add_product(&rice).unwrap();
//! session.set_cash_given(Money::from_major(100));
//!
//! let sale = service.checkout(&mut session).unwrap().unwrap();
//! assert_eq!(sale.final_amount, Money::from_major(53));
//! assert!(session.is_empty());
//! ```

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::{debug, info};

use quickbill_core::{
    compute_totals, CartItem, CheckoutSession, DashboardStats, Discount, Money, PaymentMethod, Product,
    SaleRecord, SalesFlowPoint, Totals,
};

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::inventory::InventoryStore;
use crate::ledger::SalesLedger;
use crate::seed::starter_products;
use crate::settlement;

/// Everything that changes while the till is open.
#[derive(Debug, Default)]
pub struct StoreState {
    pub inventory: InventoryStore,
    pub ledger: SalesLedger,
}

/// Point-in-time view for export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub store_name: String,
    pub products: Vec<Product>,
    pub sales: Vec<SaleRecord>,
    pub stats: DashboardStats,
    pub recent_flow: Vec<SalesFlowPoint>,
}

/// Thread-safe POS backend.
#[derive(Debug)]
pub struct PosService {
    config: StoreConfig,
    state: Mutex<StoreState>,
}

impl PosService {
    /// Creates a service over an existing inventory and an empty ledger.
    pub fn new(config: StoreConfig, inventory: InventoryStore) -> Self {
        info!(store = %config.store_name, products = inventory.len(), "POS service ready");
        PosService {
            config,
            state: Mutex::new(StoreState {
                inventory,
                ledger: SalesLedger::new(),
            }),
        }
    }

    /// Creates a service stocked with the starter catalog.
    pub fn with_starter_catalog(config: StoreConfig) -> StoreResult<Self> {
        let inventory = InventoryStore::from_products(starter_products())?;
        Ok(Self::new(config, inventory))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Runs `f` with read access to the state.
    ///
    /// A poisoned lock is recovered: every mutation validates before it
    /// writes, so a panic elsewhere cannot leave half-applied state.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&StoreState) -> R,
    {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Runs `f` with exclusive write access to the state.
    pub fn with_state_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut StoreState) -> R,
    {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    // =========================================================================
    // Billing
    // =========================================================================

    /// Bill preview. Touches no state.
    pub fn compute_totals(&self, items: &[CartItem], discount: &Discount, cash_given: Money) -> Totals {
        compute_totals(items, discount, cash_given)
    }

    /// Commits a sale atomically. See [`settlement::commit_sale`].
    pub fn commit_sale(
        &self,
        items: Vec<CartItem>,
        discount: Discount,
        payment_method: PaymentMethod,
        cash_given: Money,
    ) -> StoreResult<SaleRecord> {
        self.with_state_mut(|state| {
            settlement::commit_sale(
                &mut state.inventory,
                &mut state.ledger,
                items,
                discount,
                payment_method,
                cash_given,
                &self.config.checkout,
            )
        })
    }

    /// Completes the session's order.
    ///
    /// An empty cart is a no-op returning `Ok(None)`. The session is reset
    /// whether or not the commit succeeds.
    pub fn checkout(&self, session: &mut CheckoutSession) -> StoreResult<Option<SaleRecord>> {
        let order = std::mem::take(session);

        if order.is_empty() {
            debug!("Checkout with empty cart ignored");
            return Ok(None);
        }

        self.commit_sale(order.items, order.discount, order.payment_method, order.cash_given)
            .map(Some)
    }

    /// Refunds a sale in full. Unknown id returns `None`.
    pub fn refund_sale(&self, sale_id: &str) -> Option<SaleRecord> {
        self.with_state_mut(|state| settlement::refund_sale(&mut state.inventory, &mut state.ledger, sale_id))
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Sets a product's stock. Returns the previous value.
    pub fn adjust_stock(&self, product_id: &str, new_stock: i64) -> StoreResult<i64> {
        self.with_state_mut(|state| state.inventory.adjust_stock(product_id, new_stock))
    }

    /// Moves stock by `delta`, floored at zero. Returns the new value.
    pub fn nudge_stock(&self, product_id: &str, delta: i64) -> StoreResult<i64> {
        self.with_state_mut(|state| state.inventory.nudge_stock(product_id, delta))
    }

    /// Adds one configured stock step (the inventory view's `+` button).
    pub fn restock(&self, product_id: &str) -> StoreResult<i64> {
        self.nudge_stock(product_id, self.config.inventory.stock_step)
    }

    /// Removes one configured stock step (the inventory view's `−` button).
    pub fn destock(&self, product_id: &str) -> StoreResult<i64> {
        self.nudge_stock(product_id, -self.config.inventory.stock_step)
    }

    /// Adds a product to the catalog.
    pub fn add_product(&self, product: Product) -> StoreResult<()> {
        self.with_state_mut(|state| state.inventory.insert(product))
    }

    pub fn product(&self, product_id: &str) -> Option<Product> {
        self.with_state(|state| state.inventory.get(product_id).cloned())
    }

    pub fn products(&self) -> Vec<Product> {
        self.with_state(|state| state.inventory.products().to_vec())
    }

    pub fn search(&self, term: &str) -> Vec<Product> {
        self.with_state(|state| state.inventory.search(term).into_iter().cloned().collect())
    }

    /// Products under the configured low-stock threshold.
    pub fn low_stock(&self) -> Vec<Product> {
        let threshold = self.config.inventory.low_stock_threshold;
        self.with_state(|state| state.inventory.low_stock(threshold).into_iter().cloned().collect())
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    pub fn stats(&self) -> DashboardStats {
        self.with_state(|state| state.ledger.stats())
    }

    /// Sales, newest first.
    pub fn sales(&self) -> Vec<SaleRecord> {
        self.with_state(|state| state.ledger.sales().to_vec())
    }

    pub fn sale(&self, sale_id: &str) -> Option<SaleRecord> {
        self.with_state(|state| state.ledger.find(sale_id).cloned())
    }

    /// Chart series over the configured number of recent sales.
    pub fn recent_flow(&self) -> Vec<SalesFlowPoint> {
        let limit = self.config.dashboard.recent_flow_len;
        self.with_state(|state| state.ledger.recent_flow(limit))
    }

    /// Consistent copy of catalog, ledger and derived figures.
    pub fn snapshot(&self) -> StoreSnapshot {
        let limit = self.config.dashboard.recent_flow_len;
        self.with_state(|state| StoreSnapshot {
            store_name: self.config.store_name.clone(),
            products: state.inventory.products().to_vec(),
            sales: state.ledger.sales().to_vec(),
            stats: state.ledger.stats(),
            recent_flow: state.ledger.recent_flow(limit),
        })
    }

    /// [`PosService::snapshot`] as pretty-printed JSON.
    pub fn snapshot_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}
