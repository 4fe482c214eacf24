//! # quickbill-store: In-Memory State Layer for QuickBill POS
//!
//! Owns the catalog and the sales ledger, and applies the billing engine
//! from `quickbill-core` to them.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       quickbill-store                                   │
//! │                                                                         │
//! │  ┌──────────────┐                                                       │
//! │  │  PosService  │  Mutex<StoreState>, StoreConfig                       │
//! │  └──────┬───────┘                                                       │
//! │         │                                                               │
//! │  ┌──────▼───────┐   commit_sale / refund_sale                           │
//! │  │  settlement  │───────────────────────────┐                           │
//! │  └──────┬───────┘                           │                           │
//! │         │                                   │                           │
//! │  ┌──────▼─────────┐                 ┌───────▼──────┐                    │
//! │  │ InventoryStore │                 │ SalesLedger  │                    │
//! │  │ products+stock │                 │ newest first │                    │
//! │  └────────────────┘                 └──────────────┘                    │
//! │                                                                         │
//! │  config (TOML + QUICKBILL_* env)    seed (starter catalog)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is persisted: state lives for the lifetime of the process.

use tracing_subscriber::EnvFilter;

pub mod config;
pub mod error;
pub mod inventory;
pub mod ledger;
pub mod seed;
pub mod service;
pub mod settlement;

pub use config::{CheckoutSettings, DashboardSettings, InventorySettings, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use inventory::InventoryStore;
pub use ledger::SalesLedger;
pub use seed::starter_products;
pub use service::{PosService, StoreSnapshot, StoreState};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,quickbill=debug";

/// Installs a `tracing` fmt subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
