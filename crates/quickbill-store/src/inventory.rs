//! # Inventory Store
//!
//! Owned product catalog with stock counts.
//!
//! ## Stock Movements
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Stock Movements                                   │
//! │                                                                         │
//! │  commit_sale ──────► decrement(id, qty)      stock -= qty               │
//! │  refund_sale ──────► restore(id, qty)        stock += qty               │
//! │  inventory ± ──────► nudge_stock(id, delta)  max(0, stock + delta)      │
//! │  manual edit ──────► adjust_stock(id, n)     stock = n                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock is a signed count. Only `nudge_stock` floors at zero; whether a
//! commit may overdraw is decided by the caller through
//! [`InventoryStore::check_available`].

use std::collections::HashMap;

use tracing::{debug, warn};

use quickbill_core::validation::validate_product;
use quickbill_core::{CartItem, CoreError, Product, ValidationError};

use crate::error::{StoreError, StoreResult};

/// The product catalog, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    products: Vec<Product>,
}

impl InventoryStore {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an inventory from a product list.
    ///
    /// Every product is validated; duplicate ids are rejected.
    pub fn from_products(products: Vec<Product>) -> StoreResult<Self> {
        let mut store = Self::new();
        for product in products {
            store.insert(product)?;
        }
        Ok(store)
    }

    /// Adds a new product to the catalog.
    pub fn insert(&mut self, product: Product) -> StoreResult<()> {
        validate_product(&product)?;

        if self.get(&product.id).is_some() {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id,
            }
            .into());
        }

        debug!(product_id = %product.id, name = %product.name, stock = product.stock, "Product added");
        self.products.push(product);
        Ok(())
    }

    /// Looks up a product by id.
    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    fn get_mut(&mut self, product_id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == product_id)
    }

    /// All products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products whose name or category contains `term` (case-insensitive).
    pub fn search(&self, term: &str) -> Vec<&Product> {
        self.products.iter().filter(|p| p.matches_search(term)).collect()
    }

    /// Products with `stock < threshold`.
    pub fn low_stock(&self, threshold: i64) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_low_stock(threshold)).collect()
    }

    /// Sets a product's stock to `new_stock`.
    ///
    /// No floor is applied here. Returns the previous stock.
    pub fn adjust_stock(&mut self, product_id: &str, new_stock: i64) -> StoreResult<i64> {
        let product = self
            .get_mut(product_id)
            .ok_or_else(|| StoreError::product_not_found(product_id))?;

        let previous = product.stock;
        product.stock = new_stock;

        debug!(product_id, previous, new_stock, "Stock adjusted");
        Ok(previous)
    }

    /// Moves stock by `delta`, clamped at zero, then applies it through
    /// [`InventoryStore::adjust_stock`]. Returns the new stock.
    pub fn nudge_stock(&mut self, product_id: &str, delta: i64) -> StoreResult<i64> {
        let current = self
            .get(product_id)
            .map(|p| p.stock)
            .ok_or_else(|| StoreError::product_not_found(product_id))?;

        let target = current.saturating_add(delta).max(0);
        self.adjust_stock(product_id, target)?;
        Ok(target)
    }

    /// Fails with `InsufficientStock` if the lines ask for more units than
    /// are on hand, or `ProductNotFound` if a line's product is unknown.
    ///
    /// Lines for the same product are summed before comparing.
    pub fn check_available(&self, items: &[CartItem]) -> StoreResult<()> {
        for (product_id, requested) in quantities_by_product(items) {
            let product = self
                .get(product_id)
                .ok_or_else(|| StoreError::product_not_found(product_id))?;

            if !product.can_sell(requested) {
                return Err(CoreError::InsufficientStock {
                    product: product.name.clone(),
                    available: product.stock,
                    requested,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Fails with `ProductNotFound` if any line's product is unknown.
    pub fn check_known(&self, items: &[CartItem]) -> StoreResult<()> {
        match items.iter().find(|i| self.get(i.product_id()).is_none()) {
            Some(item) => Err(StoreError::product_not_found(item.product_id())),
            None => Ok(()),
        }
    }

    /// Takes each line's quantity out of stock.
    ///
    /// Callers check the lines first; unknown products are skipped with a
    /// warning.
    pub fn decrement(&mut self, items: &[CartItem]) {
        self.apply(items, -1);
    }

    /// Puts each line's quantity back into stock. Unknown products (deleted
    /// since the sale) are skipped with a warning.
    pub fn restore(&mut self, items: &[CartItem]) {
        self.apply(items, 1);
    }

    fn apply(&mut self, items: &[CartItem], sign: i64) {
        for item in items {
            match self.get_mut(item.product_id()) {
                Some(product) => product.stock = product.stock.saturating_add(sign * item.quantity),
                None => warn!(product_id = %item.product_id(), "Stock movement for unknown product skipped"),
            }
        }
    }
}

fn quantities_by_product(items: &[CartItem]) -> Vec<(&str, i64)> {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, i64> = HashMap::new();

    for item in items {
        let id = item.product_id();
        let entry = totals.entry(id).or_insert_with(|| {
            order.push(id);
            0
        });
        *entry = entry.saturating_add(item.quantity);
    }

    order
        .into_iter()
        .map(|id| (id, totals.get(id).copied().unwrap_or_default()))
        .collect()
}
