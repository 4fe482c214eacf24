//! # Sales Ledger
//!
//! Completed sales, most recent first. A refund deletes its record; nothing
//! else ever removes or edits one.

use quickbill_core::stats::recent_flow;
use quickbill_core::{DashboardStats, SaleRecord, SalesFlowPoint};

/// Ordered list of completed sales (index 0 is the newest).
#[derive(Debug, Clone, Default)]
pub struct SalesLedger {
    sales: Vec<SaleRecord>,
}

impl SalesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a completed sale.
    pub fn record(&mut self, sale: SaleRecord) {
        self.sales.insert(0, sale);
    }

    pub fn find(&self, sale_id: &str) -> Option<&SaleRecord> {
        self.sales.iter().find(|s| s.id == sale_id)
    }

    /// Removes and returns the sale with `sale_id`, if present.
    pub fn remove(&mut self, sale_id: &str) -> Option<SaleRecord> {
        let index = self.sales.iter().position(|s| s.id == sale_id)?;
        Some(self.sales.remove(index))
    }

    /// All sales, newest first.
    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    pub fn iter(&self) -> impl Iterator<Item = &SaleRecord> {
        self.sales.iter()
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Dashboard totals, recomputed from every record.
    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_sales(&self.sales)
    }

    /// Chart series for the `limit` newest sales, oldest first.
    pub fn recent_flow(&self, limit: usize) -> Vec<SalesFlowPoint> {
        recent_flow(&self.sales, limit)
    }
}
