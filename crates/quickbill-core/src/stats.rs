//! # Dashboard Statistics
//!
//! Aggregates derived from the sales ledger. Nothing here is stored: every
//! read rescans the records, so a refund disappears from the figures the
//! moment its record leaves the ledger.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::SaleRecord;

/// Headline figures for the dashboard tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of bills generated.
    pub total_bills: usize,
    /// Σ final_amount.
    pub total_sales: Money,
    /// Σ tax_amount (GST collected).
    pub total_tax: Money,
    /// Σ profit.
    pub total_profit: Money,
}

impl DashboardStats {
    /// Folds a set of sale records into dashboard totals.
    ///
    /// ## Example
    /// ```rust
    /// use quickbill_core::DashboardStats;
    ///
    /// let stats = DashboardStats::from_sales(&[]);
    /// assert_eq!(stats, DashboardStats::default());
    /// ```
    pub fn from_sales<'a, I>(sales: I) -> Self
    where
        I: IntoIterator<Item = &'a SaleRecord>,
    {
        sales
            .into_iter()
            .fold(DashboardStats::default(), |acc, sale| DashboardStats {
                total_bills: acc.total_bills + 1,
                total_sales: acc.total_sales + sale.final_amount,
                total_tax: acc.total_tax + sale.tax_amount,
                total_profit: acc.total_profit + sale.profit,
            })
    }
}

/// One bar pair in the "recent transaction flow" chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesFlowPoint {
    pub label: String,
    pub amount: Money,
    pub profit: Money,
}

/// Chart series for the `limit` most recent sales.
///
/// `sales` is in ledger order (most recent first). The series comes out
/// oldest first so it reads left to right, labelled `Sale 1..N`.
pub fn recent_flow(sales: &[SaleRecord], limit: usize) -> Vec<SalesFlowPoint> {
    sales
        .iter()
        .take(limit)
        .rev()
        .enumerate()
        .map(|(i, sale)| SalesFlowPoint {
            label: format!("Sale {}", i + 1),
            amount: sale.final_amount,
            profit: sale.profit,
        })
        .collect()
}
