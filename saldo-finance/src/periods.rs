//! Monthly aggregation of valid transactions.

use saldo_core::{Transaction, month_key};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Income and expense totals for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// `YYYY-MM`
    pub month: String,
    pub income_total: f64,
    pub expense_total: f64,
}

/// Group valid transactions by `YYYY-MM`, ascending.
///
/// Rows without a date are skipped.
pub fn aggregate_by_month(valid: &[Transaction]) -> Vec<MonthlyBucket> {
    let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();

    for txn in valid {
        let Some(date) = txn.date else { continue };
        let entry = months.entry(month_key(date)).or_insert((0.0, 0.0));
        entry.0 += txn.income;
        entry.1 += txn.expense;
    }

    months
        .into_iter()
        .map(|(month, (income_total, expense_total))| MonthlyBucket {
            month,
            income_total,
            expense_total,
        })
        .collect()
}
