//! Per-account movement totals.

use saldo_core::Transaction;
use std::collections::BTreeMap;

/// Sum `income + expense` per origin account.
///
/// Rows without an account are grouped under the unknown-account label.
pub fn aggregate_by_account(valid: &[Transaction]) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for txn in valid {
        *totals.entry(txn.account_label().to_string()).or_insert(0.0) += txn.income + txn.expense;
    }
    totals
}
