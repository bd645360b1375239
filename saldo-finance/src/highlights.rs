//! Period range and standout transactions.

use chrono::NaiveDate;
use saldo_core::{AmountField, Transaction};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Highlights {
    /// Earliest parsed date
    pub period_start: Option<NaiveDate>,
    /// Latest parsed date
    pub period_end: Option<NaiveDate>,
    pub largest_income: Option<Transaction>,
    pub largest_expense: Option<Transaction>,
}

pub fn highlights(valid: &[Transaction]) -> Highlights {
    Highlights {
        period_start: valid.iter().filter_map(|t| t.date).min(),
        period_end: valid.iter().filter_map(|t| t.date).max(),
        largest_income: largest(valid, AmountField::Income),
        largest_expense: largest(valid, AmountField::Expense),
    }
}

/// First row holding the maximum positive amount of `field`.
fn largest(valid: &[Transaction], field: AmountField) -> Option<Transaction> {
    let mut best: Option<&Transaction> = None;
    for txn in valid.iter().filter(|t| t.has_amount(field)) {
        match best {
            Some(b) if b.amount(field) >= txn.amount(field) => {}
            _ => best = Some(txn),
        }
    }
    best.cloned()
}
