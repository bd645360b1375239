//! Record normalizer: raw statement rows into typed transactions.

use saldo_core::{RawTransaction, Transaction, parse_compact_date, parse_optional_amount};

/// Normalize one raw row. Amounts default to 0; a bad date leaves `date` empty.
pub fn normalize_record(raw: &RawTransaction, year: i32) -> Transaction {
    let date_text = raw.date_text.clone().unwrap_or_default();
    let date = parse_compact_date(&date_text, year);

    Transaction {
        expense: parse_optional_amount(raw.debit_text.as_deref()),
        income: parse_optional_amount(raw.credit_text.as_deref()),
        date,
        date_text,
        description: raw.description.clone(),
        origin_account: raw.origin_account.clone(),
        category: None,
    }
}

/// Normalize every row, keeping length and order.
pub fn normalize(raw: &[RawTransaction], year: i32) -> Vec<Transaction> {
    raw.iter().map(|r| normalize_record(r, year)).collect()
}

/// Split normalized rows into (valid, invalid_count).
pub fn partition_valid(txns: Vec<Transaction>) -> (Vec<Transaction>, usize) {
    let total = txns.len();
    let valid: Vec<Transaction> = txns.into_iter().filter(Transaction::is_valid).collect();
    let invalid = total - valid.len();
    if invalid > 0 {
        tracing::debug!(invalid, "excluded rows with unparseable dates");
    }
    (valid, invalid)
}
