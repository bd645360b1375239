//! Merchant grouping: canonical keys for free-text descriptions and the
//! top counter-parties per side of the ledger.

use regex::Regex;
use saldo_core::{AmountField, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Number of entries in each ranking
pub const TOP_N: usize = 5;

/// Key used for rows without a description
pub const NO_DESCRIPTION: &str = "Sin descripción";

/// A description rewrite: first match of `pattern` is replaced by `replacement`.
pub struct MerchantRule {
    pub pattern: Regex,
    pub replacement: &'static str,
}

/// Ordered rewrite rules. Order matters: each rule sees the output of the previous one.
pub fn merchant_rules() -> &'static [MerchantRule] {
    static RULES: OnceLock<Vec<MerchantRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            // P2P payments plus the counterpart phone/account number
            (r"(?i)Pago YAPE (de|a) [0-9]+", "Pago YAPE a Terceros"),
            // Claro billing codes
            (r"(?i)CLAR[0-9]+", "Servicios (Claro)"),
            // WOW subscription billing codes
            (r"(?i)WOW[0-9]+", "Suscripción (WOW)"),
            // PLIN deposits with the sender's name
            (r"(?i)ABON PLIN-[0-9A-Za-z_\s*]+", "Recepción PLIN"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| MerchantRule {
            pattern: Regex::new(pattern).expect("merchant regex"),
            replacement,
        })
        .collect()
    })
}

/// Canonical merchant key for a description.
pub fn normalize_merchant(description: Option<&str>) -> String {
    let trimmed = description.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return NO_DESCRIPTION.to_string();
    }

    let mut key = trimmed.to_string();
    for rule in merchant_rules() {
        let replaced = rule
            .pattern
            .replace(&key, rule.replacement)
            .trim()
            .to_string();
        key = replaced;
    }
    key
}

/// A ranked counter-party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantTotal {
    pub label: String,
    pub amount: f64,
}

/// Sum `field` per canonical merchant over rows where it is positive.
///
/// Groups come back in first-seen order.
pub fn group_by_merchant(valid: &[Transaction], field: AmountField) -> Vec<MerchantTotal> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<MerchantTotal> = Vec::new();

    for txn in valid {
        if !txn.has_amount(field) {
            continue;
        }
        let amount = txn.amount(field);
        let key = normalize_merchant(txn.description.as_deref());
        match index.get(&key) {
            Some(&i) => groups[i].amount += amount,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(MerchantTotal { label: key, amount });
            }
        }
    }

    groups
}

/// Top `TOP_N` merchants for `field`, largest amount first.
/// Equal amounts keep first-seen order.
pub fn top_merchants(valid: &[Transaction], field: AmountField) -> Vec<MerchantTotal> {
    let mut groups = group_by_merchant(valid, field);
    groups.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    groups.truncate(TOP_N);
    groups
}
