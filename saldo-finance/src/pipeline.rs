//! End-to-end analysis: raw rows in, summary out.
//!
//! Every call recomputes everything from the given rows; nothing is cached
//! between calls, so concurrent calls on different inputs are independent.

use chrono::Datelike;
use saldo_core::{AmountField, Category, RawTransaction, Transaction};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::accounts::aggregate_by_account;
use crate::anomaly::{AnomalyReport, detect_anomalies};
use crate::category_rules::categorize_expenses;
use crate::highlights::{Highlights, highlights};
use crate::insights::{Insight, generate_insights, share_pct};
use crate::merchants::{MerchantTotal, top_merchants};
use crate::normalize::{normalize, partition_valid};
use crate::periods::{MonthlyBucket, aggregate_by_month};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Year assigned to every compact date
    pub year: i32,
}

impl AnalyzeOptions {
    pub fn for_year(year: i32) -> Self {
        Self { year }
    }

    /// Options for the current local year.
    pub fn current() -> Self {
        Self::for_year(chrono::Local::now().year())
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self::current()
    }
}

/// Per-category expense total with its share of overall expense
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
    pub count: usize,
    pub share_pct: f64,
}

/// Everything derived from one batch of rows
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub year: i32,
    pub record_count: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub total_income: f64,
    pub total_expense: f64,
    pub net_balance: f64,
    pub monthly: Vec<MonthlyBucket>,
    pub accounts: BTreeMap<String, f64>,
    pub top_income: Vec<MerchantTotal>,
    pub top_expense: Vec<MerchantTotal>,
    /// Largest category first
    pub categories: Vec<CategoryTotal>,
    pub anomalies: AnomalyReport,
    pub insights: Vec<Insight>,
    pub highlights: Highlights,
}

/// Run the full pipeline over raw rows.
pub fn analyze(raw: &[RawTransaction], options: &AnalyzeOptions) -> Summary {
    let record_count = raw.len();
    let (valid, invalid_count) = partition_valid(normalize(raw, options.year));
    analyze_valid(&valid, record_count, invalid_count, options.year)
}

fn analyze_valid(valid: &[Transaction], record_count: usize, invalid_count: usize, year: i32) -> Summary {
    let total_income: f64 = valid.iter().map(|t| t.income).sum();
    let total_expense: f64 = valid.iter().map(|t| t.expense).sum();

    let breakdown = categorize_expenses(valid);
    let categories = breakdown
        .ranked()
        .into_iter()
        .map(|b| CategoryTotal {
            category: b.category,
            total: b.total,
            count: b.count(),
            share_pct: share_pct(b.total, total_expense),
        })
        .collect();

    let anomalies = detect_anomalies(valid, total_expense);
    let insights = generate_insights(&breakdown, total_expense);

    tracing::debug!(
        records = record_count,
        valid = valid.len(),
        invalid = invalid_count,
        anomalies = anomalies.flagged.len(),
        "analysis complete"
    );

    Summary {
        year,
        record_count,
        valid_count: valid.len(),
        invalid_count,
        total_income,
        total_expense,
        net_balance: total_income - total_expense,
        monthly: aggregate_by_month(valid),
        accounts: aggregate_by_account(valid),
        top_income: top_merchants(valid, AmountField::Income),
        top_expense: top_merchants(valid, AmountField::Expense),
        categories,
        anomalies,
        insights,
        highlights: highlights(valid),
    }
}
