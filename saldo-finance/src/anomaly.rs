//! Outlier detection over expense magnitudes.
//!
//! Threshold = mean + 2 * stddev, where
//!   mean   = total expense / number of rows with expense > 0
//!   stddev = sqrt(sum over ALL valid rows of (expense - mean)^2 / number of valid rows)
//! The denominators differ: zero-expense rows (income only) count towards
//! the deviation but not the mean.

use saldo_core::Transaction;
use serde::Serialize;

/// Width of the band above the mean, in standard deviations
pub const STDDEV_FACTOR: f64 = 2.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnomalyReport {
    /// `None` when there were no expenses to measure
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub threshold: Option<f64>,
    /// Flagged rows, largest expense first
    pub flagged: Vec<Transaction>,
}

impl AnomalyReport {
    /// Detection did not run (no expense rows).
    pub fn skipped() -> Self {
        Self::default()
    }

    pub fn was_skipped(&self) -> bool {
        self.threshold.is_none()
    }
}

/// Flag valid rows whose expense exceeds the threshold.
///
/// With no expense rows the mean is undefined and detection is skipped,
/// reporting no anomalies.
pub fn detect_anomalies(valid: &[Transaction], total_expense: f64) -> AnomalyReport {
    let expense_rows = valid.iter().filter(|t| t.is_expense()).count();
    if expense_rows == 0 {
        tracing::debug!("no expense rows, skipping anomaly detection");
        return AnomalyReport::skipped();
    }

    let mean = total_expense / expense_rows as f64;
    let squared: f64 = valid.iter().map(|t| (t.expense - mean).powi(2)).sum();
    let std_dev = (squared / valid.len() as f64).sqrt();
    let threshold = mean + STDDEV_FACTOR * std_dev;
    if !threshold.is_finite() {
        tracing::warn!(total_expense, "expense totals overflow, skipping anomaly detection");
        return AnomalyReport::skipped();
    }

    let mut flagged: Vec<Transaction> = valid
        .iter()
        .filter(|t| t.expense > threshold)
        .cloned()
        .collect();
    flagged.sort_by(|a, b| b.expense.total_cmp(&a.expense));

    tracing::debug!(mean, std_dev, threshold, flagged = flagged.len(), "anomaly detection");

    AnomalyReport {
        mean: Some(mean),
        std_dev: Some(std_dev),
        threshold: Some(threshold),
        flagged,
    }
}
