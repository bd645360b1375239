//! Recommendations derived from the category breakdown.

use saldo_core::Category;
use serde::{Deserialize, Serialize};

use crate::category_rules::CategoryBreakdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// The category that takes the largest share of spending
    PrimaryFocus,
    /// Several subscription/digital charges worth reviewing
    SubscriptionReview,
}

/// A named figure backing an insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportingNumber {
    pub label: String,
    pub value: f64,
}

impl SupportingNumber {
    fn new(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub body: String,
    pub supporting_numbers: Vec<SupportingNumber>,
}

impl Insight {
    pub fn number(&self, label: &str) -> Option<f64> {
        self.supporting_numbers
            .iter()
            .find(|n| n.label == label)
            .map(|n| n.value)
    }
}

/// Percentage of `part` over `whole`; 0 when there is nothing to divide by
/// or either side is not finite.
pub fn share_pct(part: f64, whole: f64) -> f64 {
    let pct = if whole > 0.0 { part / whole * 100.0 } else { 0.0 };
    if pct.is_finite() { pct } else { 0.0 }
}

/// Build the insight list: primary focus first, then the subscription review.
pub fn generate_insights(categories: &CategoryBreakdown, total_expense: f64) -> Vec<Insight> {
    let mut insights = Vec::new();

    if let Some(top) = categories.top() {
        let pct = share_pct(top.total, total_expense);
        insights.push(Insight {
            kind: InsightKind::PrimaryFocus,
            title: format!("Foco Principal: {}", top.category),
            body: format!(
                "Has gastado {:.2}, que representa el {:.2}% de tus gastos totales. \
                 Revisa las transacciones en esta categoría para identificar posibles ahorros.",
                top.total, pct
            ),
            supporting_numbers: vec![
                SupportingNumber::new("total", top.total),
                SupportingNumber::new("share_pct", pct),
            ],
        });
    }

    if let Some(subs) = categories.get(Category::SubscriptionsAndDigital) {
        if subs.count() > 1 {
            insights.push(Insight {
                kind: InsightKind::SubscriptionReview,
                title: "Revisa tus Suscripciones".to_string(),
                body: format!(
                    "Detectamos {} gastos en suscripciones y servicios digitales por un total de {:.2}. \
                     ¿Sigues usando todos estos servicios?",
                    subs.count(),
                    subs.total
                ),
                supporting_numbers: vec![
                    SupportingNumber::new("count", subs.count() as f64),
                    SupportingNumber::new("total", subs.total),
                ],
            });
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category_rules::categorize_expenses;
    use saldo_core::Transaction;

    fn expense(desc: &str, amount: f64) -> Transaction {
        Transaction {
            date_text: "01ENE".to_string(),
            description: Some(desc.to_string()),
            origin_account: None,
            expense: amount,
            income: 0.0,
            date: chrono::NaiveDate::from_ymd_opt(2025, 1, 1),
            category: None,
        }
    }

    #[test]
    fn test_no_expenses_no_insights() {
        let breakdown = categorize_expenses(&[]);
        assert!(generate_insights(&breakdown, 0.0).is_empty());
    }

    #[test]
    fn test_primary_focus() {
        let txns = vec![expense("UBER", 75.0), expense("Tottus", 25.0)];
        let breakdown = categorize_expenses(&txns);
        let insights = generate_insights(&breakdown, 100.0);

        assert_eq!(insights.len(), 1);
        let focus = &insights[0];
        assert_eq!(focus.kind, InsightKind::PrimaryFocus);
        assert_eq!(focus.title, "Foco Principal: Transporte");
        assert_eq!(focus.number("share_pct"), Some(75.0));
        assert!(focus.body.contains("75.00%"));
    }

    #[test]
    fn test_single_subscription_is_not_reviewed() {
        let txns = vec![expense("NETFLIX", 40.0), expense("UBER", 10.0)];
        let insights = generate_insights(&categorize_expenses(&txns), 50.0);
        assert!(insights.iter().all(|i| i.kind != InsightKind::SubscriptionReview));
    }

    #[test]
    fn test_subscription_review() {
        let txns = vec![
            expense("NETFLIX", 40.0),
            expense("SPOTIFY", 20.0),
            expense("Sedapal", 100.0),
        ];
        let insights = generate_insights(&categorize_expenses(&txns), 160.0);
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].title, "Foco Principal: Servicios Básicos");

        let review = &insights[1];
        assert_eq!(review.kind, InsightKind::SubscriptionReview);
        assert_eq!(review.number("count"), Some(2.0));
        assert_eq!(review.number("total"), Some(60.0));
        assert!(review.body.starts_with("Detectamos 2 gastos"));
    }

    #[test]
    fn test_share_pct_guard() {
        assert_eq!(share_pct(5.0, 0.0), 0.0);
        assert_eq!(share_pct(1.0, 4.0), 25.0);
        assert_eq!(share_pct(f64::INFINITY, f64::INFINITY), 0.0);
        assert_eq!(share_pct(f64::MAX, f64::MIN_POSITIVE), 0.0);
    }
}
