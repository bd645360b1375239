//! Deterministic category rules for expense rows.
//!
//! Rules are evaluated top to bottom and the first match wins. The last rule
//! matches anything, so every expense gets exactly one category.

use regex::Regex;
use saldo_core::{Category, Transaction};
use serde::Serialize;
use std::sync::OnceLock;

/// One entry of the ordered rule list
pub struct CategoryRule {
    pub category: Category,
    pub pattern: Regex,
}

/// Pattern text per category, in evaluation order. All case-insensitive.
const RULE_PATTERNS: [(Category, &str); 8] = [
    (
        Category::BasicServices,
        r"pago de servicio|luz del sur|sedapal|calidda|movistar|claro|entel|directv",
    ),
    (
        Category::Transport,
        r"beat|uber|cabify|didi|peaje|pasaje|transporte",
    ),
    (
        Category::FoodAndRestaurants,
        r"restaurante|cafe|pardo's chicken|kfc|mcdonald's|starbucks|chifa|comida|mercado|plaza vea|wong|metro|tottus|vivanda",
    ),
    (
        Category::SubscriptionsAndDigital,
        r"netflix|spotify|disney+|hbo max|prime video|google|microsoft|apple|wow",
    ),
    (Category::Health, r"farmacia|doctor|clínica|salud|botica"),
    (
        Category::Shopping,
        r"ripley|saga falabella|h&m|zara|compras|tienda|mall|jockey plaza",
    ),
    (
        Category::TransfersAndWithdrawals,
        r"transferencia a|retiro en|envío a",
    ),
    // Catch-all, including empty descriptions
    (Category::OtherExpenses, r"(?s).*"),
];

/// The compiled rule list.
pub fn category_rules() -> &'static [CategoryRule] {
    static RULES: OnceLock<Vec<CategoryRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        RULE_PATTERNS
            .iter()
            .map(|(category, pattern)| CategoryRule {
                category: *category,
                pattern: Regex::new(&format!("(?i){pattern}")).expect("category regex"),
            })
            .collect()
    })
}

/// First-match categorization of a description.
pub fn categorize(description: &str) -> Category {
    category_rules()
        .iter()
        .find(|rule| rule.pattern.is_match(description))
        .map(|rule| rule.category)
        .unwrap_or(Category::OtherExpenses)
}

/// Expense rows of one category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBucket {
    pub category: Category,
    pub transactions: Vec<Transaction>,
    pub total: f64,
}

impl CategoryBucket {
    pub fn count(&self) -> usize {
        self.transactions.len()
    }
}

/// Categorized expenses. Buckets keep the order in which their category was
/// first seen.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryBreakdown {
    pub buckets: Vec<CategoryBucket>,
}

impl CategoryBreakdown {
    pub fn get(&self, category: Category) -> Option<&CategoryBucket> {
        self.buckets.iter().find(|b| b.category == category)
    }

    /// Sum over every bucket
    pub fn total(&self) -> f64 {
        self.buckets.iter().map(|b| b.total).sum()
    }

    /// Buckets sorted by total, largest first. Equal totals keep first-seen order.
    pub fn ranked(&self) -> Vec<&CategoryBucket> {
        let mut ranked: Vec<&CategoryBucket> = self.buckets.iter().collect();
        ranked.sort_by(|a, b| b.total.total_cmp(&a.total));
        ranked
    }

    /// The single highest-total category, if any expense exists.
    pub fn top(&self) -> Option<&CategoryBucket> {
        self.ranked().into_iter().next()
    }
}

/// Assign a category to every expense row (`expense > 0`) of `valid`.
///
/// Returns new categorized copies; the input is left untouched.
pub fn categorize_expenses(valid: &[Transaction]) -> CategoryBreakdown {
    let mut breakdown = CategoryBreakdown::default();

    for txn in valid.iter().filter(|t| t.is_expense()) {
        let category = categorize(txn.description_text());
        let mut categorized = txn.clone();
        categorized.category = Some(category);

        let idx = match breakdown.buckets.iter().position(|b| b.category == category) {
            Some(i) => i,
            None => {
                breakdown.buckets.push(CategoryBucket {
                    category,
                    transactions: Vec::new(),
                    total: 0.0,
                });
                breakdown.buckets.len() - 1
            }
        };

        let bucket = &mut breakdown.buckets[idx];
        bucket.total += categorized.expense;
        bucket.transactions.push(categorized);
    }

    tracing::debug!(categories = breakdown.buckets.len(), "categorized expenses");
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(desc: &str, amount: f64) -> Transaction {
        Transaction {
            date_text: "01ENE".to_string(),
            description: Some(desc.to_string()),
            origin_account: None,
            expense: amount,
            income: 0.0,
            date: NaiveDate::from_ymd_opt(2025, 1, 1),
            category: None,
        }
    }

    #[test]
    fn test_rule_order_matches_category_order() {
        let cats: Vec<Category> = category_rules().iter().map(|r| r.category).collect();
        assert_eq!(cats, Category::ALL.to_vec());
    }

    #[test]
    fn test_basic_services() {
        assert_eq!(categorize("PAGO DE SERVICIO LUZ"), Category::BasicServices);
        assert_eq!(categorize("Sedapal recibo 123"), Category::BasicServices);
        assert_eq!(categorize("CLARO postpago"), Category::BasicServices);
    }

    #[test]
    fn test_transport_and_food() {
        assert_eq!(categorize("UBER *TRIP"), Category::Transport);
        assert_eq!(categorize("Peaje Evitamiento"), Category::Transport);
        assert_eq!(categorize("STARBUCKS LARCOMAR"), Category::FoodAndRestaurants);
        assert_eq!(categorize("Plaza Vea Surco"), Category::FoodAndRestaurants);
    }

    #[test]
    fn test_subscriptions_health_shopping_transfers() {
        assert_eq!(categorize("NETFLIX.COM"), Category::SubscriptionsAndDigital);
        assert_eq!(categorize("Google One"), Category::SubscriptionsAndDigital);
        assert_eq!(categorize("Botica Fasa"), Category::Health);
        assert_eq!(categorize("Clínica San Felipe"), Category::Health);
        assert_eq!(categorize("SAGA FALABELLA"), Category::Shopping);
        assert_eq!(categorize("Transferencia a terceros"), Category::TransfersAndWithdrawals);
        assert_eq!(categorize("Retiro en cajero"), Category::TransfersAndWithdrawals);
    }

    #[test]
    fn test_first_match_wins() {
        // "claro" (services) is listed before "wow" (subscriptions)
        assert_eq!(categorize("Claro WOW bundle"), Category::BasicServices);
        // "uber" (transport) before "comida"
        assert_eq!(categorize("Uber comida"), Category::Transport);
    }

    #[test]
    fn test_catch_all() {
        assert_eq!(categorize("Pago YAPE a 987654321"), Category::OtherExpenses);
        assert_eq!(categorize(""), Category::OtherExpenses);
    }

    #[test]
    fn test_categorize_expenses_covers_every_expense() {
        let mut income = expense("Sueldo", 0.0);
        income.income = 3000.0;
        let txns = vec![
            expense("UBER", 20.0),
            expense("NETFLIX", 45.0),
            income,
            expense("CABIFY", 30.0),
            expense("Pago YAPE a 999", 10.0),
        ];

        let breakdown = categorize_expenses(&txns);
        let counted: usize = breakdown.buckets.iter().map(|b| b.count()).sum();
        assert_eq!(counted, 4);
        assert_eq!(breakdown.total(), 105.0);

        let transport = breakdown.get(Category::Transport).unwrap();
        assert_eq!(transport.count(), 2);
        assert_eq!(transport.total, 50.0);
        assert!(transport
            .transactions
            .iter()
            .all(|t| t.category == Some(Category::Transport)));

        // first-seen order
        assert_eq!(breakdown.buckets[0].category, Category::Transport);
        assert_eq!(breakdown.top().unwrap().category, Category::Transport);
    }

    #[test]
    fn test_ranked_ties_keep_first_seen() {
        let txns = vec![expense("NETFLIX", 50.0), expense("UBER", 50.0)];
        let breakdown = categorize_expenses(&txns);
        let ranked = breakdown.ranked();
        assert_eq!(ranked[0].category, Category::SubscriptionsAndDigital);
        assert_eq!(ranked[1].category, Category::Transport);
    }
}
