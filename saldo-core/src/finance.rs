//! Finance record types: raw statement rows, normalized transactions and
//! the fixed expense category set.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Account label used when a row has no declared origin account.
pub const UNKNOWN_ACCOUNT: &str = "Desconocida";

/// A statement row as delivered by the upstream report.
///
/// Every field is optional text: the report is a serialized dataframe, so
/// amounts may arrive as JSON numbers, strings or nulls.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawTransaction {
    #[serde(rename = "FECHA", default, deserialize_with = "lenient_text")]
    pub date_text: Option<String>,
    #[serde(rename = "DESCRIPCION", default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(rename = "CARGOS / DEBE", default, deserialize_with = "lenient_text")]
    pub debit_text: Option<String>,
    #[serde(rename = "ABONOS / HABER", default, deserialize_with = "lenient_text")]
    pub credit_text: Option<String>,
    #[serde(rename = "CUENTA_ORIGEN", default, deserialize_with = "lenient_text")]
    pub origin_account: Option<String>,
}

impl RawTransaction {
    pub fn new(date_text: &str, description: &str, debit: &str, credit: &str) -> Self {
        Self {
            date_text: Some(date_text.to_string()),
            description: Some(description.to_string()),
            debit_text: Some(debit.to_string()),
            credit_text: Some(credit.to_string()),
            origin_account: None,
        }
    }

    pub fn with_account(mut self, account: &str) -> Self {
        self.origin_account = Some(account.to_string());
        self
    }
}

/// Accept a string, number, bool or null and keep it as optional text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl<'de> serde::de::Visitor<'de> for TextVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string, number or null")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
            // dataframe NaN cells surface as non-finite floats
            if v.is_finite() { Ok(Some(v.to_string())) } else { Ok(None) }
        }

        fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(TextVisitor)
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

/// A normalized transaction. One per raw row, valid or not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Original compact date text, kept for display
    pub date_text: String,
    pub description: Option<String>,
    pub origin_account: Option<String>,
    /// Parsed debit, never negative
    pub expense: f64,
    /// Parsed credit, never negative
    pub income: f64,
    /// Present only when the date text parsed
    pub date: Option<NaiveDate>,
    /// Assigned by the categorizer for expense rows
    pub category: Option<Category>,
}

impl Transaction {
    /// Valid transactions are the ones with a parsed date.
    pub fn is_valid(&self) -> bool {
        self.date.is_some()
    }

    pub fn is_expense(&self) -> bool {
        self.expense > 0.0
    }

    pub fn is_income(&self) -> bool {
        self.income > 0.0
    }

    /// Description or empty string
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Origin account, falling back to the unknown-account label.
    pub fn account_label(&self) -> &str {
        match self.origin_account.as_deref() {
            Some(a) if !a.trim().is_empty() => a,
            _ => UNKNOWN_ACCOUNT,
        }
    }

    /// Whether the chosen side of the ledger carries a positive amount.
    pub fn has_amount(&self, field: AmountField) -> bool {
        match field {
            AmountField::Income => self.is_income(),
            AmountField::Expense => self.is_expense(),
        }
    }

    /// Amount for the chosen side of the ledger.
    pub fn amount(&self, field: AmountField) -> f64 {
        match field {
            AmountField::Income => self.income,
            AmountField::Expense => self.expense,
        }
    }
}

/// Which amount column a ranking looks at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AmountField {
    Income,
    Expense,
}

/// Expense categories, in rule-evaluation order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "Servicios Básicos")]
    BasicServices,
    #[serde(rename = "Transporte")]
    Transport,
    #[serde(rename = "Comida y Restaurantes")]
    FoodAndRestaurants,
    #[serde(rename = "Suscripciones y Digital")]
    SubscriptionsAndDigital,
    #[serde(rename = "Salud")]
    Health,
    #[serde(rename = "Compras")]
    Shopping,
    #[serde(rename = "Transferencias y Retiros")]
    TransfersAndWithdrawals,
    #[serde(rename = "Otros Gastos")]
    OtherExpenses,
}

impl Category {
    /// All categories in evaluation order; the last one is the catch-all.
    pub const ALL: [Category; 8] = [
        Category::BasicServices,
        Category::Transport,
        Category::FoodAndRestaurants,
        Category::SubscriptionsAndDigital,
        Category::Health,
        Category::Shopping,
        Category::TransfersAndWithdrawals,
        Category::OtherExpenses,
    ];

    /// Display label as shown on the statement dashboard
    pub fn label(&self) -> &'static str {
        match self {
            Category::BasicServices => "Servicios Básicos",
            Category::Transport => "Transporte",
            Category::FoodAndRestaurants => "Comida y Restaurantes",
            Category::SubscriptionsAndDigital => "Suscripciones y Digital",
            Category::Health => "Salud",
            Category::Shopping => "Compras",
            Category::TransfersAndWithdrawals => "Transferencias y Retiros",
            Category::OtherExpenses => "Otros Gastos",
        }
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self, Category::OtherExpenses)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_transaction_field_names() {
        let json = r#"{
            "FECHA": "01ENE",
            "DESCRIPCION": "Pago YAPE a 987654321",
            "CARGOS / DEBE": "100",
            "ABONOS / HABER": "",
            "CUENTA_ORIGEN": "A"
        }"#;
        let raw: RawTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(raw.date_text.as_deref(), Some("01ENE"));
        assert_eq!(raw.debit_text.as_deref(), Some("100"));
        assert_eq!(raw.credit_text.as_deref(), Some(""));
        assert_eq!(raw.origin_account.as_deref(), Some("A"));
    }

    #[test]
    fn test_raw_transaction_accepts_numbers_and_nulls() {
        let json = r#"{"FECHA": "02FEB", "DESCRIPCION": null, "CARGOS / DEBE": 12.5, "ABONOS / HABER": 0}"#;
        let raw: RawTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(raw.description, None);
        assert_eq!(raw.debit_text.as_deref(), Some("12.5"));
        assert_eq!(raw.credit_text.as_deref(), Some("0"));
        assert_eq!(raw.origin_account, None);
    }

    #[test]
    fn test_account_label_fallback() {
        let mut t = Transaction {
            date_text: "01ENE".to_string(),
            description: None,
            origin_account: None,
            expense: 1.0,
            income: 0.0,
            date: None,
            category: None,
        };
        assert_eq!(t.account_label(), UNKNOWN_ACCOUNT);
        t.origin_account = Some("  ".to_string());
        assert_eq!(t.account_label(), UNKNOWN_ACCOUNT);
        t.origin_account = Some("Yape".to_string());
        assert_eq!(t.account_label(), "Yape");
    }

    #[test]
    fn test_has_amount_per_side() {
        let t = Transaction {
            date_text: "01ENE".to_string(),
            description: None,
            origin_account: None,
            expense: 0.0,
            income: 250.0,
            date: None,
            category: None,
        };
        assert!(t.has_amount(AmountField::Income));
        assert!(!t.has_amount(AmountField::Expense));
        assert!(t.is_income());
        assert!(!t.is_expense());
    }

    #[test]
    fn test_category_order_and_labels() {
        assert_eq!(Category::ALL[0].label(), "Servicios Básicos");
        assert!(Category::ALL[7].is_catch_all());
        assert_eq!(Category::SubscriptionsAndDigital.to_string(), "Suscripciones y Digital");
        let json = serde_json::to_string(&Category::Health).unwrap();
        assert_eq!(json, "\"Salud\"");
    }
}
