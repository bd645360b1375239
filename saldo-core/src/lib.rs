//! saldo-core: core types and parsing helpers for statement analytics

pub mod amount;
pub mod finance;
pub mod time;

pub use amount::{parse_amount, parse_optional_amount};
pub use finance::{AmountField, Category, RawTransaction, Transaction, UNKNOWN_ACCOUNT};
pub use time::{month_from_abbrev, month_key, parse_compact_date, SPANISH_MONTHS};
