//! saldo-finance: normalization, aggregation, categorization, anomaly
//! detection and insights over statement rows

pub mod accounts;
pub mod anomaly;
pub mod category_rules;
pub mod highlights;
pub mod insights;
pub mod merchants;
pub mod normalize;
pub mod periods;
pub mod pipeline;

pub use accounts::aggregate_by_account;
pub use anomaly::{AnomalyReport, detect_anomalies};
pub use category_rules::{CategoryBreakdown, CategoryBucket, categorize, categorize_expenses};
pub use highlights::{Highlights, highlights};
pub use insights::{Insight, InsightKind, SupportingNumber, generate_insights};
pub use merchants::{MerchantTotal, TOP_N, normalize_merchant, top_merchants};
pub use normalize::{normalize, normalize_record, partition_valid};
pub use periods::{MonthlyBucket, aggregate_by_month};
pub use pipeline::{AnalyzeOptions, CategoryTotal, Summary, analyze};
