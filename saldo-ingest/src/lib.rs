//! saldo-ingest: decoding of the report feed (JSON boundary and master CSV).

pub mod error;
pub mod parsers;
pub mod types;

use std::path::Path;

use saldo_core::RawTransaction;

pub use error::{FeedError, Result};
pub use parsers::{decode_feed, decode_feed_value, read_master_csv, read_master_csv_from};
pub use types::{FeedSource, RefreshResponse};

impl FeedSource {
    /// Guess the source format from a file extension (`.csv` or anything else as JSON).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => FeedSource::MasterCsv,
            _ => FeedSource::Json,
        }
    }
}

/// Load raw rows from a local feed file, JSON or master CSV.
pub fn load_feed_file(path: &Path) -> Result<Vec<RawTransaction>> {
    match FeedSource::from_path(path) {
        FeedSource::MasterCsv => read_master_csv(path),
        FeedSource::Json => {
            let body = std::fs::read_to_string(path)?;
            decode_feed(&body)
        }
    }
}
