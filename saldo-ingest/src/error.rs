//! Errors surfaced at the feed boundary

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    /// The upstream report service answered with an `error` payload.
    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("unexpected feed shape: {0}")]
    Shape(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FeedError>;
