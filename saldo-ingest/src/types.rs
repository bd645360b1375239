use serde::{Deserialize, Serialize};

/// Where a batch of raw rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedSource {
    /// JSON array served by the report endpoint
    Json,
    /// Semicolon-separated master report on disk
    MasterCsv,
}

/// Reply of the refresh trigger: `{"status": "success", "message": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl RefreshResponse {
    /// Only an exact "success" status allows the data to be re-read.
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Message to surface when the refresh did not succeed.
    pub fn failure_message(&self) -> String {
        self.message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "La actualización falló.".to_string())
    }
}
