//! JSON report feed decoder
//!
//! The report endpoint answers either with an array of row objects:
//!   [{"FECHA": "01ENE", "DESCRIPCION": "...", "CARGOS / DEBE": 100.0,
//!     "ABONOS / HABER": 0.0, "CUENTA_ORIGEN": "Yape"}, ...]
//! or, when it could not build the report, with `{"error": "..."}`.

use saldo_core::RawTransaction;
use serde_json::Value;

use crate::error::{FeedError, Result};

/// Decode a feed body into raw rows.
///
/// An `error` object becomes `FeedError::Upstream`; the rows are never
/// analyzed in that case.
pub fn decode_feed(body: &str) -> Result<Vec<RawTransaction>> {
    let value: Value = serde_json::from_str(body)?;
    decode_feed_value(value)
}

/// Same as [`decode_feed`] for an already-parsed JSON value.
pub fn decode_feed_value(value: Value) -> Result<Vec<RawTransaction>> {
    match value {
        Value::Array(_) => {
            let rows: Vec<RawTransaction> = serde_json::from_value(value)?;
            tracing::debug!(rows = rows.len(), "decoded JSON feed");
            Ok(rows)
        }
        Value::Object(map) => match map.get("error") {
            Some(err) => {
                let msg = match err {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                tracing::warn!(error = %msg, "upstream reported a failure");
                Err(FeedError::Upstream(msg))
            }
            None => Err(FeedError::Shape("object without an `error` field".to_string())),
        },
        other => Err(FeedError::Shape(format!("expected an array, got {}", kind(&other)))),
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
