//! Master report CSV reader
//!
//! The report service persists its consolidated rows as a semicolon-separated
//! file with a header row:
//!   FECHA;DESCRIPCION;CARGOS / DEBE;ABONOS / HABER;CUENTA_ORIGEN
//!   01ENE;Pago YAPE a 987654321;100.0;0.0;Yape
//! Column order is taken from the header; CUENTA_ORIGEN may be missing.

use saldo_core::RawTransaction;
use std::io::Read;
use std::path::Path;

use crate::error::{FeedError, Result};

const DATE: &str = "FECHA";
const DESCRIPTION: &str = "DESCRIPCION";
const DEBIT: &str = "CARGOS / DEBE";
const CREDIT: &str = "ABONOS / HABER";
const ACCOUNT: &str = "CUENTA_ORIGEN";

/// Read a master report file from disk.
pub fn read_master_csv(path: impl AsRef<Path>) -> Result<Vec<RawTransaction>> {
    let file = std::fs::File::open(path.as_ref())?;
    let rows = read_master_csv_from(file)?;
    tracing::debug!(path = %path.as_ref().display(), rows = rows.len(), "read master report");
    Ok(rows)
}

/// Read master report rows from any reader.
pub fn read_master_csv_from<R: Read>(reader: R) -> Result<Vec<RawTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let col = |name: &str| headers.iter().position(|h| h.trim() == name);

    let date_col = col(DATE).ok_or_else(|| FeedError::Shape(format!("missing column {DATE}")))?;
    let desc_col = col(DESCRIPTION);
    let debit_col = col(DEBIT);
    let credit_col = col(CREDIT);
    let account_col = col(ACCOUNT);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        // Blank trailing lines
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        rows.push(RawTransaction {
            date_text: cell(Some(date_col)),
            description: cell(desc_col),
            debit_text: cell(debit_col),
            credit_text: cell(credit_col),
            origin_account: cell(account_col),
        });
    }

    Ok(rows)
}
