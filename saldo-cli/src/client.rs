//! HTTP client for the report service.
//!
//!   GET  {base}/api/data          -> JSON rows, or {"error": "..."}
//!   POST {base}/api/data/refresh  -> {"status": "success", "message": "..."}

use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use saldo_core::RawTransaction;
use saldo_ingest::{FeedError, RefreshResponse, decode_feed};
use std::time::Duration;

use crate::config::normalize_base_url;

pub struct ReportClient {
    http: reqwest::Client,
    base_url: String,
}

impl ReportClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
        })
    }

    pub fn data_url(&self) -> String {
        format!("{}/api/data", self.base_url)
    }

    pub fn refresh_url(&self) -> String {
        format!("{}/api/data/refresh", self.base_url)
    }

    /// Retrieve the current report rows.
    pub async fn fetch_rows(&self) -> Result<Vec<RawTransaction>> {
        let url = self.data_url();
        tracing::info!(%url, "fetching report");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        let status = resp.status();
        let body = resp.text().await.context("read report body")?;

        let rows = classify_feed(status, decode_feed(&body))?;
        tracing::info!(rows = rows.len(), "report received");
        Ok(rows)
    }

    /// Ask the service to rebuild its report.
    pub async fn refresh(&self) -> Result<RefreshResponse> {
        let url = self.refresh_url();
        tracing::info!(%url, "requesting refresh");

        let resp = self
            .http
            .post(&url)
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;
        let reply: RefreshResponse = resp.json().await.context("decode refresh reply")?;
        Ok(reply)
    }

    /// Refresh, then re-read the rows. Fails without re-reading when the
    /// refresh status is anything but "success".
    pub async fn refresh_and_fetch(&self) -> Result<Vec<RawTransaction>> {
        let reply = self.refresh().await?;
        check_refresh(&reply)?;
        self.fetch_rows().await
    }
}

/// Turn an HTTP status and the decoded body into rows or one error message.
///
/// An upstream `error` payload wins over the status; rows are returned only
/// with a 2xx status.
fn classify_feed(
    status: StatusCode,
    decoded: saldo_ingest::Result<Vec<RawTransaction>>,
) -> Result<Vec<RawTransaction>> {
    match decoded {
        Ok(rows) if status.is_success() => Ok(rows),
        Ok(_) => bail!("Error en la red: {status}"),
        Err(FeedError::Upstream(msg)) => bail!("{msg}"),
        Err(e) if !status.is_success() => bail!("Error en la red: {status} ({e})"),
        Err(e) => Err(e).context("decode report feed"),
    }
}

/// Only an exact "success" reply lets the rows be re-read.
fn check_refresh(reply: &RefreshResponse) -> Result<()> {
    if !reply.is_success() {
        tracing::warn!(status = %reply.status, "refresh failed");
        bail!("Error al actualizar: {}", reply.failure_message());
    }
    if let Some(msg) = reply.message.as_deref() {
        tracing::info!("{msg}");
    }
    Ok(())
}
