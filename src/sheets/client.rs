use std::time::Duration;

use chrono::Utc;
use reqwest::Url;
use tracing::{debug, instrument};

use super::envelope::{decode_envelope, GvizRow};
use super::sources::SheetSource;
use crate::errors::ServiceError;

pub const DEFAULT_BASE_URL: &str = "https://docs.google.com";

/// Read-only client for the visualization-query endpoints backing each sheet.
#[derive(Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
}

impl SheetsClient {
    pub fn new(timeout: Duration) -> Result<Self, ServiceError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Client against a non-default host. Tests point this at a local mock
    /// server.
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::InternalError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetch one sheet and decode its rows.
    ///
    /// A well-formed response with zero rows succeeds; a non-success status
    /// is a [`ServiceError::TransportError`] and an unexpected body a
    /// [`ServiceError::FormatError`]. Rows come back in source order and are
    /// never partially returned.
    #[instrument(skip(self), fields(sheet = source.sheet))]
    pub async fn fetch_rows(&self, source: &SheetSource) -> Result<Vec<GvizRow>, ServiceError> {
        let url = self.query_url(source)?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::TransportError(format!(
                "sheet '{}' responded with status {}",
                source.sheet, status
            )));
        }

        let body = response.text().await?;
        let rows = decode_envelope(&body)?;
        debug!(rows = rows.len(), "decoded sheet rows");
        Ok(rows)
    }

    fn query_url(&self, source: &SheetSource) -> Result<Url, ServiceError> {
        // The `t` parameter defeats intermediary caching between polls.
        let cache_buster = Utc::now().timestamp_millis().to_string();
        let endpoint = format!(
            "{}/spreadsheets/d/{}/gviz/tq",
            self.base_url, source.spreadsheet_id
        );
        Url::parse_with_params(
            &endpoint,
            &[
                ("tqx", "out:json"),
                ("sheet", source.sheet),
                ("range", source.range),
                ("t", cache_buster.as_str()),
            ],
        )
        .map_err(|e| ServiceError::InternalError(format!("invalid sheet URL: {e}")))
    }
}
