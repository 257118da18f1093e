//! HTTP client for the sheets endpoint

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use super::models::{parse_fetch_response, FetchedRows, ProfileSet, UpdateRequest};
use crate::profile::{ColumnUpdates, RowRef};
use crate::time::today;
use crate::{Error, Result};

const USER_AGENT: &str = concat!("casting-catalog/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Message used when a failed save comes back with an empty body
pub const DEFAULT_SAVE_ERROR: &str = "Error al guardar";

/// Client for the spreadsheet script URL
///
/// One GET returns every row of every sheet; one POST writes one row.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    http_client: reqwest::Client,
    endpoint_url: String,
}

impl SheetsClient {
    pub fn new(endpoint_url: impl Into<String>) -> Result<Self> {
        let endpoint_url = endpoint_url.into();
        if endpoint_url.trim().is_empty() {
            return Err(Error::Config("sheets endpoint URL is empty".to_string()));
        }

        // The script answers through a redirect; reqwest follows it by default
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            endpoint_url,
        })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Fetch all rows from the endpoint
    pub async fn fetch_rows(&self) -> Result<FetchedRows> {
        debug!("Fetching rows from sheets endpoint");

        let response = self.http_client.get(&self.endpoint_url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        let fetched = parse_fetch_response(&body)?;
        info!(
            rows = fetched.rows.len(),
            warnings = fetched.warnings.len(),
            "Fetched sheet rows"
        );
        Ok(fetched)
    }

    /// Fetch and normalize all rows, computing ages as of today
    pub async fn fetch_profiles(&self) -> Result<ProfileSet> {
        Ok(self.fetch_rows().await?.normalize(today()))
    }

    /// Write `updates` to the row at `row_ref`
    ///
    /// The endpoint checks `admin_secret`. A failure carries the
    /// response body as its message.
    pub async fn update_row(
        &self,
        row_ref: &RowRef,
        updates: &ColumnUpdates,
        admin_secret: &str,
    ) -> Result<()> {
        let payload = serde_json::to_string(&UpdateRequest::new(row_ref, updates, admin_secret))
            .map_err(|e| Error::Parse(e.to_string()))?;

        info!(
            sheet = %row_ref.sheet_key,
            row = row_ref.row_index,
            columns = updates.len(),
            "Sending row update"
        );

        // Plain-text body, as the script reads the raw POST contents
        let response = self
            .http_client
            .post(&self.endpoint_url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = if body.trim().is_empty() {
                DEFAULT_SAVE_ERROR.to_string()
            } else {
                body
            };
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
