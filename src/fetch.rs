//! Blocking client for the QRZ Logbook API.
//!
//! One synchronous POST per run, no retries. The rest of the pipeline only
//! ever sees the finished response body (or a definitive failure), so the
//! whole core stays single-threaded and in-memory.

use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::SyncError;

/// Default QRZ Logbook API endpoint.
pub const QRZ_API_URL: &str = "https://logbook.qrz.com/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for fetching a full logbook from the QRZ Logbook API.
#[derive(Debug, Clone)]
pub struct QrzClient {
    url: String,
    timeout: Duration,
}

impl Default for QrzClient {
    fn default() -> Self {
        Self {
            url: QRZ_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl QrzClient {
    /// Create a client for the given endpoint and timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    /// The endpoint this client talks to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the full logbook for the given API key.
    ///
    /// Sends `KEY=<key>&ACTION=FETCH&OPTION=ALL` as a form POST and returns
    /// the raw response body. Transport failures (connect, timeout, read)
    /// map to [`SyncError::Network`].
    pub fn fetch_logbook(&self, api_key: &str) -> Result<String, SyncError> {
        let client = Client::builder().timeout(self.timeout).build()?;

        let params = [("KEY", api_key), ("ACTION", "FETCH"), ("OPTION", "ALL")];
        debug!("POST {}", self.url);

        let body = client.post(&self.url).form(&params).send()?.text()?;
        info!("received {} bytes from logbook API", body.len());
        Ok(body)
    }
}
