//! Blocking HTTP transport
//!
//! All network access in the crate goes through the [`HttpFetcher`] trait so
//! tests can substitute an in-memory transport. Requests are synchronous,
//! single-shot and carry an explicit timeout; there is no retry and no
//! cancellation. A failed request is reported once and the caller decides
//! what the failure means for its step.

use std::time::Duration;

use crate::error::{Result, network_failed};

/// Timeout applied to every outgoing request.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking transport for repository downloads and schema fetches
pub trait HttpFetcher {
    /// Fetch a URL and return the full response body.
    ///
    /// A non-success status is an error.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;

    /// Fetch a URL and decode the body as UTF-8 text.
    fn fetch_text(&self, url: &str) -> Result<String> {
        let bytes = self.fetch(url)?;
        String::from_utf8(bytes).map_err(|e| network_failed(url, format!("invalid UTF-8 body: {e}")))
    }
}

/// Production transport backed by a blocking reqwest client
pub struct ReqwestFetcher {
    client: reqwest::blocking::Client,
}

impl ReqwestFetcher {
    /// Build a client with the crate-wide timeout and user agent.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("catalogen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| network_failed("<client>", e.to_string()))?;

        Ok(Self { client })
    }
}

impl HttpFetcher for ReqwestFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| network_failed(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(network_failed(url, format!("HTTP {status}")));
        }

        let body = response
            .bytes()
            .map_err(|e| network_failed(url, e.to_string()))?;

        Ok(body.to_vec())
    }
}
