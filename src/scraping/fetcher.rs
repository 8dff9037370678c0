// HTTP fetching for scrape pages and the historical API
//
// One GET per call, bounded by the client timeout. No retry: a failure is
// reported to the caller, which turns it into an absent value.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::FetchError;
use crate::utils::redact_url;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; InflationWatch/0.1)";

/// Capability to GET a URL and return its body as text.
///
/// Production code uses [`ReqwestClient`]; tests plug in fakes.
pub trait HttpClient {
    fn get(&self, url: &str) -> std::result::Result<String, FetchError>;
}

impl<T: HttpClient + ?Sized> HttpClient for &T {
    fn get(&self, url: &str) -> std::result::Result<String, FetchError> {
        (**self).get(url)
    }
}

/// Blocking reqwest client with a per-request timeout
pub struct ReqwestClient {
    client: Client,
    timeout: Duration,
}

impl ReqwestClient {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, timeout })
    }

    /// The caller already knows the URL, and it may carry an API key, so
    /// it is stripped from the error text.
    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            return FetchError::Timeout(self.timeout);
        }
        if let Some(status) = err.status() {
            return FetchError::Status(status.as_u16());
        }

        let err = err.without_url();
        let message = match std::error::Error::source(&err) {
            Some(cause) => format!("{}: {}", err, cause),
            None => err.to_string(),
        };
        FetchError::Transport(message)
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> std::result::Result<String, FetchError> {
        let shown = redact_url(url);
        debug!("GET {}", shown);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().map_err(|e| self.classify(e))?;
        debug!("GET {} -> {} ({} bytes)", shown, status, body.len());
        Ok(body)
    }
}
