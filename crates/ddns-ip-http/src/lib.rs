// # HTTP IP Source
//
// This crate provides the IP-echo source for the GoDaddy DNS updater.
//
// ## Behavior
//
// One GET per call against a plain-text echo service (ipify by default).
// The trimmed body is returned as is; with `strict` enabled it must also
// parse as an IP address.

use ddns_core::traits::IpSource;
use ddns_core::{Error, Result};

use std::net::IpAddr;
use std::time::Duration;

/// Default IP-echo service, returns the caller's IP as plain text
pub const DEFAULT_IP_SERVICE: &str = "https://api.ipify.org/";

/// Default HTTP timeout for the echo request
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP-based IP source
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    /// URL to fetch IP from
    url: String,

    /// Reject bodies that are not an IP address
    strict: bool,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `url`: URL to fetch IP from (e.g., "https://api.ipify.org/")
    /// - `timeout`: Per-request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            strict: false,
            client,
        })
    }

    /// Source against [`DEFAULT_IP_SERVICE`] with [`DEFAULT_HTTP_TIMEOUT`]
    pub fn ipify() -> Result<Self> {
        Self::new(DEFAULT_IP_SERVICE, DEFAULT_HTTP_TIMEOUT)
    }

    /// Require the echoed value to parse as an IP address
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// URL this source queries
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch current IP from HTTP service
    async fn fetch_ip(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("Request to {} failed: {}", self.url, e)))?;

        if !response.status().is_success() {
            return Err(Error::transport(format!(
                "IP service {} returned HTTP {}",
                self.url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response: {}", e)))?;

        let ip = body.trim();

        if self.strict && ip.parse::<IpAddr>().is_err() {
            return Err(Error::invalid_ip(ip));
        }

        Ok(ip.to_string())
    }
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<String> {
        let ip = self.fetch_ip().await?;
        tracing::debug!("IP service {} reported {}", self.url, ip);
        Ok(ip)
    }
}
