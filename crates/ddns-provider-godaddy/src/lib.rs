// # GoDaddy DNS Provider
//
// This crate provides the GoDaddy DNS provider for the dynamic DNS updater.
//
// ## Behavior
//
// - One HTTP request per call (PATCH to add/merge, PUT to replace)
// - Full error propagation to the engine, no retry or backoff
// - HTTP timeout configured by the caller
// - Provider error messages surfaced from the JSON `message` field
//
// ## Security Requirements
//
// - API key and secret NEVER appear in logs or Debug output
// - Provider MUST fail fast if either credential is empty
//
// ## API Reference
//
// - Add/merge records: PATCH `/v1/domains/{domain}/records`
// - Replace records: PUT `/v1/domains/{domain}/records/{type}/{name}`
// - Auth header: `Authorization: sso-key {key}:{secret}`

use async_trait::async_trait;
use ddns_core::records::{RecordData, RecordDescriptor};
use ddns_core::traits::DnsProvider;
use ddns_core::{DdnsConfig, Error, Result};
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use std::time::Duration;

/// GoDaddy API base URL
pub const GODADDY_API_BASE: &str = "https://api.godaddy.com";

/// Default HTTP timeout for API requests (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// GoDaddy DNS provider
///
/// Stateless and single-shot. All coordination is owned by `DdnsEngine`.
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the credentials.
pub struct GoDaddyProvider {
    /// API key
    /// ⚠️ NEVER log this value
    api_key: String,

    /// API secret
    /// ⚠️ NEVER log this value
    secret: String,

    /// API base URL, without trailing slash
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the credentials
impl std::fmt::Debug for GoDaddyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoDaddyProvider")
            .field("api_key", &"<REDACTED>")
            .field("secret", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GoDaddyProvider {
    /// Create a new GoDaddy provider against [`GODADDY_API_BASE`]
    ///
    /// # Parameters
    ///
    /// - `api_key`: GoDaddy API key
    /// - `secret`: GoDaddy API secret
    /// - `timeout`: Per-request timeout
    pub fn new(
        api_key: impl Into<String>,
        secret: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        let secret = secret.into();

        if api_key.is_empty() || secret.is_empty() {
            return Err(Error::config("GoDaddy API key and secret are required"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            secret,
            base_url: GODADDY_API_BASE.to_string(),
            client,
        })
    }

    /// Create a provider from the credentials in `config`
    pub fn from_config(config: &DdnsConfig, timeout: Duration) -> Result<Self> {
        Self::new(config.api_key.clone(), config.secret.clone(), timeout)
    }

    /// Point the provider at a different API base (e.g. the OTE sandbox)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// API base URL in use
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorization(&self) -> String {
        format!("sso-key {}:{}", self.api_key, self.secret)
    }

    fn records_url(&self, domain: &str) -> String {
        format!("{}/v1/domains/{}/records", self.base_url, domain)
    }

    /// Send a prepared request and map the response
    ///
    /// Only HTTP 200 counts as success; the body is returned unparsed.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String> {
        let response = request
            .header(AUTHORIZATION, self.authorization())
            .send()
            .await
            .map_err(|e| Error::transport(format!("Failed request to GoDaddy API: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read GoDaddy response: {}", e)))?;

        if status != StatusCode::OK {
            return Err(Error::api(status.as_u16(), error_message(status, &body)));
        }

        Ok(body)
    }
}

/// Extract the provider's error message from a failed response
///
/// GoDaddy answers errors with `{"code": ..., "message": ..., "fields": [...]}`.
/// Falls back to the raw body, then to the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(fields) = json.get("fields") {
            tracing::debug!("GoDaddy rejected fields: {}", fields);
        }
        if let Some(message) = json.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

#[async_trait]
impl DnsProvider for GoDaddyProvider {
    /// ```http
    /// PATCH /v1/domains/{domain}/records
    /// Authorization: sso-key <key>:<secret>
    ///
    /// [{"name": "www", "type": "A", "data": "1.2.3.4", "ttl": 600}]
    /// ```
    async fn add_records(&self, domain: &str, records: &[RecordDescriptor]) -> Result<String> {
        let url = self.records_url(domain);
        tracing::debug!("Adding {} record(s) to {}", records.len(), domain);

        self.send(self.client.patch(&url).json(records)).await
    }

    /// ```http
    /// PUT /v1/domains/{domain}/records/{type}/{name}
    /// Authorization: sso-key <key>:<secret>
    ///
    /// [{"data": "1.2.3.4"}]
    /// ```
    async fn replace_records(
        &self,
        domain: &str,
        record_type: &str,
        name: &str,
        records: &[RecordData],
    ) -> Result<String> {
        let url = format!("{}/{}/{}", self.records_url(domain), record_type, name);
        tracing::debug!("Replacing {} record {} on {}", record_type, name, domain);

        self.send(self.client.put(&url).json(records)).await
    }

    fn provider_name(&self) -> &'static str {
        "godaddy"
    }
}
