// # DNS Provider Trait
//
// Defines the interface for pushing records to the provider API.
//
// ## Implementations
//
// - GoDaddy: `ddns-provider-godaddy` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::{DnsProvider, RecordSpec};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     let records = vec![RecordSpec::named("www").to_descriptor("1.2.3.4")];
//     provider.add_records("example.com", &records).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::records::{RecordData, RecordDescriptor};

/// Trait for DNS provider implementations
///
/// # Trust Level: Untrusted
///
/// ## Allowed Capabilities
/// - ✅ Perform HTTP/HTTPS API calls to their endpoints only
/// - ✅ Parse provider-specific error responses
///
/// ## Forbidden Capabilities
/// - ❌ Retry or back off (a run is a single all-or-nothing attempt)
/// - ❌ Access the state store (owned by `DdnsEngine`)
/// - ❌ Decide whether an update is needed (owned by `DdnsEngine`)
///
/// Both operations return the raw response body on success. Callers do
/// not interpret it.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Create or merge `records` into the domain's record set
    ///
    /// # Parameters
    ///
    /// - `domain`: The managed domain (e.g., "example.com")
    /// - `records`: Fully resolved records, in order
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: Raw response body
    /// - `Err(Error)`: Transport or API error
    async fn add_records(
        &self,
        domain: &str,
        records: &[RecordDescriptor],
    ) -> Result<String, crate::Error>;

    /// Replace every record matching (`record_type`, `name`) with `records`
    ///
    /// # Parameters
    ///
    /// - `domain`: The managed domain
    /// - `record_type`: Record type path segment (e.g., "A")
    /// - `name`: Record name path segment (e.g., "www")
    /// - `records`: Replacement values
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: Raw response body
    /// - `Err(Error)`: Transport or API error
    async fn replace_records(
        &self,
        domain: &str,
        record_type: &str,
        name: &str,
        records: &[RecordData],
    ) -> Result<String, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
