// # IP Source Trait
//
// Defines the interface for resolving the caller's current public IP.
//
// ## Implementations
//
// - HTTP echo service: `ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::IpSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpSource implementation */;
//     let current_ip = source.current().await?;
//     println!("current ip: {}", current_ip);
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Trait for IP source implementations
///
/// The returned value is an opaque string. Sources may trim it, but the
/// engine compares it against the stored value with plain string equality,
/// so it is not required to be a well-formed address.
///
/// # Single Shot
///
/// One call performs at most one outbound request. Sources must not retry
/// or cache across calls: every run needs a fresh answer.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the current public IP
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The current IP as reported by the source
    /// - `Err(Error)`: Transport failure, or a rejected value in strict mode
    async fn current(&self) -> Result<String, crate::Error>;
}
