// # State Store Trait
//
// Defines the interface for the last-known IP store.
//
// ## Purpose
//
// The state store holds a single value: the IP pushed to the provider by
// the last successful run. It is the change detection baseline; an absent
// value never matches any real IP, so the first run always applies.
//
// ## Implementations
//
// - File-based: plain text file (see `state::file`)
// - Memory: for tests and embedding (see `state::memory`)

use async_trait::async_trait;

/// Trait for state store implementations
///
/// # Trust Level: Trusted (Core Component)
///
/// Stores perform I/O for persistence only. They never decide whether an
/// update is needed (owned by `DdnsEngine`).
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Get the last-known IP
    ///
    /// # Returns
    ///
    /// - `Ok(Some(String))`: The stored IP
    /// - `Ok(None)`: Nothing stored yet
    /// - `Err(Error)`: Storage error other than absence
    async fn load(&self) -> Result<Option<String>, crate::Error>;

    /// Overwrite the last-known IP, creating the store if needed
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Successfully persisted
    /// - `Err(Error)`: Storage error
    async fn save(&self, ip: &str) -> Result<(), crate::Error>;
}
