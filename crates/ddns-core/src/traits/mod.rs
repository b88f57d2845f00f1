//! Core traits for the DDNS updater
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`IpSource`]: Resolve the current public IP
//! - [`DnsProvider`]: Push records to the provider API
//! - [`StateStore`]: Persist the last-known IP between runs

pub mod dns_provider;
pub mod ip_source;
pub mod state_store;

pub use dns_provider::DnsProvider;
pub use ip_source::IpSource;
pub use state_store::StateStore;
