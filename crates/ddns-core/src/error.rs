//! Error types for the DDNS updater
//!
//! Every failure in a run maps onto one of these variants. None of them
//! are recovered locally: the engine surfaces the first error and stops.

use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS updater
#[derive(Error, Debug)]
pub enum Error {
    /// Missing, unreadable or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network failure talking to the IP-echo service or the provider API
    #[error("Transport error: {0}")]
    Transport(String),

    /// Last-IP file could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Provider answered with a non-success status
    #[error("Failed request to GoDaddy API ({status}): {message}")]
    Api {
        /// HTTP status code returned by the provider
        status: u16,
        /// Provider-supplied message, or the raw response body
        message: String,
    },

    /// Echo service returned something that is not an IP address
    #[error("Invalid IP address: {0:?}")]
    InvalidIp(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a provider API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid IP error
    pub fn invalid_ip(value: impl Into<String>) -> Self {
        Self::InvalidIp(value.into())
    }
}
