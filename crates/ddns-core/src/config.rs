//! Configuration types for the DDNS updater
//!
//! The configuration is a single JSON object loaded once per run:
//!
//! ```json
//! {
//!   "domain": "example.com",
//!   "apiKey": "key",
//!   "secret": "secret",
//!   "records": ["www", { "name": "@", "ttl": 3600 }],
//!   "type": "A",
//!   "name": "www"
//! }
//! ```
//!
//! `records` is only read in [`UpdateMode::Add`]; `type` and `name` are only
//! read in [`UpdateMode::Update`]. `records` is kept as raw JSON until an Add
//! run asks for it, so its shape never fails an Update run.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::records::RecordsConfig;

/// Which record update strategy a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Create or merge the configured record set
    #[default]
    Add,
    /// Replace one existing (type, name) record in place
    Update,
}

impl UpdateMode {
    /// Pick the mode from the `--update-mode` flag
    pub fn from_flag(update_mode: bool) -> Self {
        if update_mode {
            UpdateMode::Update
        } else {
            UpdateMode::Add
        }
    }
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateMode::Add => f.write_str("add"),
            UpdateMode::Update => f.write_str("update"),
        }
    }
}

/// Main DDNS configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DdnsConfig {
    /// Domain whose records are managed (e.g. "example.com")
    pub domain: String,

    /// Provider API key
    /// ⚠️ NEVER log this value
    pub api_key: String,

    /// Provider API secret
    /// ⚠️ NEVER log this value
    pub secret: String,

    /// Records to create or merge (Add mode), parsed by [`DdnsConfig::records`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<Value>,

    /// Record type to replace (Update mode)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,

    /// Record name to replace (Update mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// Custom Debug implementation that hides the credentials
impl fmt::Debug for DdnsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DdnsConfig")
            .field("domain", &self.domain)
            .field("api_key", &"<REDACTED>")
            .field("secret", &"<REDACTED>")
            .field("records", &self.records)
            .field("record_type", &self.record_type)
            .field("name", &self.name)
            .finish()
    }
}

impl DdnsConfig {
    /// Create a configuration with credentials and no records
    pub fn new(
        domain: impl Into<String>,
        api_key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            api_key: api_key.into(),
            secret: secret.into(),
            records: None,
            record_type: None,
            name: None,
        }
    }

    /// Set the records used in Add mode, as they would appear in the file
    pub fn with_records(mut self, records: impl Into<Value>) -> Self {
        self.records = Some(records.into());
        self
    }

    /// Set the (type, name) pair used in Update mode
    pub fn with_target(mut self, record_type: impl Into<String>, name: impl Into<String>) -> Self {
        self.record_type = Some(record_type.into());
        self.name = Some(name.into());
        self
    }

    /// Parse a configuration from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse configuration: {}", e)))
    }

    /// Load a configuration file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::config(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse configuration file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Parse the Add-mode `records` entry
    ///
    /// Returns `Ok(None)` when the file has no `records`.
    pub fn records(&self) -> Result<Option<RecordsConfig>> {
        let Some(raw) = &self.records else {
            return Ok(None);
        };

        RecordsConfig::deserialize(raw).map(Some).map_err(|e| {
            Error::config(format!(
                "records must be a name, a record object or a list of them: {}",
                e
            ))
        })
    }

    /// Validate the configuration for the given mode
    pub fn validate(&self, mode: UpdateMode) -> Result<()> {
        if self.domain.trim().is_empty() {
            return Err(Error::config("domain cannot be empty"));
        }
        if self.api_key.is_empty() {
            return Err(Error::config("apiKey cannot be empty"));
        }
        if self.secret.is_empty() {
            return Err(Error::config("secret cannot be empty"));
        }

        match mode {
            UpdateMode::Add => match self.records()? {
                None => Err(Error::config("records is required when adding records")),
                Some(records) if records.is_empty() => {
                    Err(Error::config("records must contain at least one record"))
                }
                Some(_) => Ok(()),
            },
            UpdateMode::Update => {
                if self.record_type.as_deref().is_none_or(str::is_empty) {
                    return Err(Error::config("type is required in update mode"));
                }
                if self.name.as_deref().is_none_or(str::is_empty) {
                    return Err(Error::config("name is required in update mode"));
                }
                Ok(())
            }
        }
    }
}
