//! Record descriptors and the `records` configuration shape
//!
//! The config file accepts `records` as a bare name, a single record
//! object, or a list mixing both. [`RecordsConfig`] captures that shape once
//! at the boundary and [`RecordsConfig::descriptors`] flattens it into the
//! uniform sequence the provider receives.
//!
//! ```json
//! "records": "www"
//! "records": { "name": "www", "ttl": 3600 }
//! "records": ["www", { "name": "@", "type": "A" }]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record type applied when a record does not name one
pub const DEFAULT_RECORD_TYPE: &str = "A";

/// TTL applied when a record does not name one (the provider's minimum)
pub const DEFAULT_TTL_SECS: u32 = 600;

/// The `records` field as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordsConfig {
    /// `"records": "www"`
    Name(String),
    /// `"records": { "name": "www", ... }`
    Record(RecordSpec),
    /// `"records": ["www", { "name": "@" }]`
    List(Vec<RecordEntry>),
}

/// One element of a `records` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordEntry {
    /// Bare record name
    Name(String),
    /// Record object with optional overrides
    Record(RecordSpec),
}

/// A record object from the config file
///
/// Only `name` is required. Keys other than `name/type/data/ttl` (for
/// example `priority` or `weight`) are kept in `extra` and forwarded to the
/// provider untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSpec {
    /// Record name relative to the domain (e.g. "www" or "@")
    pub name: String,

    /// Record type, defaults to [`DEFAULT_RECORD_TYPE`]
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,

    /// Record value, defaults to the current IP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// TTL in seconds, defaults to [`DEFAULT_TTL_SECS`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,

    /// Any other provider fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A fully resolved record, as sent to the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub data: String,
    pub ttl: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body element for an in-place record replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordData {
    pub data: String,
}

impl RecordData {
    /// Create a replacement body element pointing at `ip`
    pub fn new(ip: impl Into<String>) -> Self {
        Self { data: ip.into() }
    }
}

impl RecordSpec {
    /// Create a record object that only carries a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type: None,
            data: None,
            ttl: None,
            extra: Map::new(),
        }
    }

    /// Set the record type
    pub fn with_type(mut self, record_type: impl Into<String>) -> Self {
        self.record_type = Some(record_type.into());
        self
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Resolve against the defaults for `ip`; explicit fields win
    pub fn to_descriptor(&self, ip: &str) -> RecordDescriptor {
        RecordDescriptor {
            name: self.name.clone(),
            record_type: self
                .record_type
                .clone()
                .unwrap_or_else(|| DEFAULT_RECORD_TYPE.to_string()),
            data: self.data.clone().unwrap_or_else(|| ip.to_string()),
            ttl: self.ttl.unwrap_or(DEFAULT_TTL_SECS),
            extra: self.extra.clone(),
        }
    }
}

impl RecordEntry {
    /// Resolve this entry against the defaults for `ip`
    pub fn to_descriptor(&self, ip: &str) -> RecordDescriptor {
        match self {
            RecordEntry::Name(name) => RecordSpec::named(name.as_str()).to_descriptor(ip),
            RecordEntry::Record(spec) => spec.to_descriptor(ip),
        }
    }
}

impl RecordsConfig {
    /// Number of records this configuration expands to
    pub fn len(&self) -> usize {
        match self {
            RecordsConfig::Name(_) | RecordsConfig::Record(_) => 1,
            RecordsConfig::List(entries) => entries.len(),
        }
    }

    /// Whether this configuration expands to no records at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalize into an ordered list of descriptors for `ip`
    ///
    /// Every record gets its own copy of the defaults, so fields set on one
    /// list entry never leak into the next.
    pub fn descriptors(&self, ip: &str) -> Vec<RecordDescriptor> {
        match self {
            RecordsConfig::Name(name) => vec![RecordSpec::named(name.as_str()).to_descriptor(ip)],
            RecordsConfig::Record(spec) => vec![spec.to_descriptor(ip)],
            RecordsConfig::List(entries) => {
                entries.iter().map(|entry| entry.to_descriptor(ip)).collect()
            }
        }
    }
}
