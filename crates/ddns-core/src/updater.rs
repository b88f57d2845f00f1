//! Record update strategies
//!
//! A run uses exactly one of two strategies, fixed at startup:
//!
//! - **Add**: normalize the configured `records` for the current IP and
//!   create/merge the whole set in one request
//! - **Update**: replace the single configured (type, name) record with
//!   `[{ "data": ip }]`

use crate::config::{DdnsConfig, UpdateMode};
use crate::error::{Error, Result};
use crate::records::{RecordData, RecordsConfig};
use crate::traits::DnsProvider;

/// The record update strategy for a run
#[derive(Debug, Clone, PartialEq)]
pub enum RecordUpdater {
    /// Create or merge the configured records
    Add {
        /// Records as written in the config file
        records: RecordsConfig,
    },
    /// Replace one record in place
    Update {
        /// Record type path segment
        record_type: String,
        /// Record name path segment
        name: String,
    },
}

impl RecordUpdater {
    /// Select and build the strategy for `mode` from `config`
    ///
    /// The configuration is validated for `mode` first, so a missing
    /// `records` (Add) or `type`/`name` (Update) is reported here.
    pub fn from_config(config: &DdnsConfig, mode: UpdateMode) -> Result<Self> {
        config.validate(mode)?;

        match mode {
            UpdateMode::Add => {
                let records = config
                    .records()?
                    .ok_or_else(|| Error::config("records is required when adding records"))?;
                Ok(RecordUpdater::Add { records })
            }
            UpdateMode::Update => {
                let record_type = config
                    .record_type
                    .clone()
                    .ok_or_else(|| Error::config("type is required in update mode"))?;
                let name = config
                    .name
                    .clone()
                    .ok_or_else(|| Error::config("name is required in update mode"))?;
                Ok(RecordUpdater::Update { record_type, name })
            }
        }
    }

    /// The mode this strategy implements
    pub fn mode(&self) -> UpdateMode {
        match self {
            RecordUpdater::Add { .. } => UpdateMode::Add,
            RecordUpdater::Update { .. } => UpdateMode::Update,
        }
    }

    /// Push `ip` to the provider
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: Raw provider response body
    /// - `Err(Error)`: Transport or API error from the provider
    pub async fn apply(&self, provider: &dyn DnsProvider, domain: &str, ip: &str) -> Result<String> {
        match self {
            RecordUpdater::Add { records } => {
                let descriptors = records.descriptors(ip);
                tracing::debug!(
                    "Adding {} record(s) to {} via {}",
                    descriptors.len(),
                    domain,
                    provider.provider_name()
                );
                provider.add_records(domain, &descriptors).await
            }
            RecordUpdater::Update { record_type, name } => {
                tracing::debug!(
                    "Replacing {} record {} on {} via {}",
                    record_type,
                    name,
                    domain,
                    provider.provider_name()
                );
                provider
                    .replace_records(domain, record_type, name, &[RecordData::new(ip)])
                    .await
            }
        }
    }
}
