//! Core DDNS engine
//!
//! The DdnsEngine is responsible for:
//! - Loading the last-known IP from the StateStore
//! - Resolving the current IP via the IpSource
//! - Skipping the run when nothing changed
//! - Applying the RecordUpdater against the DnsProvider
//! - Persisting the new IP after a successful update
//!
//! ## Run Flow
//!
//! ```text
//! LoadLast ─► FetchCurrent ─► Compare ─┬─► Skip
//!                                      │
//!                                      └─► Apply ─► Persist ─► Report
//! ```
//!
//! Any error ends the run immediately. Nothing is persisted unless the
//! provider accepted the update, so a failed run is retried in full by the
//! next invocation.

use crate::config::UpdateMode;
use crate::error::{Error, Result};
use crate::traits::{DnsProvider, IpSource, StateStore};
use crate::updater::RecordUpdater;
use tracing::{debug, error, info};

/// Outcome of a single run
#[derive(Debug)]
pub enum RunOutcome {
    /// The provider accepted the records and the new IP was stored
    Updated {
        /// Strategy used
        mode: UpdateMode,
        /// IP pushed to the provider
        ip: String,
    },

    /// Current IP matches the last-known IP, no request made
    Skipped {
        /// The unchanged IP
        ip: String,
    },

    /// A step failed; later steps did not run
    Failed(Error),
}

impl RunOutcome {
    /// Whether the run ended without error (updated or skipped)
    pub fn is_success(&self) -> bool {
        !matches!(self, RunOutcome::Failed(_))
    }

    /// Process exit status for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::Updated { .. } | RunOutcome::Skipped { .. } => 0,
            RunOutcome::Failed(_) => 1,
        }
    }

    /// The error, if the run failed
    pub fn error(&self) -> Option<&Error> {
        match self {
            RunOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Core DDNS engine
///
/// ## Lifecycle
///
/// 1. Create with [`DdnsEngine::new()`]
/// 2. Call [`DdnsEngine::run_once()`] per scheduled invocation
///
/// The engine holds no mutable state of its own; everything that must
/// survive between runs lives in the StateStore.
pub struct DdnsEngine {
    /// IP source for the current IP
    ip_source: Box<dyn IpSource>,

    /// DNS provider for pushing records
    provider: Box<dyn DnsProvider>,

    /// State store for the last-known IP
    state_store: Box<dyn StateStore>,

    /// Add or Update strategy
    updater: RecordUpdater,

    /// Domain whose records are managed
    domain: String,
}

impl DdnsEngine {
    /// Create a new DDNS engine
    ///
    /// # Parameters
    ///
    /// - `ip_source`: IP source implementation
    /// - `provider`: DNS provider implementation
    /// - `state_store`: State store implementation
    /// - `updater`: Strategy built with [`RecordUpdater::from_config()`]
    /// - `domain`: Domain whose records are managed
    pub fn new(
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        state_store: Box<dyn StateStore>,
        updater: RecordUpdater,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            ip_source,
            provider,
            state_store,
            updater,
            domain: domain.into(),
        }
    }

    /// The strategy this engine applies
    pub fn mode(&self) -> UpdateMode {
        self.updater.mode()
    }

    /// Run the pipeline once and report the outcome
    ///
    /// Logs exactly one outcome line: the skip notice or success line at
    /// INFO, or the error at ERROR.
    pub async fn run_once(&self) -> RunOutcome {
        let outcome = match self.run_steps().await {
            Ok(outcome) => outcome,
            Err(e) => RunOutcome::Failed(e),
        };

        match &outcome {
            RunOutcome::Skipped { ip } => {
                info!("No IP address change ({}). No request made", ip);
            }
            RunOutcome::Updated { mode, ip } => match mode {
                UpdateMode::Add => info!("Successfully added DNS records to ip {}", ip),
                UpdateMode::Update => info!("Successfully updated DNS records to ip {}", ip),
            },
            RunOutcome::Failed(e) => error!("{}", e),
        }

        outcome
    }

    async fn run_steps(&self) -> Result<RunOutcome> {
        // LoadLast
        let last_ip = self.state_store.load().await?;
        debug!("Last known IP: {:?}", last_ip);

        // FetchCurrent
        let current_ip = self.ip_source.current().await?;
        debug!("Current IP: {}", current_ip);

        // Compare: an absent last IP never matches
        if last_ip.as_deref() == Some(current_ip.as_str()) {
            return Ok(RunOutcome::Skipped { ip: current_ip });
        }

        // Apply
        let response = self
            .updater
            .apply(self.provider.as_ref(), &self.domain, &current_ip)
            .await?;
        debug!("Provider response: {}", response);

        // Persist
        self.state_store.save(&current_ip).await?;

        Ok(RunOutcome::Updated {
            mode: self.updater.mode(),
            ip: current_ip,
        })
    }
}
