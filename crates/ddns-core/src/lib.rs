// # ddns-core
//
// Core library for the GoDaddy dynamic DNS updater.
//
// ## Architecture Overview
//
// One run of the updater is a short, linear pipeline:
// - **IpSource**: Trait for resolving the caller's current public IP
// - **StateStore**: Trait for the last-known IP (change detection baseline)
// - **DnsProvider**: Trait for pushing records to the provider API
// - **RecordUpdater**: Add or Update strategy, chosen once at startup
// - **DdnsEngine**: Sequences load → fetch → compare → apply → persist
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from HTTP implementations
// 2. **Single Shot**: One attempt per run, no retries, no background tasks
// 3. **Library-First**: All core functionality can be used as a library
// 4. **Idempotency**: The state store prevents redundant provider calls

pub mod config;
pub mod engine;
pub mod error;
pub mod records;
pub mod state;
pub mod traits;
pub mod updater;

// Re-export core types for convenience
pub use config::{DdnsConfig, UpdateMode};
pub use engine::{DdnsEngine, RunOutcome};
pub use error::{Error, Result};
pub use records::{RecordData, RecordDescriptor, RecordEntry, RecordSpec, RecordsConfig};
pub use state::{FileStateStore, MemoryStateStore};
pub use traits::{DnsProvider, IpSource, StateStore};
pub use updater::RecordUpdater;
