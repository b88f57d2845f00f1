//! Test doubles and common utilities for engine contract tests
//!
//! These doubles record every call so tests can assert which steps of a
//! run happened, in which order, and with which values.

#![allow(dead_code)]

use ddns_core::error::{Error, Result};
use ddns_core::records::{RecordData, RecordDescriptor};
use ddns_core::traits::{DnsProvider, IpSource, StateStore};
use ddns_core::{DdnsConfig, DdnsEngine, RecordUpdater, UpdateMode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An IpSource returning a fixed value, or failing with a transport error
#[derive(Clone)]
pub struct FixedIpSource {
    ip: Option<String>,
    call_count: Arc<AtomicUsize>,
}

impl FixedIpSource {
    pub fn new(ip: &str) -> Self {
        Self {
            ip: Some(ip.to_string()),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source whose every call fails
    pub fn unreachable() -> Self {
        Self {
            ip: None,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IpSource for FixedIpSource {
    async fn current(&self) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.ip
            .clone()
            .ok_or_else(|| Error::transport("connection refused"))
    }
}

/// A call recorded by [`MockDnsProvider`]
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCall {
    Add {
        domain: String,
        records: Vec<RecordDescriptor>,
    },
    Replace {
        domain: String,
        record_type: String,
        name: String,
        records: Vec<RecordData>,
    },
}

/// A DnsProvider that records calls and optionally rejects them
#[derive(Clone, Default)]
pub struct MockDnsProvider {
    calls: Arc<Mutex<Vec<ProviderCall>>>,
    reject_with: Option<(u16, String)>,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider answering every request with `status` and `message`
    pub fn rejecting(status: u16, message: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            reject_with: Some((status, message.to_string())),
        }
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn respond(&self, call: ProviderCall) -> Result<String> {
        self.calls.lock().unwrap().push(call);
        match &self.reject_with {
            Some((status, message)) => Err(Error::api(*status, message.clone())),
            None => Ok(String::new()),
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn add_records(&self, domain: &str, records: &[RecordDescriptor]) -> Result<String> {
        self.respond(ProviderCall::Add {
            domain: domain.to_string(),
            records: records.to_vec(),
        })
    }

    async fn replace_records(
        &self,
        domain: &str,
        record_type: &str,
        name: &str,
        records: &[RecordData],
    ) -> Result<String> {
        self.respond(ProviderCall::Replace {
            domain: domain.to_string(),
            record_type: record_type.to_string(),
            name: name.to_string(),
            records: records.to_vec(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// A StateStore that tracks calls and can be told to fail on save
#[derive(Clone)]
pub struct MockStateStore {
    value: Arc<Mutex<Option<String>>>,
    save_call_count: Arc<AtomicUsize>,
    fail_on_save: bool,
}

impl MockStateStore {
    pub fn new(initial: Option<&str>) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial.map(str::to_string))),
            save_call_count: Arc::new(AtomicUsize::new(0)),
            fail_on_save: false,
        }
    }

    /// A store whose writes always fail
    pub fn read_only(initial: Option<&str>) -> Self {
        Self {
            fail_on_save: true,
            ..Self::new(initial)
        }
    }

    pub fn value(&self) -> Option<String> {
        self.value.lock().unwrap().clone()
    }

    pub fn save_call_count(&self) -> usize {
        self.save_call_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl StateStore for MockStateStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.value())
    }

    async fn save(&self, ip: &str) -> Result<()> {
        self.save_call_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_save {
            return Err(Error::storage("read-only file system"));
        }
        *self.value.lock().unwrap() = Some(ip.to_string());
        Ok(())
    }
}

/// Config with both Add and Update fields filled in
pub fn test_config() -> DdnsConfig {
    DdnsConfig::new("example.com", "test-key", "test-secret")
        .with_records("www")
        .with_target("A", "home")
}

/// Build an engine over the given doubles
pub fn engine(
    ip_source: &FixedIpSource,
    provider: &MockDnsProvider,
    state_store: &MockStateStore,
    config: &DdnsConfig,
    mode: UpdateMode,
) -> DdnsEngine {
    let updater = RecordUpdater::from_config(config, mode).expect("config is valid for mode");
    DdnsEngine::new(
        Box::new(ip_source.clone()),
        Box::new(provider.clone()),
        Box::new(state_store.clone()),
        updater,
        config.domain.clone(),
    )
}
