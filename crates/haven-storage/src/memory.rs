// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory implementation of the RecordStore trait.
//!
//! Backs the services' unit tests and the doctor's dry-run checks without
//! touching the filesystem. Same visibility guarantee as the SQLite store:
//! a completed `set` is observed by every later call.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use haven_core::{Adapter, AdapterType, HavenError, HealthStatus, RecordKey, RecordStore};

/// Record store held entirely in process memory.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<RecordKey, String>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Adapter for MemoryRecordStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, HavenError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HavenError> {
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get(&self, key: RecordKey) -> Result<Option<String>, HavenError> {
        Ok(self.records.read().await.get(&key).cloned())
    }

    async fn set(&self, key: RecordKey, value: &str) -> Result<(), HavenError> {
        self.records.write().await.insert(key, value.to_string());
        Ok(())
    }

    async fn remove(&self, key: RecordKey) -> Result<(), HavenError> {
        self.records.write().await.remove(&key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), HavenError> {
        self.records.write().await.clear();
        Ok(())
    }
}
