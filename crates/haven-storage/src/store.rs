// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the RecordStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use haven_config::model::StorageConfig;
use haven_core::{Adapter, AdapterType, HavenError, HealthStatus, RecordKey, RecordStore};

use crate::database::Database;
use crate::queries;

/// SQLite-backed record store.
///
/// Wraps a [`Database`] handle and delegates all record operations to the
/// typed query module. The database is lazily initialized on the first
/// call to [`SqliteRecordStore::initialize`].
pub struct SqliteRecordStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteRecordStore {
    /// Create a new SqliteRecordStore with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: SqliteRecordStore::initialize
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Opens the database at the configured path and runs migrations.
    pub async fn initialize(&self) -> Result<(), HavenError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| HavenError::Storage {
            source: "record store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite record store initialized");
        Ok(())
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, HavenError> {
        self.db.get().ok_or_else(|| HavenError::Storage {
            source: "record store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl Adapter for SqliteRecordStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, HavenError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HavenError> {
        // Shutdown checkpoints the WAL if the DB was initialized.
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn get(&self, key: RecordKey) -> Result<Option<String>, HavenError> {
        queries::records::get_record(self.db()?, key).await
    }

    async fn set(&self, key: RecordKey, value: &str) -> Result<(), HavenError> {
        queries::records::set_record(self.db()?, key, value).await
    }

    async fn remove(&self, key: RecordKey) -> Result<(), HavenError> {
        queries::records::remove_record(self.db()?, key).await
    }

    async fn clear(&self) -> Result<(), HavenError> {
        queries::records::clear_records(self.db()?).await
    }
}
