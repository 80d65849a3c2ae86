// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store trait: key-scoped persistence of opaque JSON documents.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::HavenError;
use crate::traits::adapter::Adapter;
use crate::types::RecordKey;

/// Key-scoped persistence for a fixed set of JSON documents.
///
/// Values are opaque serialized strings; the store performs no schema
/// validation. Callers decode through [`RecordStoreExt`], which treats a
/// malformed document as absent rather than an error.
#[async_trait]
pub trait RecordStore: Adapter {
    /// Returns the raw serialized document under `key`, if any.
    async fn get(&self, key: RecordKey) -> Result<Option<String>, HavenError>;

    /// Writes the raw serialized document under `key`, replacing any
    /// previous value. The write is durable when this returns.
    async fn set(&self, key: RecordKey, value: &str) -> Result<(), HavenError>;

    /// Removes the document under `key`. Removing an absent key is a no-op.
    async fn remove(&self, key: RecordKey) -> Result<(), HavenError>;

    /// Removes every document. Used by logout, which wipes all local state.
    async fn clear(&self) -> Result<(), HavenError>;
}

/// Typed decode/encode helpers over [`RecordStore`].
///
/// `get_json` is the single fail-soft boundary for schema-on-read: corrupt
/// data and no data both come back as `None`, so no caller ever needs a
/// separate "corrupt" code path.
#[async_trait]
pub trait RecordStoreExt: RecordStore {
    /// Reads and decodes the document under `key`.
    ///
    /// Returns `None` when the key is absent or the stored document does
    /// not decode as `T` (logged at warn level, never propagated).
    async fn get_json<T>(&self, key: RecordKey) -> Result<Option<T>, HavenError>
    where
        T: DeserializeOwned,
    {
        let Some(raw) = self.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key = %key, error = %e, "malformed record treated as absent");
                Ok(None)
            }
        }
    }

    /// Encodes `value` and writes it under `key`.
    async fn set_json<T>(&self, key: RecordKey, value: &T) -> Result<(), HavenError>
    where
        T: Serialize + Sync,
    {
        let raw = serde_json::to_string(value).map_err(|e| HavenError::Storage {
            source: Box::new(e),
        })?;
        self.set(key, &raw).await
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}
