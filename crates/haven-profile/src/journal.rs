// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only incident narrative journal.

use std::sync::Arc;

use chrono::Local;
use tracing::debug;

use haven_core::{HavenError, RecordKey, RecordStore};

/// The narrative journal: one growing text blob, each entry on its own
/// timestamp-prefixed line. Entries are never edited, reordered, or
/// truncated; the case-report builder reads the blob verbatim.
pub struct JournalService {
    store: Arc<dyn RecordStore>,
}

impl JournalService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Appends a timestamp-prefixed entry to the narrative log.
    pub async fn append(&self, text: &str) -> Result<(), HavenError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(HavenError::Validation(
                "narrative entry must not be empty".to_string(),
            ));
        }

        let existing = self
            .store
            .get(RecordKey::NarrativeLog)
            .await?
            .map(|raw| serde_json::from_str::<String>(&raw).unwrap_or(raw))
            .unwrap_or_default();

        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let entry = format!("[{stamp}] {text}");
        let updated = if existing.is_empty() {
            entry
        } else {
            format!("{existing}\n{entry}")
        };

        let raw = serde_json::to_string(&updated).map_err(|e| HavenError::Storage {
            source: Box::new(e),
        })?;
        self.store.set(RecordKey::NarrativeLog, &raw).await?;
        debug!(chars = updated.len(), "narrative entry appended");
        Ok(())
    }

    /// Returns the full narrative text, empty if nothing was journaled.
    pub async fn read(&self) -> Result<String, HavenError> {
        let raw = self.store.get(RecordKey::NarrativeLog).await?;
        Ok(raw
            .map(|raw| serde_json::from_str::<String>(&raw).unwrap_or(raw))
            .unwrap_or_default())
    }
}
