// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Health observation log and cycle-day tracking.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use haven_core::{HavenError, RecordKey, RecordStore, RecordStoreExt};

/// Observation tag meaning "nothing unusual"; an entry with this tag and
/// no notes carries no information and is rejected.
pub const BASELINE_OBSERVATION: &str = "none";

/// One health observation. Entries are created and deleted, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthLogEntry {
    pub id: String,
    /// Calendar date the observation is about, YYYY-MM-DD.
    pub date: String,
    /// Anatomical site tag.
    pub site: String,
    /// Observation type tag; [`BASELINE_OBSERVATION`] means unremarkable.
    pub observation: String,
    pub notes: String,
    /// When the entry was recorded, RFC 3339.
    pub recorded_at: String,
}

/// Health log and cycle-day operations over the record store.
pub struct HealthService {
    store: Arc<dyn RecordStore>,
}

impl HealthService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Records a new observation at the front of the log (newest first).
    ///
    /// Rejects entries that carry no information: baseline observation
    /// with empty notes.
    pub async fn add_entry(
        &self,
        date: &str,
        site: &str,
        observation: &str,
        notes: &str,
    ) -> Result<HealthLogEntry, HavenError> {
        let notes = notes.trim();
        if notes.is_empty() && observation == BASELINE_OBSERVATION {
            return Err(HavenError::Validation(
                "entry needs notes or a non-baseline observation".to_string(),
            ));
        }
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            HavenError::Validation(format!("invalid date {date:?}, expected YYYY-MM-DD"))
        })?;

        let entry = HealthLogEntry {
            id: Uuid::new_v4().to_string(),
            date: date.to_string(),
            site: site.to_string(),
            observation: observation.to_string(),
            notes: notes.to_string(),
            recorded_at: Utc::now().to_rfc3339(),
        };

        let mut entries = self.list_entries().await?;
        entries.insert(0, entry.clone());
        self.store.set_json(RecordKey::HealthLog, &entries).await?;
        debug!(id = %entry.id, date = %entry.date, "health entry recorded");
        Ok(entry)
    }

    /// Returns all entries, newest first.
    pub async fn list_entries(&self) -> Result<Vec<HealthLogEntry>, HavenError> {
        Ok(self
            .store
            .get_json(RecordKey::HealthLog)
            .await?
            .unwrap_or_default())
    }

    /// Deletes the entry with the given id. Deleting an unknown id is a
    /// no-op.
    pub async fn delete_entry(&self, id: &str) -> Result<(), HavenError> {
        let mut entries = self.list_entries().await?;
        entries.retain(|e| e.id != id);
        self.store.set_json(RecordKey::HealthLog, &entries).await
    }

    /// Marks the date as a cycle day if unmarked, unmarks it otherwise.
    /// Returns true if the date is marked after the call.
    pub async fn toggle_cycle_day(&self, date: &str) -> Result<bool, HavenError> {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            HavenError::Validation(format!("invalid date {date:?}, expected YYYY-MM-DD"))
        })?;

        let mut days: Vec<String> = self
            .store
            .get_json(RecordKey::CycleDays)
            .await?
            .unwrap_or_default();

        let marked = if let Some(pos) = days.iter().position(|d| d == date) {
            days.remove(pos);
            false
        } else {
            days.push(date.to_string());
            true
        };

        self.store.set_json(RecordKey::CycleDays, &days).await?;
        Ok(marked)
    }

    /// Returns all marked cycle days.
    pub async fn cycle_days(&self) -> Result<Vec<String>, HavenError> {
        Ok(self
            .store
            .get_json(RecordKey::CycleDays)
            .await?
            .unwrap_or_default())
    }

    /// Destructive settings action: removes the health log and cycle days
    /// while leaving the profile and narrative intact.
    pub async fn wipe_archives(&self) -> Result<(), HavenError> {
        self.store.remove(RecordKey::HealthLog).await?;
        self.store.remove(RecordKey::CycleDays).await?;
        info!("health archives wiped");
        Ok(())
    }
}
