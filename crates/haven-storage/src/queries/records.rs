// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CRUD operations on the key/value records table.

use haven_core::{HavenError, RecordKey};
use rusqlite::{OptionalExtension, params};

use crate::database::Database;

/// Get the raw value stored under `key`, if any.
pub async fn get_record(db: &Database, key: RecordKey) -> Result<Option<String>, HavenError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare("SELECT value FROM records WHERE key = ?1")?;
            let value = stmt
                .query_row(params![key], |row| row.get::<_, String>(0))
                .optional()?;
            Ok(value)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Upsert the raw value stored under `key`.
pub async fn set_record(db: &Database, key: RecordKey, value: &str) -> Result<(), HavenError> {
    let key = key.to_string();
    let value = value.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO records (key, value, updated_at)
                 VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, value],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Remove the record under `key`. Removing an absent key is a no-op.
pub async fn remove_record(db: &Database, key: RecordKey) -> Result<(), HavenError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute("DELETE FROM records WHERE key = ?1", params![key])?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Remove every record.
pub async fn clear_records(db: &Database) -> Result<(), HavenError> {
    db.connection()
        .call(|conn| {
            conn.execute("DELETE FROM records", [])?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn set_and_get_round_trips() {
        let (db, _dir) = setup_db().await;

        set_record(&db, RecordKey::Profile, r#"{"name":"Asha"}"#)
            .await
            .unwrap();
        let value = get_record(&db, RecordKey::Profile).await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"name":"Asha"}"#));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_absent_key_returns_none() {
        let (db, _dir) = setup_db().await;
        let value = get_record(&db, RecordKey::NarrativeLog).await.unwrap();
        assert!(value.is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn set_replaces_previous_value() {
        let (db, _dir) = setup_db().await;

        set_record(&db, RecordKey::CycleDays, "[]").await.unwrap();
        set_record(&db, RecordKey::CycleDays, r#"["2024-05-01"]"#)
            .await
            .unwrap();

        let value = get_record(&db, RecordKey::CycleDays).await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"["2024-05-01"]"#));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn remove_deletes_only_the_named_key() {
        let (db, _dir) = setup_db().await;

        set_record(&db, RecordKey::Profile, "{}").await.unwrap();
        set_record(&db, RecordKey::HealthLog, "[]").await.unwrap();
        remove_record(&db, RecordKey::Profile).await.unwrap();

        assert!(get_record(&db, RecordKey::Profile).await.unwrap().is_none());
        assert!(get_record(&db, RecordKey::HealthLog).await.unwrap().is_some());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn remove_absent_key_is_a_noop() {
        let (db, _dir) = setup_db().await;
        remove_record(&db, RecordKey::Profile).await.unwrap();
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn clear_wipes_every_key() {
        let (db, _dir) = setup_db().await;

        set_record(&db, RecordKey::Profile, "{}").await.unwrap();
        set_record(&db, RecordKey::NarrativeLog, "\"log\"").await.unwrap();
        set_record(&db, RecordKey::HealthLog, "[]").await.unwrap();
        set_record(&db, RecordKey::CycleDays, "[]").await.unwrap();

        clear_records(&db).await.unwrap();

        assert!(get_record(&db, RecordKey::Profile).await.unwrap().is_none());
        assert!(get_record(&db, RecordKey::NarrativeLog).await.unwrap().is_none());
        assert!(get_record(&db, RecordKey::HealthLog).await.unwrap().is_none());
        assert!(get_record(&db, RecordKey::CycleDays).await.unwrap().is_none());
        db.close().await.unwrap();
    }
}
