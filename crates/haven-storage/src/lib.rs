// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed record store for Haven.
//!
//! Persists the app's key-scoped JSON documents (profile, narrative log,
//! health log, cycle days) in a single `records` table, with migrations
//! embedded via refinery and all access serialized through tokio-rusqlite.

pub mod database;
pub mod memory;
pub mod migrations;
pub mod queries;
pub mod store;

pub use database::Database;
pub use memory::MemoryRecordStore;
pub use store::SqliteRecordStore;
