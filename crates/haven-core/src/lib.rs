// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Haven.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Haven workspace. The record store and
//! AI gateway implementations live in their own crates and implement the
//! traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HavenError;
pub use types::{AdapterType, HealthStatus, RecordKey, ScreenId, Theme};

pub use traits::{Adapter, RecordStore, RecordStoreExt};
