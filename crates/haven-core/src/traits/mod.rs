// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for Haven's service boundaries.

pub mod adapter;
pub mod store;

pub use adapter::Adapter;
pub use store::{RecordStore, RecordStoreExt};
