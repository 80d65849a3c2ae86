// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session and navigation state machine for Haven.

pub mod controller;
pub mod state;

pub use controller::SessionController;
pub use state::AppState;
