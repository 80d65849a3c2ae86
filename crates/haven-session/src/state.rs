// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application states.

use haven_core::ScreenId;

/// Where the app is: behind the registration gate, or inside the shell on
/// a specific screen.
///
/// There is no other state. An unregistered (or wiped, or corrupt) device
/// is always at the gate; a registered one is always on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Registration/sign-in gate; nothing else is reachable.
    Gate,
    /// Main shell with the given screen active.
    Shell(ScreenId),
}

impl AppState {
    pub fn is_gated(&self) -> bool {
        matches!(self, AppState::Gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_is_gated_and_shell_is_not() {
        assert!(AppState::Gate.is_gated());
        assert!(!AppState::Shell(ScreenId::Home).is_gated());
    }
}
