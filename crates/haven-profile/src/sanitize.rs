// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input sanitization for registration and profile updates.
//!
//! These mirror the input filters the registration form applies as the
//! user types: name fields keep letters and whitespace, phone fields keep
//! at most ten digits, the national id keeps at most twelve digits.

/// Digits allowed in a phone-like contact field.
pub const PHONE_MAX_DIGITS: usize = 10;

/// Digits required in a national identity number.
pub const NATIONAL_ID_DIGITS: usize = 12;

/// Keeps only letters and whitespace.
pub fn sanitize_name(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Keeps only digits, capped at [`PHONE_MAX_DIGITS`].
pub fn sanitize_phone(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_MAX_DIGITS)
        .collect()
}

/// Keeps only digits, capped at [`NATIONAL_ID_DIGITS`].
pub fn sanitize_national_id(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(NATIONAL_ID_DIGITS)
        .collect()
}

/// Upper-cases and keeps only alphanumeric characters.
pub fn sanitize_secondary_id(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
