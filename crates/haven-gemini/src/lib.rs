// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini `generateContent` gateway for Haven.
//!
//! One HTTP client, five typed capabilities. Failures never escape a
//! capability: each one documents a fixed fallback instead.

pub mod client;
pub mod gateway;
pub mod types;

pub use client::GeminiClient;
pub use gateway::{
    CONVERSE_EMPTY_REPLY, CONVERSE_FALLBACK, CaseReport, Flashcard, GeminiGateway, ImageFindings,
    NarrativeInsight, VideoInsight,
};
