// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed capabilities over the Gemini client, with fixed fallbacks.
//!
//! Each capability catches every failure at this boundary and returns its
//! documented fallback instead of an error: the caller can always render
//! something. Conversation and narrative analysis fall back to fixed
//! supportive content; media analysis and report assembly fall back to
//! `None`.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use haven_config::model::GeminiConfig;
use haven_core::{Adapter, AdapterType, HavenError, HealthStatus};

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, Part};

/// Reply used when a conversation call fails outright.
pub const CONVERSE_FALLBACK: &str = "I'm here and listening. \u{1F427}";

/// Reply used when a conversation call succeeds but carries no text.
pub const CONVERSE_EMPTY_REPLY: &str = "I'm here for you, friend. \u{1F427}";

const ASSISTANT_PERSONA: &str = "You are Penny, a friendly, empathetic AI penguin assistant \
for Haven. You support survivors of sexual assault and trauma. Be kind, non-judgmental, and \
warm. Use occasional penguin emojis \u{1F427}. Never give medical advice. If a user is in \
immediate danger, tell them to press the SOS button to call the police.";

/// Structured read of an incident narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeInsight {
    pub sentiment: String,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub encouragement: Vec<String>,
}

impl Default for NarrativeInsight {
    /// The fixed supportive fallback returned when analysis fails.
    fn default() -> Self {
        Self {
            sentiment: "Deep".to_string(),
            emotions: vec!["Anxiety".to_string()],
            encouragement: vec!["You are safe now.".to_string(), "We are here.".to_string()],
        }
    }
}

/// Forensic description of an evidence image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFindings {
    pub findings: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Summary and reflection cards extracted from a testimony video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInsight {
    pub summary: String,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub title: String,
    pub description: String,
}

/// Structured police liaison report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseReport {
    pub case_summary: String,
    #[serde(default)]
    pub forensic_highlights: Vec<String>,
    #[serde(default)]
    pub police_questions: Vec<String>,
    #[serde(default)]
    pub legal_provisions: Vec<String>,
}

/// The AI request gateway: five typed capabilities over one wire call.
pub struct GeminiGateway {
    client: GeminiClient,
    config: GeminiConfig,
}

impl GeminiGateway {
    pub fn new(config: GeminiConfig) -> Result<Self, HavenError> {
        let client = GeminiClient::new(&config.base_url)?;
        Ok(Self { client, config })
    }

    /// Overrides the client base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }

    /// Resolves the credential for one call: profile override first, then
    /// the configured default. With neither, the request is still
    /// attempted and fails into the capability's fallback.
    fn resolve_key(&self, key_override: Option<&str>) -> String {
        key_override
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .or_else(|| self.config.api_key.clone())
            .unwrap_or_default()
    }

    /// Rejects media above the configured ceiling before any request.
    fn check_media_size(&self, bytes: &[u8]) -> bool {
        if bytes.len() as u64 > self.config.max_media_bytes {
            warn!(
                size = bytes.len(),
                limit = self.config.max_media_bytes,
                "media payload exceeds ceiling, skipping request"
            );
            return false;
        }
        true
    }

    /// Decodes a structured JSON response into `T`, or `None` on any
    /// failure along the way.
    async fn generate_structured<T: serde::de::DeserializeOwned>(
        &self,
        model: &str,
        key_override: Option<&str>,
        request: &GenerateContentRequest,
    ) -> Option<T> {
        let key = self.resolve_key(key_override);
        match self.client.generate(model, &key, request).await {
            Ok(response) => {
                let text = response.text()?;
                match serde_json::from_str(&text) {
                    Ok(parsed) => Some(parsed),
                    Err(e) => {
                        warn!(error = %e, "structured response did not match schema");
                        None
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, model, "gateway call failed");
                None
            }
        }
    }

    /// Free-form supportive conversation. Never fails: a dead network or
    /// bad credential produces the fixed fallback reply.
    pub async fn converse(&self, message: &str, key_override: Option<&str>) -> String {
        let request =
            GenerateContentRequest::text(message).with_system_instruction(ASSISTANT_PERSONA);
        let key = self.resolve_key(key_override);

        match self
            .client
            .generate(&self.config.chat_model, &key, &request)
            .await
        {
            Ok(response) => response
                .text()
                .unwrap_or_else(|| CONVERSE_EMPTY_REPLY.to_string()),
            Err(e) => {
                warn!(error = %e, "conversation call failed");
                CONVERSE_FALLBACK.to_string()
            }
        }
    }

    /// Analyzes an incident narrative. Never fails: the default insight
    /// stands in when the call or decode does.
    pub async fn analyze_narrative(
        &self,
        text: &str,
        key_override: Option<&str>,
    ) -> NarrativeInsight {
        let prompt = format!(
            "Analyze the following trauma report. Identify primary emotional states and \
             provide empathetic support. Tone must be non-diagnostic. Text: {text}"
        );
        let request = GenerateContentRequest::text(&prompt).with_json_schema(json!({
            "type": "OBJECT",
            "properties": {
                "sentiment": { "type": "STRING" },
                "emotions": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Detected emotional states"
                },
                "encouragement": { "type": "ARRAY", "items": { "type": "STRING" } }
            }
        }));

        self.generate_structured(&self.config.chat_model, key_override, &request)
            .await
            .unwrap_or_default()
    }

    /// Describes an evidence image for forensic documentation, or `None`
    /// when the media is oversized or the call fails.
    pub async fn analyze_image(
        &self,
        bytes: &[u8],
        media_type: &str,
        key_override: Option<&str>,
    ) -> Option<ImageFindings> {
        if !self.check_media_size(bytes) {
            return None;
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::inline_data(media_type, BASE64.encode(bytes)),
                    Part::text(
                        "Analyze this image for forensic documentation. Describe visible \
                         injuries, clothing damage, or environmental markers that could serve \
                         as evidence in a police investigation. Be objective and descriptive. \
                         Provide next steps for preservation. Return as JSON.",
                    ),
                ],
            }],
            system_instruction: None,
            generation_config: None,
        }
        .with_json_schema(json!({
            "type": "OBJECT",
            "properties": {
                "findings": { "type": "STRING" },
                "recommendations": { "type": "ARRAY", "items": { "type": "STRING" } }
            }
        }));

        self.generate_structured(&self.config.insight_model, key_override, &request)
            .await
    }

    /// Extracts a forensic summary and reflection flashcards from a
    /// testimony video, or `None` on oversize or failure.
    pub async fn analyze_video(
        &self,
        bytes: &[u8],
        media_type: &str,
        key_override: Option<&str>,
    ) -> Option<VideoInsight> {
        if !self.check_media_size(bytes) {
            return None;
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::inline_data(media_type, BASE64.encode(bytes)),
                    Part::text(
                        "Analyze this survivor testimony video. Extract a summary of the \
                         events described for forensic purposes, and 3 reflection flashcards \
                         for their recovery journey. Focus on identifying physical \
                         descriptions, locations mentioned, and emotional state. Return as \
                         JSON.",
                    ),
                ],
            }],
            system_instruction: None,
            generation_config: None,
        }
        .with_json_schema(json!({
            "type": "OBJECT",
            "properties": {
                "summary": { "type": "STRING" },
                "flashcards": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "title": { "type": "STRING" },
                            "description": { "type": "STRING" }
                        }
                    }
                }
            }
        }));

        self.generate_structured(&self.config.insight_model, key_override, &request)
            .await
    }

    /// Assembles a police liaison report from the narrative and any prior
    /// media findings, or `None` on failure.
    pub async fn build_case_report(
        &self,
        narrative: &str,
        image_findings: Option<&str>,
        video_findings: Option<&str>,
        key_override: Option<&str>,
    ) -> Option<CaseReport> {
        let prompt = format!(
            "Generate a structured 'Police Liaison Report' based on the following survivor \
             data. This report is meant to help police understand the incident quickly and \
             ensure the right charges are pressed. Include a Summary, Evidence Markers, and \
             Recommended Legal Questions. Data: Trauma Testimony: {narrative}. Image Evidence \
             Notes: {}. Video Evidence Notes: {}.",
            image_findings.unwrap_or("N/A"),
            video_findings.unwrap_or("N/A"),
        );
        let request = GenerateContentRequest::text(&prompt).with_json_schema(json!({
            "type": "OBJECT",
            "properties": {
                "caseSummary": { "type": "STRING" },
                "forensicHighlights": { "type": "ARRAY", "items": { "type": "STRING" } },
                "policeQuestions": { "type": "ARRAY", "items": { "type": "STRING" } },
                "legalProvisions": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Relevant sections of law or rights like Zero FIR"
                }
            }
        }));

        self.generate_structured(&self.config.insight_model, key_override, &request)
            .await
    }
}

#[async_trait]
impl Adapter for GeminiGateway {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Gateway
    }

    async fn health_check(&self) -> Result<HealthStatus, HavenError> {
        if self.config.api_key.is_some() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded(
                "no API key configured; calls rely on profile overrides".to_string(),
            ))
        }
    }

    async fn shutdown(&self) -> Result<(), HavenError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GeminiConfig {
        GeminiConfig {
            api_key: Some("config-key".to_string()),
            chat_model: "gemini-3-flash-preview".to_string(),
            insight_model: "gemini-3-pro-preview".to_string(),
            base_url: "http://localhost:0".to_string(),
            max_media_bytes: 1024,
        }
    }

    #[test]
    fn profile_override_wins_over_config_key() {
        let gateway = GeminiGateway::new(config()).unwrap();
        assert_eq!(gateway.resolve_key(Some("user-key")), "user-key");
        assert_eq!(gateway.resolve_key(None), "config-key");
        // An empty override falls through to the config key.
        assert_eq!(gateway.resolve_key(Some("")), "config-key");
    }

    #[test]
    fn missing_keys_resolve_to_empty_string() {
        let mut cfg = config();
        cfg.api_key = None;
        let gateway = GeminiGateway::new(cfg).unwrap();
        assert_eq!(gateway.resolve_key(None), "");
    }

    #[test]
    fn media_ceiling_is_enforced() {
        let gateway = GeminiGateway::new(config()).unwrap();
        assert!(gateway.check_media_size(&[0u8; 1024]));
        assert!(!gateway.check_media_size(&[0u8; 1025]));
    }

    #[test]
    fn narrative_fallback_is_the_fixed_supportive_default() {
        let fallback = NarrativeInsight::default();
        assert_eq!(fallback.sentiment, "Deep");
        assert_eq!(fallback.emotions, vec!["Anxiety"]);
        assert_eq!(
            fallback.encouragement,
            vec!["You are safe now.", "We are here."]
        );
    }

    #[tokio::test]
    async fn health_check_degrades_without_a_key() {
        let mut cfg = config();
        cfg.api_key = None;
        let gateway = GeminiGateway::new(cfg).unwrap();
        assert!(matches!(
            gateway.health_check().await.unwrap(),
            HealthStatus::Degraded(_)
        ));
    }
}
