//! Gemini API client implementation
//!
//! Implements the GenerationClient trait for Google's `generateContent`
//! endpoint, requesting interleaved image and text parts in one shot.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{ContentPart, GenError, GenerationClient, InlineImage};
use crate::config::GenaiConfig;

/// Gemini multimodal generation client
pub struct GeminiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
}

impl GeminiClient {
    /// Create a new client from configuration
    ///
    /// Reads the API key from the environment variable named in the config;
    /// a missing key is a configuration error, surfaced before any request.
    pub fn from_config(config: &GenaiConfig) -> Result<Self, GenError> {
        debug!(model = %config.model, "from_config: called");
        let api_key =
            std::env::var(&config.api_key_env).map_err(|_| GenError::MissingApiKey(config.api_key_env.clone()))?;

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(GenError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Build the request body for the generateContent API
    ///
    /// Always asks for both image and text modalities; the response
    /// interleaves them per record.
    fn build_request_body(&self, parts: &[ContentPart]) -> serde_json::Value {
        debug!(%self.model, part_count = %parts.len(), "build_request_body: called");
        serde_json::json!({
            "contents": [{ "parts": parts }],
            "generationConfig": {
                "responseModalities": ["IMAGE", "TEXT"],
            },
        })
    }

    /// Extract the ordered content parts from the API response
    ///
    /// Wire parts the client does not understand (no text, no inline data)
    /// are skipped rather than treated as errors.
    fn parse_response(&self, api_response: GenerateContentResponse) -> Result<Vec<ContentPart>, GenError> {
        let wire_parts = api_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default();

        let parts: Vec<ContentPart> = wire_parts
            .into_iter()
            .filter_map(|part| match (part.text, part.inline_data) {
                (Some(text), _) => Some(ContentPart::Text(text)),
                (None, Some(image)) => Some(ContentPart::InlineImage(image)),
                (None, None) => {
                    warn!("parse_response: skipping wire part with no text or inline data");
                    None
                }
            })
            .collect();

        if parts.is_empty() {
            return Err(GenError::EmptyResponse);
        }

        debug!(part_count = %parts.len(), "parse_response: parsed");
        Ok(parts)
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, parts: Vec<ContentPart>) -> Result<Vec<ContentPart>, GenError> {
        debug!(part_count = %parts.len(), "generate: called");
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let body = self.build_request_body(&parts);

        // Single attempt by design: the caller surfaces failures to the user
        // instead of retrying.
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(GenError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, "generate: API error");
            return Err(GenError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(GenError::Network)?;
        self.parse_response(api_response)
    }
}

// ============================================================================
// API response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<WirePart>,
}

/// Raw part as it appears on the wire - tolerant of shapes we do not handle
#[derive(Debug, Deserialize)]
struct WirePart {
    text: Option<String>,
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineImage>,
}
