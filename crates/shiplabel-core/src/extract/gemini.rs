//! Google Gemini provider for address extraction.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::prompt::{build_prompt, response_schema};
use super::response::parse_address_response;
use super::{AddressExtractor, Result};
use crate::error::ExtractionError;
use crate::models::address::Address;
use crate::models::config::ExtractionConfig;

/// Longest error body kept in [`ExtractionError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Address extractor backed by the Gemini `generateContent` API.
#[derive(Clone)]
pub struct GeminiExtractor {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    default_country: String,
}

impl std::fmt::Debug for GeminiExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiExtractor")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("default_country", &self.default_country)
            .finish()
    }
}

impl GeminiExtractor {
    /// Create an extractor with default endpoint and model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_api_key(&ExtractionConfig::default(), api_key)
    }

    /// Create an extractor from configuration, reading the key from the
    /// environment.
    ///
    /// Fails with [`ExtractionError::Unavailable`] when no key is set.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        match config.api_key() {
            Some(key) => Ok(Self::with_api_key(config, key)),
            None => {
                warn!("No API key in {}, address autofill disabled", config.key_sources());
                Err(ExtractionError::Unavailable(config.key_sources()))
            }
        }
    }

    /// Create an extractor from configuration with an explicit key.
    pub fn with_api_key(config: &ExtractionConfig, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
            default_country: config.default_country.clone(),
        }
    }

    /// Set the API base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Model name in use.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full `generateContent` URL for the configured model.
    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Request body for one piece of raw text.
    pub fn request_body(&self, raw_text: &str) -> Value {
        json!({
            "contents": [{
                "parts": [{ "text": build_prompt(raw_text, &self.default_country) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        })
    }
}

impl AddressExtractor for GeminiExtractor {
    async fn extract_address(&self, raw_text: &str) -> Result<Address> {
        if raw_text.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }

        info!("Parsing address with {} ({} chars)", self.model, raw_text.len());

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .body(self.request_body(raw_text).to_string())
            .send()
            .await
            .map_err(|e| ExtractionError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExtractionError::Request(e.to_string()))?;

        if !status.is_success() {
            warn!("Gemini returned HTTP {}", status);
            return Err(ExtractionError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let text = response_text(&body)?;
        debug!("Gemini returned {} chars of structured output", text.len());

        parse_address_response(&text, &self.default_country)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Pull the generated text out of a `generateContent` response body.
pub fn response_text(body: &str) -> Result<String> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| ExtractionError::Malformed(e.to_string()))?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ExtractionError::EmptyResponse);
    }

    Ok(text)
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
