// ABOUTME: Google Gemini generation client, single attempt per call
// ABOUTME: Builds the wire envelope, classifies HTTP and payload failures, extracts text
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Gemini Provider
//!
//! Single-attempt client for the Generative Language API. Retries and
//! pacing are layered on by [`super::RetryExecutor`].
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio. A missing key is a configuration error at construction
//! time; the fallback path of the engine does not need a key at all.
//!
//! ## Failure classification
//!
//! - HTTP 429 -> throttling, retryable with backoff
//! - other HTTP 4xx -> request rejected, not retried
//! - other non-2xx -> generic service error, retryable
//! - 2xx without text payload, or a transport timeout -> empty response,
//!   retryable

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use reqwest::{Client, ClientBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::GenerationProvider;
use crate::config::EngineConfig;
use crate::errors::{AppError, AppResult};

/// Environment variable for the Gemini API key
const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

/// Content block holding prompt parts
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<ContentPart>,
}

/// A single text part
#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

/// Model generation parameters
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    top_p: f32,
    top_k: u32,
}

/// Gemini API response envelope
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

/// Body-level error from Gemini
#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini generation provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    config: EngineConfig,
}

impl GeminiProvider {
    /// Create a provider with an explicit API key
    #[must_use]
    pub fn new(api_key: impl Into<String>, config: EngineConfig) -> Self {
        let client = ClientBuilder::new()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key: api_key.into(),
            client,
            config,
        }
    }

    /// Create a provider from the `GEMINI_API_KEY` environment variable
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if the environment variable is not set.
    pub fn from_env(config: EngineConfig) -> AppResult<Self> {
        let api_key = env::var(GEMINI_API_KEY_ENV).map_err(|_| {
            AppError::config_missing(format!("{GEMINI_API_KEY_ENV} environment variable not set"))
        })?;
        if api_key.trim().is_empty() {
            return Err(AppError::config_missing(format!(
                "{GEMINI_API_KEY_ENV} environment variable is empty"
            )));
        }
        Ok(Self::new(api_key, config))
    }

    /// Build the API URL for the configured model
    fn build_url(&self, base: &str) -> String {
        format!(
            "{base}/models/{}:generateContent?key={}",
            self.config.model, self.api_key
        )
    }

    /// Build the request envelope for a prompt
    fn build_request(&self, prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![ContentPart {
                    text: prompt.to_owned(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
                top_p: self.config.top_p,
                top_k: self.config.top_k,
            },
        }
    }

    /// Issue one request against a specific base URL
    ///
    /// Split from [`GenerationProvider::generate`] so tests can point the
    /// provider at a local server.
    pub(crate) async fn generate_at(&self, base: &str, prompt: &str) -> AppResult<String> {
        let url = self.build_url(base);
        let request = self.build_request(prompt);

        debug!(model = %self.config.model, "sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(classify_transport_error)?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(map_api_error(status, &body));
        }

        extract_text(&body)
    }
}

#[async_trait::async_trait]
impl GenerationProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, prompt), fields(model = %self.config.model))]
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        self.generate_at(API_BASE_URL, prompt).await
    }
}

/// Classify a reqwest-level failure
///
/// A timeout carries no information about whether the provider produced
/// anything, so it is treated like an empty response and stays retryable.
fn classify_transport_error(error: reqwest::Error) -> AppError {
    if error.is_timeout() {
        AppError::empty_response("request timed out").with_source(error)
    } else {
        AppError::external_service(format!("HTTP request failed: {error}")).with_source(error)
    }
}

/// Map a non-2xx status to a classified error, passing the provider message
/// through when the body is parseable
fn map_api_error(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<GeminiResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .map_or_else(|| body.to_owned(), |e| e.message);

    if status == StatusCode::TOO_MANY_REQUESTS {
        AppError::throttled(message)
    } else if status.is_client_error() {
        AppError::request_rejected(format!("Gemini API rejected request ({status}): {message}"))
    } else {
        AppError::external_service(format!("Gemini API error ({status}): {message}"))
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a 2xx body
fn extract_text(body: &str) -> AppResult<String> {
    let parsed: GeminiResponse = serde_json::from_str(body).map_err(|e| {
        AppError::empty_response(format!("unparseable Gemini response: {e}")).with_source(e)
    })?;

    if let Some(error) = parsed.error {
        return Err(AppError::external_service(format!(
            "Gemini API error: {}",
            error.message
        )));
    }

    let text = parsed
        .candidates
        .as_ref()
        .and_then(|c| c.first())
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.first())
        .map(|p| p.text.clone())
        .filter(|text| !text.trim().is_empty());

    text.ok_or_else(|| AppError::empty_response("no text in Gemini response"))
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("model", &self.config.model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_request_envelope_uses_camel_case() {
        let provider = GeminiProvider::new("key", EngineConfig::default());
        let request = provider.build_request("hello");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        let config = &json["generationConfig"];
        assert!(config["maxOutputTokens"].is_number());
        assert!(config["topP"].is_number());
        assert!(config["topK"].is_number());
        assert!(config["temperature"].is_number());
    }

    #[test]
    fn test_url_embeds_key_as_query_param() {
        let provider = GeminiProvider::new("secret", EngineConfig::default());
        let url = provider.build_url(API_BASE_URL);
        assert!(url.ends_with("generateContent?key=secret"));
        assert!(url.contains("/models/gemini-2.5-flash:"));
    }

    #[test]
    fn test_extract_text_happy_path() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"[{}]"}]}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "[{}]");
    }

    #[test]
    fn test_extract_text_empty_candidates() {
        let error = extract_text(r#"{"candidates":[]}"#).unwrap_err();
        assert_eq!(error.code, ErrorCode::ExternalEmptyResponse);
    }

    #[test]
    fn test_map_api_error_classification() {
        let body = r#"{"error":{"message":"quota exhausted"}}"#;
        let throttled = map_api_error(StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(throttled.code, ErrorCode::ExternalRateLimited);
        assert_eq!(throttled.message, "quota exhausted");

        let rejected = map_api_error(StatusCode::BAD_REQUEST, body);
        assert_eq!(rejected.code, ErrorCode::ExternalRequestError);

        let server = map_api_error(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert_eq!(server.code, ErrorCode::ExternalServiceError);
    }

    #[test]
    fn test_from_env_missing_key() {
        env::remove_var(GEMINI_API_KEY_ENV);
        let error = GeminiProvider::from_env(EngineConfig::default()).unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigMissing);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let provider = GeminiProvider::new("secret", EngineConfig::default());
        let rendered = format!("{provider:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
