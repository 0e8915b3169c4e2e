//! Gemini AI provider implementation.
//!
//! One `generateContent` call per request. No retries and no client-side
//! timeout: the caller's execution limit bounds the call.

use super::{ContentProvider, ContentRequest, ProviderError};
use crate::services::metrics;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Gemini API base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";

const PROVIDER_NAME: &str = "Gemini";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Secret<String>,
    pub model: String,
    /// Overridable so tests can point at a local mock server.
    pub api_base: String,
}

/// Gemini content provider.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(concat!("landmark-service/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// `generateContent` URL including the key. Never log the result.
    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.api_base.trim_end_matches('/'),
            self.config.model,
            self.config.api_key.expose_secret()
        )
    }

    fn build_request(request: &ContentRequest) -> GenerateContentRequest {
        let mut parts = vec![ContentPart::Text {
            text: request.prompt.clone(),
        }];

        if let Some(image) = &request.image {
            parts.push(ContentPart::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
            });
        }

        GenerateContentRequest {
            contents: vec![Content { parts }],
        }
    }

    async fn send(&self, request: &ContentRequest) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(self.api_url())
            .json(&Self::build_request(request))
            .send()
            .await
            .map_err(redacted_url)?;

        let status = response.status();
        let body = response.text().await.map_err(redacted_url)?;

        if !status.is_success() {
            return Err(ProviderError::Upstream {
                provider: PROVIDER_NAME,
                status: status.as_u16(),
                body,
            });
        }

        let api_response: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(api_response.first_text().unwrap_or_default())
    }
}

/// The request URL carries the API key; keep it out of error messages.
fn redacted_url(err: reqwest::Error) -> ProviderError {
    ProviderError::Network(err.without_url())
}

#[async_trait]
impl ContentProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn generate(&self, request: &ContentRequest) -> Result<String, ProviderError> {
        tracing::debug!(
            model = %self.config.model,
            prompt_len = request.prompt.len(),
            image_len = request.image.as_ref().map(|i| i.data.len()).unwrap_or(0),
            "Sending request to Gemini API"
        );

        let started = Instant::now();
        let result = self.send(request).await;
        let elapsed = started.elapsed().as_secs_f64();
        metrics::record_gemini_latency(&self.config.model, elapsed);

        match &result {
            Ok(text) => tracing::debug!(
                model = %self.config.model,
                elapsed_secs = elapsed,
                reply_len = text.len(),
                "Gemini API call succeeded"
            ),
            Err(e) => {
                metrics::record_gemini_error(e.kind());
                tracing::warn!(
                    model = %self.config.model,
                    elapsed_secs = elapsed,
                    error = %e,
                    "Gemini API call failed"
                );
            }
        }

        result
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ContentPart {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}
