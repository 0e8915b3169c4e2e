//! Generative-AI provider abstraction.
//!
//! Handlers talk to a `ContentProvider`; the Gemini implementation is used in
//! production and the mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The API answered with a non-success status.
    #[error("{provider} API returned {status}")]
    Upstream {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Upstream { .. } => "upstream",
            ProviderError::Network(_) => "network",
            ProviderError::InvalidResponse(_) => "invalid_response",
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Upstream {
                provider,
                status,
                body,
            } => AppError::Upstream {
                service: provider,
                status,
                body,
            },
            other => AppError::InternalError(anyhow::Error::new(other)),
        }
    }
}

/// Image sent alongside the prompt, already base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

impl InlineImage {
    /// Callers always upload camera JPEGs; the MIME type is fixed.
    pub fn jpeg(data: impl Into<String>) -> Self {
        Self {
            mime_type: "image/jpeg".to_string(),
            data: data.into(),
        }
    }
}

/// One generation call: a prompt and at most one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    pub prompt: String,
    pub image: Option<InlineImage>,
}

impl ContentRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
        }
    }

    pub fn with_image(prompt: impl Into<String>, image: InlineImage) -> Self {
        Self {
            prompt: prompt.into(),
            image: Some(image),
        }
    }
}

#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Provider name used in error bodies ("<name> API error").
    fn name(&self) -> &'static str;

    /// Generate a reply and return the first candidate's text, or an empty
    /// string when the reply has none.
    async fn generate(&self, request: &ContentRequest) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn upstream_failure_maps_to_forwarded_status() {
        let err: AppError = ProviderError::Upstream {
            provider: "Gemini",
            status: 503,
            body: "overloaded".to_string(),
        }
        .into();

        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.kind(), "upstream");
    }

    #[test]
    fn undecodable_reply_is_an_internal_error() {
        let err: AppError = ProviderError::InvalidResponse("expected value".to_string()).into();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.kind(), "unhandled");
        assert!(err.to_string().contains("expected value"));
    }
}
