//! `POST /api/getSecret`: a short piece of trivia about a named landmark.

use super::{buffered_body, parse_json_body, record_outcome, required};
use crate::models::{Language, SecretRequest, SecretResponse};
use crate::services::{prompts, ContentRequest};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use service_core::error::AppError;

const ENDPOINT: &str = "secret";

pub async fn lookup_secret(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SecretResponse>, AppError> {
    let result = match buffered_body(&state, body) {
        Ok(body) => lookup(&state, &body).await,
        Err(err) => Err(err),
    };
    record_outcome(ENDPOINT, &result);
    result.map(Json)
}

async fn lookup(state: &AppState, body: &[u8]) -> Result<SecretResponse, AppError> {
    let provider = state.provider()?;

    let request: SecretRequest = parse_json_body(body)?;
    let landmark_name = required(request.landmark_name.as_deref(), "landmarkName")?;
    let language = Language::from_code(request.language.as_deref());

    tracing::info!(
        landmark = landmark_name,
        language = language.code(),
        "Looking up landmark secret"
    );

    let prompt = prompts::secret_prompt(landmark_name, language);
    let secret = provider.generate(&ContentRequest::text(prompt)).await?;

    Ok(SecretResponse::new(secret))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::MockProvider;
    use crate::services::PromptProfile;
    use crate::startup::test_state;
    use std::sync::Arc;

    #[tokio::test]
    async fn text_only_call_with_subject_and_language() {
        let provider = Arc::new(MockProvider::replying("Its 1348 stones whisper."));
        let state = test_state(PromptProfile::Private, Some(provider.clone()));

        let response = lookup(&state, br#"{"landmarkName":"Galata Tower","language":"es"}"#)
            .await
            .unwrap();

        assert_eq!(response, SecretResponse::new("Its 1348 stones whisper.".into()));

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].image.is_none());
        assert!(requests[0].prompt.contains("\"Galata Tower\""));
        assert!(requests[0].prompt.contains("Respond in Spanish"));
    }

    #[tokio::test]
    async fn secrets_are_not_redacted() {
        let reply = "The foundation stone reads 123456.";
        let provider = Arc::new(MockProvider::replying(reply));
        let state = test_state(PromptProfile::Private, Some(provider));

        let response = lookup(&state, br#"{"landmarkName":"Galata Tower"}"#)
            .await
            .unwrap();

        assert_eq!(response.secret, reply);
    }

    #[tokio::test]
    async fn missing_name_is_rejected_before_upstream() {
        let provider = Arc::new(MockProvider::replying("unused"));
        let state = test_state(PromptProfile::Private, Some(provider.clone()));

        let err = lookup(&state, br#"{"language":"de"}"#).await.unwrap_err();

        assert_eq!(err.to_string(), "Bad request: landmarkName is required");
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn upstream_status_is_preserved() {
        let provider = Arc::new(MockProvider::failing(403, "key revoked"));
        let state = test_state(PromptProfile::Private, Some(provider));

        let err = lookup(&state, br#"{"landmarkName":"Galata Tower"}"#)
            .await
            .unwrap_err();

        match err {
            AppError::Upstream { status, body, .. } => {
                assert_eq!(status, 403);
                assert_eq!(body, "key revoked");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }
}
