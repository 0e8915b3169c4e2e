//! `POST /api/gemini`: describe or classify a landmark photo.

use super::{buffered_body, parse_json_body, record_outcome, required};
use crate::models::{AnalysisRequest, AnalysisResponse, Language};
use crate::services::prompts::{self, PromptContext};
use crate::services::{redact, ContentRequest, InlineImage, RequestKind};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use service_core::error::AppError;

const ENDPOINT: &str = "analysis";

pub async fn analyze_image(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let result = match buffered_body(&state, body) {
        Ok(body) => analyze(&state, &body).await,
        Err(err) => Err(err),
    };
    record_outcome(ENDPOINT, &result);
    result.map(Json)
}

async fn analyze(state: &AppState, body: &[u8]) -> Result<AnalysisResponse, AppError> {
    let provider = state.provider()?;

    let request: AnalysisRequest = parse_json_body(body)?;
    let image_data = required(request.image_data.as_deref(), "imageData")?;

    let profile = state.config.prompt_profile;
    let kind = RequestKind::from_label(request.request_type.as_deref());
    let language = Language::from_code(request.language.as_deref());

    let prompt = prompts::analysis_prompt(
        profile,
        kind,
        &PromptContext {
            language,
            location: request.location,
            mode_description: request.mode_description.as_deref(),
        },
    );

    tracing::info!(
        profile = %profile,
        kind = kind.as_str(),
        language = language.code(),
        has_location = request.location.is_some(),
        image_len = image_data.len(),
        "Analyzing image"
    );

    let text = provider
        .generate(&ContentRequest::with_image(prompt, InlineImage::jpeg(image_data)))
        .await?;

    let text = if profile.redacts_output() {
        redact(&text)
    } else {
        text
    };

    Ok(AnalysisResponse::new(text))
}
