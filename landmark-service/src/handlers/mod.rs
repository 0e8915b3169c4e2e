//! HTTP handlers for the landmark service.

pub mod analysis;
pub mod health;
pub mod secret;

pub use analysis::analyze_image;
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use secret::lookup_secret;

use crate::services::metrics;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use service_core::error::AppError;

/// Any method other than POST/OPTIONS on an API route.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub async fn not_found() -> AppError {
    AppError::NotFound("route".to_string())
}

/// Unwrap the buffered body, after the credential check so that a missing
/// key still wins over a bad body.
fn buffered_body(state: &AppState, body: Result<Bytes, BytesRejection>) -> Result<Bytes, AppError> {
    state.provider()?;
    body.map_err(|rejection| body_rejection(rejection, state.config.max_body_bytes))
}

fn body_rejection(rejection: BytesRejection, limit: usize) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::BadRequest {
            message: "Failed to read request body".to_string(),
            details: Some(rejection.body_text()),
        }
    }
}

/// Decode a JSON body. An empty body reads as `{}` so that the handler can
/// report the missing field by name.
fn parse_json_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(|e| AppError::BadRequest {
        message: "Invalid JSON body".to_string(),
        details: Some(e.to_string()),
    })
}

/// Required string field; absent, empty and whitespace-only are all missing.
fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::bad_request(format!("{} is required", field)))
}

/// Log and count how an invocation ended.
fn record_outcome<T>(endpoint: &'static str, result: &Result<T, AppError>) {
    let Err(err) = result else {
        metrics::record_request(endpoint, "success");
        return;
    };

    metrics::record_request(endpoint, err.kind());
    match err {
        AppError::BadRequest { .. }
        | AppError::PayloadTooLarge { .. }
        | AppError::MethodNotAllowed
        | AppError::NotFound(_) => {
            tracing::info!(endpoint, error = %err, "Request rejected")
        }
        AppError::Upstream { status, .. } => {
            tracing::warn!(endpoint, status, "Forwarding upstream API error")
        }
        AppError::ConfigError(_) | AppError::InternalError(_) => {
            tracing::error!(endpoint, error = %err, "Request failed")
        }
    }
}
