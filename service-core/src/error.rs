use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Every way a request can fail. Handlers return `Result<_, AppError>` and
/// the conversion below decides status code and body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
        details: Option<String>,
    },

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    /// A dependency answered with a non-success status. The status and body
    /// are forwarded to the caller untouched.
    #[error("{service} API error {status}: {body}")]
    Upstream {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            details: None,
        }
    }

    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::BadRequest { .. } | AppError::PayloadTooLarge { .. } => "client_input",
            AppError::MethodNotAllowed => "method_not_allowed",
            AppError::NotFound(_) => "not_found",
            AppError::ConfigError(_) => "server_config",
            AppError::Upstream { .. } => "upstream",
            AppError::InternalError(_) => "unhandled",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConfigError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

/// Wire shape of every error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (error_message, details) = match self {
            AppError::BadRequest { message, details } => (message, details),
            AppError::PayloadTooLarge { limit } => (
                "Request body too large".to_string(),
                Some(format!("Limit is {} bytes", limit)),
            ),
            AppError::MethodNotAllowed => ("Method not allowed".to_string(), None),
            AppError::NotFound(what) => (format!("Not found: {}", what), None),
            // Configuration problems are operator-facing; clients get a fixed message.
            AppError::ConfigError(_) => ("Server configuration error".to_string(), None),
            AppError::Upstream { service, body, .. } => {
                (format!("{} API error", service), Some(body))
            }
            AppError::InternalError(err) => (
                "Internal server error".to_string(),
                Some(err.to_string()),
            ),
        };

        (
            status,
            Json(ErrorResponse {
                error: error_message,
                details,
            }),
        )
            .into_response()
    }
}
