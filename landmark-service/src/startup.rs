//! Application startup and lifecycle management.

use crate::config::LandmarkConfig;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiProvider};
use crate::services::ContentProvider;
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors::{cors_headers_middleware, preflight},
    request_id::{request_id, request_id_middleware},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<LandmarkConfig>,
    /// `None` when no API key is configured.
    pub provider: Option<Arc<dyn ContentProvider>>,
}

impl AppState {
    /// Wire the Gemini provider when a key is configured.
    pub fn from_config(config: LandmarkConfig) -> Result<Self, AppError> {
        let provider = match &config.gemini.api_key {
            Some(api_key) => {
                let gemini = GeminiProvider::new(GeminiConfig {
                    api_key: api_key.clone(),
                    model: config.gemini.model.clone(),
                    api_base: config.gemini.api_base.clone(),
                })
                .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;

                tracing::info!(
                    model = %gemini.model(),
                    profile = %config.prompt_profile,
                    "Initialized Gemini provider"
                );
                Some(Arc::new(gemini) as Arc<dyn ContentProvider>)
            }
            None => {
                tracing::warn!("GEMINI_API_KEY is not set; API calls will fail with a configuration error");
                None
            }
        };

        Ok(Self::with_provider(config, provider))
    }

    pub fn with_provider(
        config: LandmarkConfig,
        provider: Option<Arc<dyn ContentProvider>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            provider,
        }
    }

    /// The configured provider, or the configuration error every API call
    /// reports while the key is missing.
    pub fn provider(&self) -> Result<&Arc<dyn ContentProvider>, AppError> {
        self.provider
            .as_ref()
            .ok_or_else(|| AppError::ConfigError(anyhow::anyhow!("GEMINI_API_KEY is not set")))
    }
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route(
            "/api/gemini",
            post(handlers::analyze_image)
                .options(preflight)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/getSecret",
            post(handlers::lookup_secret)
                .options(preflight)
                .fallback(handlers::method_not_allowed),
        )
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    request_id = request_id(req.headers()).unwrap_or("-"),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(cors_headers_middleware))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: LandmarkConfig) -> Result<Self, AppError> {
        let addr = config.common.socket_addr();
        let state = AppState::from_config(config)?;

        // Port 0 = random port for testing
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Landmark service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until SIGINT/SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
pub(crate) fn test_state(
    profile: crate::services::PromptProfile,
    provider: Option<Arc<crate::services::providers::mock::MockProvider>>,
) -> AppState {
    use crate::config::GeminiSettings;

    let config = LandmarkConfig {
        common: service_core::config::Config::default(),
        gemini: GeminiSettings {
            api_key: None,
            model: "gemini-test".to_string(),
            api_base: "http://127.0.0.1:1".to_string(),
        },
        prompt_profile: profile,
        max_body_bytes: crate::config::DEFAULT_MAX_BODY_BYTES,
        otlp_endpoint: None,
    };

    AppState::with_provider(config, provider.map(|p| p as Arc<dyn ContentProvider>))
}
