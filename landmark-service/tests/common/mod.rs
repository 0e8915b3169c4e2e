#![allow(dead_code)]

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use landmark_service::config::{GeminiSettings, LandmarkConfig, DEFAULT_MAX_BODY_BYTES};
use landmark_service::services::PromptProfile;
use landmark_service::{build_router, AppState};
use secrecy::Secret;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_MODEL: &str = "gemini-test";

pub fn test_config(api_key: Option<&str>, api_base: &str, profile: PromptProfile) -> LandmarkConfig {
    LandmarkConfig {
        common: service_core::config::Config::default(),
        gemini: GeminiSettings {
            api_key: api_key.map(|k| Secret::new(k.to_string())),
            model: TEST_MODEL.to_string(),
            api_base: api_base.to_string(),
        },
        prompt_profile: profile,
        max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        otlp_endpoint: None,
    }
}

/// Router wired to a real Gemini provider that talks to `server`.
pub fn gemini_app(server: &MockServer, profile: PromptProfile) -> Router {
    let config = test_config(Some(TEST_API_KEY), &server.uri(), profile);
    build_router(AppState::from_config(config).expect("Failed to build state"))
}

/// Like [`gemini_app`] but refusing bodies above `max_body_bytes`.
pub fn gemini_app_with_body_limit(server: &MockServer, max_body_bytes: usize) -> Router {
    let mut config = test_config(Some(TEST_API_KEY), &server.uri(), PromptProfile::Private);
    config.max_body_bytes = max_body_bytes;
    build_router(AppState::from_config(config).expect("Failed to build state"))
}

/// Router with no API key configured.
pub fn unconfigured_app() -> Router {
    let config = test_config(None, "http://127.0.0.1:1", PromptProfile::Private);
    build_router(AppState::from_config(config).expect("Failed to build state"))
}

/// Expect exactly one generateContent call answering with `text`.
pub async fn mount_gemini_text(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/models/{}:generateContent", TEST_MODEL)))
        .and(query_param("key", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_gemini_status(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Fail the test if Gemini is called at all.
pub async fn forbid_gemini_calls(server: &MockServer) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

/// JSON body of the single request Gemini received.
pub async fn sent_payload(server: &MockServer) -> Value {
    let requests = server
        .received_requests()
        .await
        .expect("request recording is enabled");
    assert_eq!(requests.len(), 1, "expected exactly one upstream call");
    serde_json::from_slice(&requests[0].body).expect("upstream body is JSON")
}

/// Prompt text of the single request Gemini received.
pub async fn sent_prompt(server: &MockServer) -> String {
    sent_payload(server).await["contents"][0]["parts"][0]["text"]
        .as_str()
        .expect("prompt part")
        .to_string()
}

pub fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn assert_cors(&self) {
        assert_eq!(self.headers["access-control-allow-origin"], "*");
        assert_eq!(self.headers["access-control-allow-methods"], "POST, OPTIONS");
        assert_eq!(self.headers["access-control-allow-headers"], "Content-Type");
    }
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();

    TestResponse {
        status,
        headers,
        body,
    }
}
