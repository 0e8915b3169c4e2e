//! Prometheus metrics for landmark-service.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

// HTTP endpoint outcomes
pub static LANDMARK_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

// Upstream metrics
pub static GEMINI_REQUEST_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static GEMINI_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Call once at startup; later calls are ignored.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    if REGISTRY.get().is_some() {
        return Ok(());
    }

    let registry = Registry::new();

    let requests_total = IntCounterVec::new(
        Opts::new("landmark_requests_total", "Total landmark API requests"),
        &["endpoint", "outcome"],
    )?;

    let gemini_duration = HistogramVec::new(
        HistogramOpts::new(
            "gemini_request_duration_seconds",
            "Gemini generateContent latency in seconds",
        )
        .buckets(vec![0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]),
        &["model"],
    )?;

    let gemini_errors = IntCounterVec::new(
        Opts::new("gemini_errors_total", "Total failed Gemini calls"),
        &["kind"],
    )?;

    registry.register(Box::new(requests_total.clone()))?;
    registry.register(Box::new(gemini_duration.clone()))?;
    registry.register(Box::new(gemini_errors.clone()))?;

    let _ = REGISTRY.set(registry);
    let _ = LANDMARK_REQUESTS_TOTAL.set(requests_total);
    let _ = GEMINI_REQUEST_DURATION_SECONDS.set(gemini_duration);
    let _ = GEMINI_ERRORS_TOTAL.set(gemini_errors);

    tracing::info!("Prometheus metrics initialized");
    Ok(())
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let Some(registry) = REGISTRY.get() else {
        tracing::error!("Metrics registry not initialized");
        return "# Metrics registry not initialized\n".to_string();
    };

    let mut buffer = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&registry.gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
        format!("# Failed to convert metrics to UTF-8: {}\n", e)
    })
}

/// Record how an endpoint invocation ended (`success` or an error kind).
pub fn record_request(endpoint: &str, outcome: &str) {
    if let Some(counter) = LANDMARK_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[endpoint, outcome]).inc();
    }
}

pub fn record_gemini_latency(model: &str, duration_secs: f64) {
    if let Some(histogram) = GEMINI_REQUEST_DURATION_SECONDS.get() {
        histogram.with_label_values(&[model]).observe(duration_secs);
    }
}

pub fn record_gemini_error(kind: &str) {
    if let Some(counter) = GEMINI_ERRORS_TOTAL.get() {
        counter.with_label_values(&[kind]).inc();
    }
}
