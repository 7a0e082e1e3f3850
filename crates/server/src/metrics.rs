//! Prometheus metrics
//!
//! The recorder is process-wide; `init_metrics` installs it once and later
//! calls return the same handle.

use std::time::Duration;

use axum::{http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static PROMETHEUS: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder
///
/// Returns `None` if another recorder was installed first.
pub fn init_metrics() -> Option<PrometheusHandle> {
    PROMETHEUS
        .get_or_try_init(|| PrometheusBuilder::new().install_recorder())
        .map_err(|e| tracing::warn!(error = %e, "Failed to install Prometheus recorder"))
        .ok()
        .cloned()
}

/// `GET /metrics`
pub async fn metrics_handler() -> impl IntoResponse {
    match PROMETHEUS.get() {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics are disabled".to_string(),
        ),
    }
}

pub fn record_request(endpoint: &'static str, status: StatusCode) {
    metrics::counter!(
        "voice_ci_http_requests_total",
        "endpoint" => endpoint,
        "status" => status.as_u16().to_string()
    )
    .increment(1);
}

pub fn record_request_latency(endpoint: &'static str, elapsed: Duration) {
    metrics::histogram!("voice_ci_http_request_duration_seconds", "endpoint" => endpoint)
        .record(elapsed.as_secs_f64());
}

pub fn record_error(kind: &'static str) {
    metrics::counter!("voice_ci_http_errors_total", "kind" => kind).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let first = init_metrics();
        let second = init_metrics();
        assert_eq!(first.is_some(), second.is_some());
        record_request("/parse", StatusCode::OK);
        if let Some(handle) = second {
            assert!(handle.render().contains("voice_ci_http_requests_total"));
        }
    }
}
