//! Prometheus metrics handler
//!
//! Serves `GET /metrics` in Prometheus text format. Besides the
//! `http_requests_total` / `http_request_duration_seconds` families
//! recorded by the middleware, the scrape carries the queue counters
//! (`prebook_admissions_total`, `prebook_promotions_total`,
//! `prebook_lock_expiries_total`, `prebook_arrivals_total`).

use axum::{extract::State, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

/// Prometheus exposition content type
const TEXT_FORMAT: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Shared state for the metrics endpoint
#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// `GET /metrics` — Prometheus scrape endpoint (no auth)
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    ([("content-type", TEXT_FORMAT)], state.handle.render())
}
