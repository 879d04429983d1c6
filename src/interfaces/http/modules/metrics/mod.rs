//! Metrics module: Prometheus exposition and per-request HTTP metrics

pub mod handlers;
pub mod middleware;

pub use handlers::*;
pub use middleware::http_metrics_middleware;
