//! Prometheus Metrics
//!
//! # Metrics
//!
//! ## Counters
//! - `fueleu_http_requests_total` - HTTP requests by method, path, status
//! - `fueleu_ledger_operations_total` - Ledger operations by operation, outcome
//!
//! ## Histograms
//! - `fueleu_http_request_duration_seconds` - HTTP request duration
//!
//! ## Gauges
//! - `fueleu_uptime_seconds` - Service uptime
//!
//! # Configuration
//!
//! - `FUELEU_METRICS_ENABLED`: Enable metrics (default: true)
//! - `FUELEU_METRICS_PORT`: Metrics server port (default: 9090)

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::error::ApiResult;
use crate::state::AppState;

/// Metrics configuration
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Whether metrics are enabled
    pub enabled: bool,
    /// Port for metrics endpoint
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 9090,
        }
    }
}

impl MetricsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let enabled = std::env::var("FUELEU_METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        let port = std::env::var("FUELEU_METRICS_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(9090);

        Self { enabled, port }
    }
}

/// Install the Prometheus recorder and its scrape listener.
///
/// Call once at startup, inside the tokio runtime.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), BuildError> {
    if !config.enabled {
        tracing::info!("Metrics disabled");
        return Ok(());
    }

    PrometheusBuilder::new()
        .with_http_listener(SocketAddr::from(([0, 0, 0, 0], config.port)))
        .install()?;

    tracing::info!(port = config.port, "Metrics exporter listening");
    Ok(())
}

/// Record a request metric
pub fn record_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!("fueleu_http_requests_total", &labels).increment(1);
    histogram!("fueleu_http_request_duration_seconds", &labels).record(duration_secs);
}

/// Record the outcome of a ledger operation and pass the result through
pub fn record_ledger_operation<T>(operation: &'static str, result: ApiResult<T>) -> ApiResult<T> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(err) => err.error_code(),
    };
    counter!(
        "fueleu_ledger_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
    result
}

/// Metrics middleware for tracking HTTP requests
pub async fn metrics_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    // Route templates keep route IDs out of the label set
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    state.increment_requests().await;
    gauge!("fueleu_uptime_seconds").set(state.uptime_secs() as f64);

    let response = next.run(request).await;

    let duration = start.elapsed().as_secs_f64();
    record_request(&method, &path, response.status().as_u16(), duration);

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn test_metrics_config_default() {
        let config = MetricsConfig::default();
        assert!(config.enabled);
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_init_metrics_disabled() {
        let config = MetricsConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(init_metrics(&config).is_ok());
    }

    #[test]
    fn test_record_ledger_operation_passes_result() {
        let ok: ApiResult<u32> = Ok(7);
        assert_eq!(record_ledger_operation("bank", ok).unwrap(), 7);

        let err: ApiResult<u32> = Err(ApiError::validation("bad"));
        assert!(record_ledger_operation("apply", err).is_err());
    }

    #[test]
    fn test_record_request_without_recorder() {
        // No recorder installed: recording is a no-op
        record_request("GET", "/routes", 200, 0.01);
    }
}
