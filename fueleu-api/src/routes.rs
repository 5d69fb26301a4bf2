//! API Routes
//!
//! Route definitions for the FuelEU API.

use axum::{
    extract::{DefaultBodyLimit, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::handlers::*;
use crate::metrics::metrics_middleware;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let enable_cors = state.config.enable_cors;
    let max_body_size = state.config.max_body_size;

    let mut router = Router::new()
        // Health
        .route("/health", get(health_check))
        // Routes
        .route("/routes", get(list_routes))
        .route("/routes/comparison", get(get_comparison))
        .route("/routes/:route_id/baseline", post(set_baseline))
        // Compliance
        .route("/compliance/cb", get(get_compliance_cb))
        .route("/compliance/adjusted-cb", get(get_adjusted_cb))
        // Banking
        .route("/banking/banked", get(get_banked))
        .route("/banking/bank", post(bank_surplus))
        .route("/banking/apply", post(apply_banked))
        .route("/banking/records", get(list_bank_records).delete(reset_bank_records))
        // Pooling
        .route("/pooling", post(create_pool).get(list_pools))
        .with_state(state.clone());

    router = router
        .layer(middleware::from_fn_with_state(state.clone(), timeout_middleware))
        .layer(middleware::from_fn_with_state(state, metrics_middleware))
        .layer(DefaultBodyLimit::max(max_body_size));

    if enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.layer(TraceLayer::new_for_http())
}

/// Create a router for the V1 API with /api/v1 prefix
pub fn create_v1_router(state: Arc<AppState>) -> Router {
    Router::new().nest("/api/v1", create_router(state))
}

/// Build the full application router
///
/// Endpoints are served both at the root and under `/api/v1`.
pub fn build_app(state: AppState) -> Router {
    let state = Arc::new(state);

    let root_router = Router::new().route("/", get(|| async { "FuelEU Maritime API" }));

    let health_router = Router::new()
        .route("/healthz", get(health_check))
        .with_state(state.clone());

    root_router
        .merge(health_router)
        .merge(create_router(state.clone()))
        .merge(create_v1_router(state))
        .fallback(not_found)
}

/// Abort requests that run past the configured timeout
async fn timeout_middleware(State(state): State<Arc<AppState>>, request: Request, next: Next) -> Response {
    let secs = state.config.request_timeout_secs;
    match tokio::time::timeout(Duration::from_secs(secs), next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(timeout_secs = secs, "Request timed out");
            ApiError::Timeout { secs }.into_response()
        }
    }
}
