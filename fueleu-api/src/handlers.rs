//! API Handlers
//!
//! HTTP handler implementations for FuelEU endpoints. Handlers only parse
//! and shape; every rule lives in `fueleu-core`.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::Uri,
    Json,
};
use fueleu_core::{Route, RouteFilter};
use std::sync::Arc;

use crate::dto::*;
use crate::error::{ApiError, ApiResult};
use crate::metrics::record_ledger_operation;
use crate::state::{AppState, ComponentHealthCheck, HealthStatus};

/// Health check handler
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<Json<HealthResponse>> {
    let datastore = match state.database.health_check().await {
        Ok(true) => ComponentHealthCheck::healthy("datastore"),
        Ok(false) => ComponentHealthCheck::unhealthy("datastore", "health check failed"),
        Err(err) => ComponentHealthCheck::unhealthy("datastore", err.to_string()),
    };
    let components = vec![datastore, ComponentHealthCheck::healthy("ledger")];

    let overall_status = if components.iter().all(|c| c.status == HealthStatus::Healthy) {
        HealthStatus::Healthy
    } else {
        HealthStatus::Unhealthy
    };

    Ok(Json(HealthResponse {
        status: overall_status.as_str().to_string(),
        version: state.config.version.clone(),
        uptime_secs: state.uptime_secs(),
        requests_served: state.request_count().await,
        components: components
            .into_iter()
            .map(|c| ComponentHealth {
                name: c.name,
                status: c.status.as_str().to_string(),
                message: c.message,
            })
            .collect(),
    }))
}

// ============================================
// Routes
// ============================================

/// List routes, optionally filtered by vesselType, fuelType and year
pub async fn list_routes(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RouteFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<Route>>> {
    let Query(filter) = query?;
    let routes = state.routes.list(&filter).await?;
    Ok(Json(routes))
}

/// Designate a route as the only baseline
pub async fn set_baseline(
    State(state): State<Arc<AppState>>,
    Path(route_id): Path<String>,
) -> ApiResult<Json<BaselineResponse>> {
    let updated = state.baseline.set_baseline(&route_id).await?;

    Ok(Json(BaselineResponse {
        message: format!("Baseline set for {}", updated.route_id),
        updated,
    }))
}

/// Compare every route against the current baseline
pub async fn get_comparison(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<fueleu_core::Comparison>> {
    let comparison = state.comparator.compare_all().await?;
    Ok(Json(comparison))
}

// ============================================
// Compliance
// ============================================

/// Baseline-relative CB of `(routeId, year)`
pub async fn get_compliance_cb(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RouteYearQuery>, QueryRejection>,
) -> ApiResult<Json<ComplianceCbResponse>> {
    let Query(query) = query?;
    let (route_id, year) = query.require()?;

    let result = state.calculator.route_compliance(&route_id, year).await?;
    Ok(Json(ComplianceCbResponse::from(&result)))
}

/// Baseline-relative CB of `(routeId, year)` with the adjusted figure
pub async fn get_adjusted_cb(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RouteYearQuery>, QueryRejection>,
) -> ApiResult<Json<AdjustedCbResponse>> {
    let Query(query) = query?;
    let (route_id, year) = query.require()?;

    let result = state.calculator.route_compliance(&route_id, year).await?;
    Ok(Json(AdjustedCbResponse::from(&result)))
}

// ============================================
// Banking
// ============================================

/// Banked balance of a route
pub async fn get_banked(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RouteIdQuery>, QueryRejection>,
) -> ApiResult<Json<BankedResponse>> {
    let Query(query) = query?;
    let route_id = query.require()?;

    let amount = state.ledger.get_balance(&route_id).await?;
    Ok(Json(BankedResponse { route_id, amount }))
}

/// Bank a route's surplus CB
pub async fn bank_surplus(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BankRequest>, JsonRejection>,
) -> ApiResult<Json<LedgerEntryResponse>> {
    let result = async {
        let Json(request) = payload?;
        let entry = state.ledger.bank(&request.route_id, request.year).await?;
        Ok::<_, ApiError>(Json(LedgerEntryResponse {
            message: "CB banked successfully".to_string(),
            entry,
        }))
    }
    .await;

    record_ledger_operation("bank", result)
}

/// Apply previously banked CB
pub async fn apply_banked(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ApplyRequest>, JsonRejection>,
) -> ApiResult<Json<LedgerEntryResponse>> {
    let result = async {
        let Json(request) = payload?;
        let entry = state.ledger.apply(&request.route_id, request.amount).await?;
        Ok::<_, ApiError>(Json(LedgerEntryResponse {
            message: "Applied banked CB successfully".to_string(),
            entry,
        }))
    }
    .await;

    record_ledger_operation("apply", result)
}

/// Ordered ledger entries of a route
pub async fn list_bank_records(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RouteIdQuery>, QueryRejection>,
) -> ApiResult<Json<BankRecordsResponse>> {
    let Query(query) = query?;
    let route_id = query.require()?;

    let records = state.ledger.records(&route_id).await?;
    let balance = fueleu_core::running_balance(&records);

    Ok(Json(BankRecordsResponse {
        route_id,
        balance,
        records,
    }))
}

/// Remove every ledger entry
pub async fn reset_bank_records(State(state): State<Arc<AppState>>) -> ApiResult<Json<ResetResponse>> {
    let result = async {
        let removed = state.ledger.reset().await?;
        Ok::<_, ApiError>(Json(ResetResponse {
            message: "Banking ledger reset".to_string(),
            removed,
        }))
    }
    .await;

    record_ledger_operation("reset", result)
}

// ============================================
// Pooling
// ============================================

/// Create a pool
pub async fn create_pool(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreatePoolRequest>, JsonRejection>,
) -> ApiResult<Json<PoolResponse>> {
    let Json(request) = payload?;
    let pool = state.pooling.create_pool(request.year, &request.members).await?;

    Ok(Json(PoolResponse::from(pool).with_message("Pool created successfully")))
}

/// List recorded pools
pub async fn list_pools(
    State(state): State<Arc<AppState>>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<PoolResponse>>> {
    let Query(query) = query?;
    let pools = state.pooling.list_pools(query.year).await?;
    Ok(Json(pools.into_iter().map(PoolResponse::from).collect()))
}

/// Fallback for unknown paths
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found("Endpoint", uri.path())
}
