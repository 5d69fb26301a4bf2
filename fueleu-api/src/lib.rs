//! FuelEU API - HTTP Interface Layer
//!
//! Exposes route compliance, baseline comparison, banking and pooling over
//! JSON/HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 FuelEU API                  │
//! │  ┌─────────────────────────────────────┐    │
//! │  │            HTTP Routes              │    │
//! │  │  /routes, /compliance, /banking     │    │
//! │  │  /pooling, /health                  │    │
//! │  └─────────────────────────────────────┘    │
//! │           │              │           │      │
//! │           ▼              ▼           ▼      │
//! │  ┌─────────────┐ ┌─────────────┐ ┌────────┐ │
//! │  │  Handlers   │ │    DTOs     │ │ State  │ │
//! │  └─────────────┘ └─────────────┘ └────────┘ │
//! └─────────────────────────────────────────────┘
//!           │                          │
//!           ▼                          ▼
//!      fueleu-core               fueleu-store
//! ```
//!
//! # Endpoints
//!
//! Served at the root and under `/api/v1`.
//!
//! ## Routes
//! - `GET /routes` - List routes (`?vesselType&fuelType&year`)
//! - `POST /routes/:route_id/baseline` - Designate the baseline
//! - `GET /routes/comparison` - Compare routes against the baseline
//!
//! ## Compliance
//! - `GET /compliance/cb?routeId&year` - Baseline-relative CB
//! - `GET /compliance/adjusted-cb?routeId&year` - CB plus adjusted CB
//!
//! ## Banking
//! - `GET /banking/banked?routeId` - Banked balance
//! - `POST /banking/bank` - Bank surplus CB
//! - `POST /banking/apply` - Apply banked CB
//! - `GET /banking/records?routeId` - Ledger entries
//! - `DELETE /banking/records` - Reset the ledger
//!
//! ## Pooling
//! - `POST /pooling` - Create a pool
//! - `GET /pooling?year` - List pools
//!
//! # Usage Example
//!
//! ```ignore
//! use fueleu_api::{ApiConfig, AppState, start_server};
//! use fueleu_store::FuelEuDatabase;
//!
//! #[tokio::main]
//! async fn main() {
//!     let database = FuelEuDatabase::in_memory();
//!     database.seed_demo().await.unwrap();
//!
//!     let state = AppState::with_config(ApiConfig::default(), database);
//!     start_server(state).await.unwrap();
//! }
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

// Re-export main types
pub use dto::*;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use metrics::{init_metrics, MetricsConfig};
pub use routes::{build_app, create_router, create_v1_router};
pub use state::{ApiConfig, AppState, ComponentHealthCheck, HealthStatus};

/// FuelEU API version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API port
pub const DEFAULT_PORT: u16 = 4000;

/// Start the API server
pub async fn start_server(state: AppState) -> Result<(), std::io::Error> {
    let addr = state.config.listen_addr.clone();
    let app = build_app(state);

    tracing::info!("Starting FuelEU API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await
}
