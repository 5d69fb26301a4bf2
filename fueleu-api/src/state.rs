//! Application State
//!
//! Shared state for the FuelEU API service. The process entry point owns the
//! database and hands it in; every service receives its repositories here.

use chrono::{DateTime, Utc};
use fueleu_core::{
    BankingBasis, BankingLedger, BaselineSelector, ComplianceCalculator, PoolAllocator,
    RouteComparator, RouteRepository,
};
use fueleu_store::FuelEuDatabase;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Service name
    pub service_name: String,
    /// Service version
    pub version: String,
    /// Listen address
    pub listen_addr: String,
    /// Enable CORS
    pub enable_cors: bool,
    /// Request timeout (seconds)
    pub request_timeout_secs: u64,
    /// Max request body size (bytes)
    pub max_body_size: usize,
    /// Which CB figure `bank` deposits
    pub banking_basis: BankingBasis,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            service_name: "fueleu-api".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            listen_addr: "0.0.0.0:4000".to_string(),
            enable_cors: true,
            request_timeout_secs: 30,
            max_body_size: 1024 * 1024, // 1MB
            banking_basis: BankingBasis::default(),
        }
    }
}

/// Application state shared across handlers
pub struct AppState {
    /// Configuration
    pub config: ApiConfig,
    /// Backing store
    pub database: FuelEuDatabase,
    /// Route repository handle
    pub routes: Arc<dyn RouteRepository>,
    /// CB calculator
    pub calculator: ComplianceCalculator,
    /// Baseline selector
    pub baseline: BaselineSelector,
    /// Baseline comparison
    pub comparator: RouteComparator,
    /// Banking ledger
    pub ledger: BankingLedger,
    /// Pool allocator
    pub pooling: PoolAllocator,
    /// Service start time
    pub started_at: DateTime<Utc>,
    /// Request counter
    request_counter: RwLock<u64>,
}

impl AppState {
    /// Create new application state with default config
    pub fn new(database: FuelEuDatabase) -> Self {
        Self::with_config(ApiConfig::default(), database)
    }

    /// Create with configuration
    pub fn with_config(config: ApiConfig, database: FuelEuDatabase) -> Self {
        let routes = database.route_repository();
        let calculator = ComplianceCalculator::new(routes.clone());
        let ledger = BankingLedger::new(database.ledger_repository(), calculator.clone())
            .with_basis(config.banking_basis);

        Self {
            baseline: BaselineSelector::new(routes.clone()),
            comparator: RouteComparator::new(routes.clone()),
            pooling: PoolAllocator::new(routes.clone(), database.pool_repository()),
            calculator,
            ledger,
            routes,
            database,
            config,
            started_at: Utc::now(),
            request_counter: RwLock::new(0),
        }
    }

    /// Get service uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        let now = Utc::now();
        (now - self.started_at).num_seconds().max(0) as u64
    }

    /// Increment request counter
    pub async fn increment_requests(&self) -> u64 {
        let mut counter = self.request_counter.write().await;
        *counter += 1;
        *counter
    }

    /// Get request count
    pub async fn request_count(&self) -> u64 {
        *self.request_counter.read().await
    }
}

/// Health status of the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Service is healthy
    Healthy,
    /// Service is unhealthy
    Unhealthy,
}

impl HealthStatus {
    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Unhealthy => "unhealthy",
        }
    }
}

/// Component health check result
#[derive(Debug, Clone)]
pub struct ComponentHealthCheck {
    /// Component name
    pub name: String,
    /// Health status
    pub status: HealthStatus,
    /// Optional message
    pub message: Option<String>,
}

impl ComponentHealthCheck {
    /// Create a healthy result
    pub fn healthy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Healthy,
            message: None,
        }
    }

    /// Create an unhealthy result
    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
        }
    }
}
