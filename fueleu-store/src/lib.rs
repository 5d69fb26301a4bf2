//! FuelEU Store - Route, Ledger and Pool Storage
//!
//! In-memory implementations of the `fueleu-core` repository contracts,
//! bundled behind the [`FuelEuDatabase`] facade.
//!
//! # Usage Example
//!
//! ```ignore
//! use fueleu_store::FuelEuDatabase;
//!
//! async fn example() {
//!     let db = FuelEuDatabase::in_memory();
//!     db.seed_demo().await.unwrap();
//!
//!     let routes = db.route_repository();
//!     let ledger = db.ledger_repository();
//! }
//! ```

pub mod error;
pub mod fixtures;
pub mod repos;

pub use error::*;
pub use fixtures::{demo_routes, load_routes_from_path, parse_routes};
pub use repos::*;

use fueleu_core::{ComplianceResult, LedgerRepository, PoolRepository, Route, RouteRepository};
use std::sync::Arc;

/// FuelEU database facade
///
/// Holds one repository per collection. Services take the trait-object
/// handles returned by the accessors.
#[derive(Clone, Debug, Default)]
pub struct FuelEuDatabase {
    /// Route repository
    pub routes: Arc<MemoryRouteRepository>,
    /// Bank ledger repository
    pub ledger: Arc<MemoryLedgerRepository>,
    /// Pool repository
    pub pools: Arc<MemoryPoolRepository>,
}

impl FuelEuDatabase {
    /// Create an empty in-memory database
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Insert routes, failing on the first duplicate
    pub async fn seed(&self, routes: Vec<Route>) -> ComplianceResult<usize> {
        let count = routes.len();
        for route in routes {
            self.routes.create(route).await?;
        }
        tracing::info!(routes = count, "Route data seeded");
        Ok(count)
    }

    /// Insert the demo routes
    pub async fn seed_demo(&self) -> ComplianceResult<usize> {
        self.seed(demo_routes()).await
    }

    /// Check database health
    pub async fn health_check(&self) -> ComplianceResult<bool> {
        self.routes.current_baseline().await.map(|_| true)
    }

    /// Route repository handle
    pub fn route_repository(&self) -> Arc<dyn RouteRepository> {
        self.routes.clone()
    }

    /// Ledger repository handle
    pub fn ledger_repository(&self) -> Arc<dyn LedgerRepository> {
        self.ledger.clone()
    }

    /// Pool repository handle
    pub fn pool_repository(&self) -> Arc<dyn PoolRepository> {
        self.pools.clone()
    }
}
