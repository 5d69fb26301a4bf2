//! In-Memory Route Repository
//!
//! Routes are keyed by `(route_id, year)`. Baseline replacement runs under a
//! single write lock, so readers never observe zero or two baselines.

use async_trait::async_trait;
use fueleu_core::{ComplianceError, ComplianceResult, Route, RouteFilter, RouteKey, RouteRepository};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::StoreError;

/// In-memory implementation of RouteRepository
#[derive(Debug, Default)]
pub struct MemoryRouteRepository {
    routes: Arc<RwLock<BTreeMap<RouteKey, Route>>>,
}

impl MemoryRouteRepository {
    /// Create a new repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored routes
    pub async fn len(&self) -> usize {
        self.routes.read().await.len()
    }
}

#[async_trait]
impl RouteRepository for MemoryRouteRepository {
    async fn create(&self, route: Route) -> ComplianceResult<Route> {
        if route.route_id.trim().is_empty() {
            return Err(ComplianceError::invalid_argument("routeId must not be empty"));
        }

        let mut routes = self.routes.write().await;
        let key = route.key();
        if routes.contains_key(&key) {
            return Err(ComplianceError::DuplicateRoute {
                route_id: key.route_id,
                year: key.year,
            });
        }

        if route.is_baseline {
            for existing in routes.values_mut() {
                existing.is_baseline = false;
            }
        }

        routes.insert(key, route.clone());
        Ok(route)
    }

    async fn find(&self, route_id: &str, year: i32) -> ComplianceResult<Option<Route>> {
        let routes = self.routes.read().await;
        Ok(routes.get(&RouteKey::new(route_id, year)).cloned())
    }

    async fn find_by_route_id(&self, route_id: &str) -> ComplianceResult<Vec<Route>> {
        let routes = self.routes.read().await;
        Ok(routes
            .values()
            .filter(|r| r.route_id == route_id)
            .cloned()
            .collect())
    }

    async fn list(&self, filter: &RouteFilter) -> ComplianceResult<Vec<Route>> {
        let routes = self.routes.read().await;
        Ok(routes.values().filter(|r| filter.matches(r)).cloned().collect())
    }

    async fn current_baseline(&self) -> ComplianceResult<Option<Route>> {
        let routes = self.routes.read().await;
        Ok(routes.values().find(|r| r.is_baseline).cloned())
    }

    async fn clear_baselines(&self) -> ComplianceResult<Vec<RouteKey>> {
        let mut routes = self.routes.write().await;
        let mut cleared = Vec::new();
        for route in routes.values_mut().filter(|r| r.is_baseline) {
            route.is_baseline = false;
            cleared.push(route.key());
        }
        Ok(cleared)
    }

    async fn mark_baseline(&self, key: &RouteKey) -> ComplianceResult<Route> {
        let mut routes = self.routes.write().await;
        let route = routes
            .get_mut(key)
            .ok_or_else(|| ComplianceError::route_not_found(key.route_id.clone(), Some(key.year)))?;
        route.is_baseline = true;
        Ok(route.clone())
    }

    async fn restore_baselines(&self, keys: &[RouteKey]) -> ComplianceResult<()> {
        let mut routes = self.routes.write().await;
        for key in keys {
            let route = routes
                .get_mut(key)
                .ok_or_else(|| StoreError::not_found("Route", key.to_string()))?;
            route.is_baseline = true;
        }
        Ok(())
    }

    async fn replace_baseline(&self, route_id: &str) -> ComplianceResult<Route> {
        let mut routes = self.routes.write().await;

        let target = routes
            .values()
            .filter(|r| r.route_id == route_id)
            .max_by_key(|r| r.year)
            .map(|r| r.key())
            .ok_or_else(|| ComplianceError::route_not_found(route_id, None))?;

        for route in routes.values_mut() {
            route.is_baseline = route.key() == target;
        }

        routes
            .get(&target)
            .cloned()
            .ok_or_else(|| ComplianceError::route_not_found(route_id, None))
    }
}
