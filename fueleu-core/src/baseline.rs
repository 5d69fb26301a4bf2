//! Baseline Selector
//!
//! Keeps at most one route flagged as baseline. Designations are serialized
//! and delegated to [`RouteRepository::replace_baseline`], which either runs
//! atomically or rolls back.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{ComplianceError, ComplianceResult};
use crate::repository::RouteRepository;
use crate::types::Route;

/// Baseline selector
#[derive(Clone)]
pub struct BaselineSelector {
    routes: Arc<dyn RouteRepository>,
    guard: Arc<Mutex<()>>,
}

impl BaselineSelector {
    /// Create new selector
    pub fn new(routes: Arc<dyn RouteRepository>) -> Self {
        Self {
            routes,
            guard: Arc::new(Mutex::new(())),
        }
    }

    /// Designate `route_id` as the only baseline
    pub async fn set_baseline(&self, route_id: &str) -> ComplianceResult<Route> {
        let route_id = route_id.trim();
        if route_id.is_empty() {
            return Err(ComplianceError::invalid_argument("routeId must not be empty"));
        }

        let _guard = self.guard.lock().await;
        let previous = self
            .routes
            .current_baseline()
            .await?
            .map(|p| p.key().to_string())
            .unwrap_or_else(|| "none".to_string());

        let route = self.routes.replace_baseline(route_id).await.map_err(|err| {
            tracing::warn!(route_id, error = %err, "Baseline designation rejected");
            err
        })?;

        tracing::info!(
            baseline = %route.key(),
            previous = %previous,
            "Baseline designated"
        );

        Ok(route)
    }

    /// Currently designated baseline
    pub async fn current(&self) -> ComplianceResult<Option<Route>> {
        self.routes.current_baseline().await
    }
}
