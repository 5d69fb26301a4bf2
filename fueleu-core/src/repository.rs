//! Storage Collaborator Contracts
//!
//! Components receive these as `Arc<dyn ...>` from the process entry point.
//! Implementations live in `fueleu-store`.

use async_trait::async_trait;

use crate::error::{ComplianceError, ComplianceResult};
use crate::types::{BankEntry, Pool, Route, RouteFilter, RouteKey};

/// Route repository
#[async_trait]
pub trait RouteRepository: Send + Sync {
    /// Insert a new route record
    async fn create(&self, route: Route) -> ComplianceResult<Route>;

    /// Find a route by `(route_id, year)`
    async fn find(&self, route_id: &str, year: i32) -> ComplianceResult<Option<Route>>;

    /// All records sharing a route ID, any year
    async fn find_by_route_id(&self, route_id: &str) -> ComplianceResult<Vec<Route>>;

    /// List routes matching a filter
    async fn list(&self, filter: &RouteFilter) -> ComplianceResult<Vec<Route>>;

    /// The currently flagged baseline, if any
    async fn current_baseline(&self) -> ComplianceResult<Option<Route>>;

    /// Clear the baseline flag everywhere, returning the keys that had it
    async fn clear_baselines(&self) -> ComplianceResult<Vec<RouteKey>>;

    /// Set the baseline flag on one route
    async fn mark_baseline(&self, key: &RouteKey) -> ComplianceResult<Route>;

    /// Re-flag routes after a failed baseline change
    async fn restore_baselines(&self, keys: &[RouteKey]) -> ComplianceResult<()>;

    /// Flagged baseline with the largest year not after `year`
    async fn baseline_for_year(&self, year: i32) -> ComplianceResult<Option<Route>> {
        let routes = self.list(&RouteFilter::all()).await?;
        Ok(crate::compliance::resolve_baseline(&routes, year).cloned())
    }

    /// Make the latest-year record of `route_id` the only baseline.
    ///
    /// Stores without transactions get clear-then-set with a compensating
    /// rollback; transactional stores should override this with one atomic step.
    async fn replace_baseline(&self, route_id: &str) -> ComplianceResult<Route> {
        let target = self
            .find_by_route_id(route_id)
            .await?
            .into_iter()
            .max_by_key(|r| r.year)
            .ok_or_else(|| ComplianceError::route_not_found(route_id, None))?;

        let previous = self.clear_baselines().await?;

        match self.mark_baseline(&target.key()).await {
            Ok(route) => Ok(route),
            Err(err) => {
                tracing::warn!(
                    route_id,
                    error = %err,
                    restored = previous.len(),
                    "Baseline update failed, restoring previous baseline"
                );
                if let Err(restore_err) = self.restore_baselines(&previous).await {
                    return Err(ComplianceError::storage(format!(
                        "baseline update failed ({}) and rollback failed ({})",
                        err, restore_err
                    )));
                }
                Err(err)
            }
        }
    }
}

/// Bank ledger repository (append-only)
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Append an entry; the store assigns its sequence number
    async fn append(&self, entry: BankEntry) -> ComplianceResult<BankEntry>;

    /// Entries for a route, ordered by creation time
    async fn entries_for_route(&self, route_id: &str) -> ComplianceResult<Vec<BankEntry>>;

    /// Remove every entry (administrative), returning the removed count
    async fn reset(&self) -> ComplianceResult<u64>;
}

/// Pool repository
#[async_trait]
pub trait PoolRepository: Send + Sync {
    /// Persist a pooling event
    async fn create(&self, pool: Pool) -> ComplianceResult<Pool>;

    /// List pools, optionally for one year
    async fn list(&self, year: Option<i32>) -> ComplianceResult<Vec<Pool>>;
}
