//! Pool Allocator

use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;

use super::{IdentityRedistribution, RedistributionPolicy, MIN_POOL_MEMBERS};
use crate::compliance::{POOL_CB_SCALE, TARGET_GHG_INTENSITY};
use crate::error::{ComplianceError, ComplianceResult};
use crate::repository::{PoolRepository, RouteRepository};
use crate::types::{Pool, PoolMember, PoolMemberRef, Route};

/// Pooling CB of one route
pub fn pool_cb(route: &Route) -> ComplianceResult<Decimal> {
    TARGET_GHG_INTENSITY
        .checked_sub(route.ghg_intensity)
        .and_then(|gap| gap.checked_mul(route.distance))
        .and_then(|cb| cb.checked_mul(POOL_CB_SCALE))
        .ok_or_else(|| ComplianceError::BalanceOverflow {
            route_id: route.route_id.clone(),
        })
}

/// Checked sum of member balances
fn checked_total(values: &[Decimal], routes: &[Route]) -> ComplianceResult<Decimal> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(*value))
        .ok_or_else(|| ComplianceError::BalanceOverflow {
            route_id: routes
                .iter()
                .map(|r| r.route_id.as_str())
                .collect::<Vec<_>>()
                .join(","),
        })
}

/// Validate member references: at least two, no blanks, no duplicates
pub fn validate_members(members: &[PoolMemberRef]) -> ComplianceResult<()> {
    if members.len() < MIN_POOL_MEMBERS {
        return Err(ComplianceError::TooFewPoolMembers {
            minimum: MIN_POOL_MEMBERS,
            actual: members.len(),
        });
    }

    let mut seen = HashSet::with_capacity(members.len());
    for member in members {
        if member.route_id.trim().is_empty() {
            return Err(ComplianceError::invalid_argument("pool member routeId must not be empty"));
        }
        if !seen.insert(member.route_id.as_str()) {
            return Err(ComplianceError::DuplicatePoolMember {
                route_id: member.route_id.clone(),
            });
        }
    }

    Ok(())
}

/// Build a pool from resolved member routes
pub fn allocate(year: i32, routes: &[Route], policy: &dyn RedistributionPolicy) -> ComplianceResult<Pool> {
    if routes.len() < MIN_POOL_MEMBERS {
        return Err(ComplianceError::TooFewPoolMembers {
            minimum: MIN_POOL_MEMBERS,
            actual: routes.len(),
        });
    }

    let before = routes.iter().map(pool_cb).collect::<ComplianceResult<Vec<Decimal>>>()?;
    let total_cb = checked_total(&before, routes)?;

    let after = policy.redistribute(&before);
    if after.len() != before.len() {
        return Err(ComplianceError::InvalidState {
            reason: format!(
                "policy {} returned {} allocations for {} members",
                policy.name(),
                after.len(),
                before.len()
            ),
        });
    }
    let total_after = checked_total(&after, routes)?;
    if total_after != total_cb {
        return Err(ComplianceError::InvalidState {
            reason: format!(
                "policy {} changed pool total from {} to {}",
                policy.name(),
                total_cb,
                total_after
            ),
        });
    }

    let members = routes
        .iter()
        .zip(before.into_iter().zip(after))
        .map(|(route, (cb_before, cb_after))| PoolMember {
            route_id: route.route_id.clone(),
            ship: route.vessel_type.clone(),
            cb_before,
            cb_after,
        })
        .collect();

    Ok(Pool {
        id: format!("pool:{}", uuid::Uuid::new_v4()),
        year,
        total_cb,
        policy: policy.name().to_string(),
        members,
        created_at: Utc::now(),
    })
}

/// Repository-backed pool allocator
#[derive(Clone)]
pub struct PoolAllocator {
    routes: Arc<dyn RouteRepository>,
    pools: Arc<dyn PoolRepository>,
    policy: Arc<dyn RedistributionPolicy>,
}

impl PoolAllocator {
    /// Create allocator with the identity policy
    pub fn new(routes: Arc<dyn RouteRepository>, pools: Arc<dyn PoolRepository>) -> Self {
        Self {
            routes,
            pools,
            policy: Arc::new(IdentityRedistribution),
        }
    }

    /// Replace the redistribution policy
    pub fn with_policy(mut self, policy: Arc<dyn RedistributionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Create and record a pool for `year`
    pub async fn create_pool(&self, year: i32, members: &[PoolMemberRef]) -> ComplianceResult<Pool> {
        validate_members(members)?;

        let mut routes = Vec::with_capacity(members.len());
        for member in members {
            routes.push(self.resolve_member(&member.route_id, year).await?);
        }

        let pool = allocate(year, &routes, self.policy.as_ref())?;
        let pool = self.pools.create(pool).await?;

        tracing::info!(
            pool_id = %pool.id,
            year,
            members = pool.members.len(),
            total_cb = %pool.total_cb,
            policy = %pool.policy,
            "Pool created"
        );

        Ok(pool)
    }

    /// Pools recorded so far
    pub async fn list_pools(&self, year: Option<i32>) -> ComplianceResult<Vec<Pool>> {
        self.pools.list(year).await
    }

    /// The member's record for the pool year, else its latest record
    async fn resolve_member(&self, route_id: &str, year: i32) -> ComplianceResult<Route> {
        if let Some(route) = self.routes.find(route_id, year).await? {
            return Ok(route);
        }

        self.routes
            .find_by_route_id(route_id)
            .await?
            .into_iter()
            .max_by_key(|r| r.year)
            .ok_or_else(|| ComplianceError::route_not_found(route_id, None))
    }
}
