//! CB Calculator
//!
//! Pure formulas plus a repository-backed calculator that resolves the
//! route and its applicable baseline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{round_presentation, ADJUSTMENT_FACTOR, MJ_PER_TONNE, TARGET_GHG_INTENSITY};
use crate::error::{ComplianceError, ComplianceResult};
use crate::repository::RouteRepository;
use crate::types::Route;

/// Energy-based CB against a target intensity.
///
/// `energy = tonnes * 41000`, `cb = (target - route) * energy`.
/// Positive is surplus, negative is deficit. Not rounded.
/// `None` when the result does not fit a `Decimal`.
pub fn compute_cb(route_ghg: Decimal, fuel_consumption_tonnes: Decimal, target_ghg: Decimal) -> Option<Decimal> {
    let energy = fuel_consumption_tonnes.checked_mul(MJ_PER_TONNE)?;
    target_ghg.checked_sub(route_ghg)?.checked_mul(energy)
}

/// Baseline-relative CB figures (unrounded)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceBalance {
    /// `(baseline - route) * distance`
    pub cb: Decimal,
    /// `cb * 0.95`
    pub adjusted_cb: Decimal,
    /// `route <= baseline`
    pub compliant: bool,
}

impl ComplianceBalance {
    /// CB rounded for presentation
    pub fn cb_rounded(&self) -> Decimal {
        round_presentation(self.cb)
    }

    /// Adjusted CB rounded for presentation
    pub fn adjusted_cb_rounded(&self) -> Decimal {
        round_presentation(self.adjusted_cb)
    }
}

/// Distance-based CB relative to a baseline intensity, `None` on overflow
pub fn compute_compliance_balance(
    baseline_ghg: Decimal,
    route_ghg: Decimal,
    distance: Decimal,
) -> Option<ComplianceBalance> {
    let cb = baseline_ghg.checked_sub(route_ghg)?.checked_mul(distance)?;
    Some(ComplianceBalance {
        cb,
        adjusted_cb: cb.checked_mul(ADJUSTMENT_FACTOR)?,
        compliant: route_ghg <= baseline_ghg,
    })
}

/// Baseline-relative compliance of one route
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCompliance {
    pub route_id: String,
    pub year: i32,
    /// Year of the baseline that was applied
    pub baseline_year: i32,
    /// Route ID of the baseline that was applied
    pub baseline_route_id: String,
    pub balance: ComplianceBalance,
}

/// Energy-based compliance of one route against the regulatory target
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetCompliance {
    pub route_id: String,
    pub year: i32,
    pub target_ghg: Decimal,
    pub cb: Decimal,
}

impl TargetCompliance {
    pub fn is_surplus(&self) -> bool {
        self.cb > Decimal::ZERO
    }
}

/// Repository-backed CB calculator
#[derive(Clone)]
pub struct ComplianceCalculator {
    routes: Arc<dyn RouteRepository>,
}

impl ComplianceCalculator {
    /// Create a calculator using the regulatory target
    pub fn new(routes: Arc<dyn RouteRepository>) -> Self {
        Self { routes }
    }

    /// Load a route by `(route_id, year)` or fail with not found
    pub async fn load_route(&self, route_id: &str, year: i32) -> ComplianceResult<Route> {
        self.routes
            .find(route_id, year)
            .await?
            .ok_or_else(|| ComplianceError::route_not_found(route_id, Some(year)))
    }

    /// Baseline-relative CB for `(route_id, year)`
    pub async fn route_compliance(&self, route_id: &str, year: i32) -> ComplianceResult<RouteCompliance> {
        let route = self.load_route(route_id, year).await?;

        let baseline = self
            .routes
            .baseline_for_year(route.year)
            .await?
            .ok_or(ComplianceError::BaselineNotFound { year: Some(route.year) })?;

        let balance = compute_compliance_balance(baseline.ghg_intensity, route.ghg_intensity, route.distance)
            .ok_or_else(|| ComplianceError::BalanceOverflow {
                route_id: route.route_id.clone(),
            })?;

        tracing::debug!(
            route_id,
            year,
            baseline = %baseline.key(),
            cb = %balance.cb,
            "Computed baseline-relative CB"
        );

        Ok(RouteCompliance {
            route_id: route.route_id,
            year: route.year,
            baseline_year: baseline.year,
            baseline_route_id: baseline.route_id,
            balance,
        })
    }

    /// Energy-based CB for `(route_id, year)` against the target
    pub async fn target_compliance(&self, route_id: &str, year: i32) -> ComplianceResult<TargetCompliance> {
        let route = self.load_route(route_id, year).await?;
        let cb = compute_cb(route.ghg_intensity, route.fuel_consumption, TARGET_GHG_INTENSITY)
            .ok_or_else(|| ComplianceError::BalanceOverflow {
                route_id: route.route_id.clone(),
            })?;

        tracing::debug!(route_id, year, cb = %cb, "Computed target CB");

        Ok(TargetCompliance {
            route_id: route.route_id,
            year: route.year,
            target_ghg: TARGET_GHG_INTENSITY,
            cb,
        })
    }
}
