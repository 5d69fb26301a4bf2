//! Baseline Comparison
//!
//! `percent_diff = ((route - baseline) / baseline) * 100`, rounded to 2 decimals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::round_presentation;
use crate::error::{ComplianceError, ComplianceResult};
use crate::repository::RouteRepository;
use crate::types::{Route, RouteFilter};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Baseline summary
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineSummary {
    pub route_id: String,
    pub fuel_type: String,
    pub ghg_intensity: Decimal,
    pub year: i32,
}

impl From<&Route> for BaselineSummary {
    fn from(route: &Route) -> Self {
        Self {
            route_id: route.route_id.clone(),
            fuel_type: route.fuel_type.clone(),
            ghg_intensity: route.ghg_intensity,
            year: route.year,
        }
    }
}

/// One route compared to the baseline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteComparison {
    pub route_id: String,
    pub vessel_type: String,
    pub fuel_type: String,
    pub year: i32,
    pub ghg_intensity: Decimal,
    pub baseline_intensity: Decimal,
    /// Rounded to 2 decimals
    pub percent_diff: Decimal,
    pub compliant: bool,
}

/// Full comparison result
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub baseline: BaselineSummary,
    pub comparison: Vec<RouteComparison>,
}

/// Percent difference of a route intensity against a baseline intensity
pub fn percent_diff(baseline: &Route, route_ghg: Decimal) -> ComplianceResult<Decimal> {
    if baseline.ghg_intensity.is_zero() {
        return Err(ComplianceError::ZeroBaselineIntensity {
            route_id: baseline.route_id.clone(),
        });
    }

    let percent = route_ghg
        .checked_sub(baseline.ghg_intensity)
        .and_then(|delta| delta.checked_div(baseline.ghg_intensity))
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .ok_or_else(|| ComplianceError::BalanceOverflow {
            route_id: baseline.route_id.clone(),
        })?;

    Ok(round_presentation(percent))
}

/// Compare every route whose ID differs from the baseline's
pub fn compare_routes(baseline: &Route, routes: &[Route]) -> ComplianceResult<Comparison> {
    if baseline.ghg_intensity.is_zero() {
        return Err(ComplianceError::ZeroBaselineIntensity {
            route_id: baseline.route_id.clone(),
        });
    }

    let comparison = routes
        .iter()
        .filter(|r| r.route_id != baseline.route_id)
        .map(|r| {
            Ok(RouteComparison {
                route_id: r.route_id.clone(),
                vessel_type: r.vessel_type.clone(),
                fuel_type: r.fuel_type.clone(),
                year: r.year,
                ghg_intensity: r.ghg_intensity,
                baseline_intensity: baseline.ghg_intensity,
                percent_diff: percent_diff(baseline, r.ghg_intensity)?,
                compliant: r.ghg_intensity <= baseline.ghg_intensity,
            })
        })
        .collect::<ComplianceResult<Vec<_>>>()?;

    Ok(Comparison {
        baseline: BaselineSummary::from(baseline),
        comparison,
    })
}

/// Repository-backed comparison against the current baseline
#[derive(Clone)]
pub struct RouteComparator {
    routes: Arc<dyn RouteRepository>,
}

impl RouteComparator {
    pub fn new(routes: Arc<dyn RouteRepository>) -> Self {
        Self { routes }
    }

    /// Compare all routes with the current baseline
    pub async fn compare_all(&self) -> ComplianceResult<Comparison> {
        let baseline = self
            .routes
            .current_baseline()
            .await?
            .ok_or(ComplianceError::BaselineNotFound { year: None })?;

        let routes = self.routes.list(&RouteFilter::all()).await?;
        let result = compare_routes(&baseline, &routes)?;

        tracing::debug!(
            baseline = %baseline.key(),
            compared = result.comparison.len(),
            "Compared routes against baseline"
        );

        Ok(result)
    }
}
