//! Route Types
//!
//! A route is one measured voyage record, identified by `(route_id, year)`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Route identity within a reporting year
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteKey {
    /// Route identifier
    pub route_id: String,
    /// Reporting year
    pub year: i32,
}

impl RouteKey {
    pub fn new(route_id: impl Into<String>, year: i32) -> Self {
        Self {
            route_id: route_id.into(),
            year,
        }
    }
}

impl std::fmt::Display for RouteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.route_id, self.year)
    }
}

/// Measured voyage record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Route identifier
    pub route_id: String,
    /// Vessel type (free-form)
    pub vessel_type: String,
    /// Fuel type (free-form)
    pub fuel_type: String,
    /// Reporting year
    pub year: i32,
    /// GHG intensity in gCO2eq/MJ
    pub ghg_intensity: Decimal,
    /// Fuel consumption in tonnes
    pub fuel_consumption: Decimal,
    /// Distance sailed
    pub distance: Decimal,
    /// Total emissions (denormalized)
    pub total_emissions: Decimal,
    /// Whether this route is the designated baseline
    #[serde(default)]
    pub is_baseline: bool,
}

impl Route {
    /// Create a non-baseline route with zeroed measurements
    pub fn new(route_id: impl Into<String>, year: i32) -> Self {
        Self {
            route_id: route_id.into(),
            vessel_type: String::new(),
            fuel_type: String::new(),
            year,
            ghg_intensity: Decimal::ZERO,
            fuel_consumption: Decimal::ZERO,
            distance: Decimal::ZERO,
            total_emissions: Decimal::ZERO,
            is_baseline: false,
        }
    }

    pub fn with_vessel(mut self, vessel_type: impl Into<String>, fuel_type: impl Into<String>) -> Self {
        self.vessel_type = vessel_type.into();
        self.fuel_type = fuel_type.into();
        self
    }

    pub fn with_ghg_intensity(mut self, ghg_intensity: Decimal) -> Self {
        self.ghg_intensity = ghg_intensity;
        self
    }

    pub fn with_fuel_consumption(mut self, fuel_consumption: Decimal) -> Self {
        self.fuel_consumption = fuel_consumption;
        self
    }

    pub fn with_distance(mut self, distance: Decimal) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_total_emissions(mut self, total_emissions: Decimal) -> Self {
        self.total_emissions = total_emissions;
        self
    }

    pub fn as_baseline(mut self) -> Self {
        self.is_baseline = true;
        self
    }

    /// Identity key
    pub fn key(&self) -> RouteKey {
        RouteKey::new(self.route_id.clone(), self.year)
    }
}

/// Optional filters for route listings
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteFilter {
    pub vessel_type: Option<String>,
    pub fuel_type: Option<String>,
    pub year: Option<i32>,
}

impl RouteFilter {
    /// Filter matching every route
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Check whether a route passes the filter
    ///
    /// String filters compare case-insensitively.
    pub fn matches(&self, route: &Route) -> bool {
        let text_matches = |wanted: &Option<String>, actual: &str| {
            wanted
                .as_deref()
                .map(|w| w.eq_ignore_ascii_case(actual))
                .unwrap_or(true)
        };

        text_matches(&self.vessel_type, &route.vessel_type)
            && text_matches(&self.fuel_type, &route.fuel_type)
            && self.year.map(|y| y == route.year).unwrap_or(true)
    }
}
