//! Route Fixtures
//!
//! Demo routes for local runs, plus loading route sets from JSON files.

use fueleu_core::Route;
use rust_decimal::Decimal;
use std::path::Path;

use crate::error::{StoreError, StoreResult};

/// The three demo routes: two 2024 records and a flagged 2023 baseline
pub fn demo_routes() -> Vec<Route> {
    vec![
        Route::new("R1", 2024)
            .with_vessel("Cargo", "Diesel")
            .with_ghg_intensity(Decimal::new(754, 1))
            .with_fuel_consumption(Decimal::new(12005, 1))
            .with_distance(Decimal::new(8002, 1))
            .with_total_emissions(Decimal::new(3006, 1)),
        Route::new("R2", 2024)
            .with_vessel("Tanker", "LNG")
            .with_ghg_intensity(Decimal::new(621, 1))
            .with_fuel_consumption(Decimal::new(9003, 1))
            .with_distance(Decimal::new(6008, 1))
            .with_total_emissions(Decimal::new(2509, 1)),
        Route::new("R3", 2023)
            .with_vessel("Passenger", "Biofuel")
            .with_ghg_intensity(Decimal::new(502, 1))
            .with_fuel_consumption(Decimal::new(700, 0))
            .with_distance(Decimal::new(450, 0))
            .with_total_emissions(Decimal::new(1802, 1))
            .as_baseline(),
    ]
}

/// Parse a JSON array of routes
pub fn parse_routes(json: &str) -> StoreResult<Vec<Route>> {
    let routes: Vec<Route> = serde_json::from_str(json)?;
    if routes.iter().filter(|r| r.is_baseline).count() > 1 {
        return Err(StoreError::validation("route set flags more than one baseline"));
    }
    Ok(routes)
}

/// Load a JSON array of routes from a file
pub fn load_routes_from_path(path: impl AsRef<Path>) -> StoreResult<Vec<Route>> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    parse_routes(&contents)
}
