//! Compliance Balance
//!
//! Two CB formulas coexist and are kept as separate operations:
//! - energy-based, against a fixed regulatory target ([`compute_cb`])
//! - distance-based, against a designated baseline route ([`compute_compliance_balance`])
//!
//! Presentation values are rounded to 2 decimals; sign and compliance checks
//! always use the unrounded figures.

mod calculator;
mod comparison;

pub use calculator::*;
pub use comparison::*;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Route;

/// Regulatory target GHG intensity (gCO2eq/MJ)
pub const TARGET_GHG_INTENSITY: Decimal = Decimal::from_parts(893368, 0, 0, false, 4);

/// Energy content of one tonne of fuel (MJ)
pub const MJ_PER_TONNE: Decimal = Decimal::from_parts(41000, 0, 0, false, 0);

/// Flat haircut applied to the baseline-relative CB
pub const ADJUSTMENT_FACTOR: Decimal = Decimal::from_parts(95, 0, 0, false, 2);

/// Scale applied by the pooling CB formula
pub const POOL_CB_SCALE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Decimal places for presented figures
pub const PRESENTATION_DECIMALS: u32 = 2;

/// Round a figure for external presentation
pub fn round_presentation(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRESENTATION_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// Pick the applicable baseline for `year`: the flagged route with the
/// largest year not after `year`.
pub fn resolve_baseline(routes: &[Route], year: i32) -> Option<&Route> {
    routes
        .iter()
        .filter(|r| r.is_baseline && r.year <= year)
        .max_by_key(|r| r.year)
}
