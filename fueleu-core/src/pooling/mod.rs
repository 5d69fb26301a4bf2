//! Pooling
//!
//! Each member's pooling CB is `(89.3368 - ghg_intensity) * distance * 10`,
//! independent of the baseline. The redistribution step is pluggable through
//! [`RedistributionPolicy`]; the shipped policy is the identity.

mod allocator;

pub use allocator::*;

use rust_decimal::Decimal;

/// Minimum number of members in a pool
pub const MIN_POOL_MEMBERS: usize = 2;

/// Redistribution of CB among pool members
pub trait RedistributionPolicy: Send + Sync {
    /// Policy name, recorded on the pool
    fn name(&self) -> &'static str;

    /// Map each member's `cb_before` to its `cb_after`, same order and length.
    /// Implementations must conserve the total.
    fn redistribute(&self, cb_before: &[Decimal]) -> Vec<Decimal>;
}

/// Every member keeps its own CB
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityRedistribution;

impl RedistributionPolicy for IdentityRedistribution {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn redistribute(&self, cb_before: &[Decimal]) -> Vec<Decimal> {
        cb_before.to_vec()
    }
}
