//! FuelEU Compliance Core - Compliance Balance, Banking and Pooling
//!
//! Tracks vessel routes' GHG intensity against a regulatory target and a
//! designated baseline route. It provides:
//! - **CB Calculator**: energy-based CB against the target, distance-based CB against a baseline
//! - **Baseline Selector**: single-baseline designation, atomic or rolled back
//! - **Comparison**: percent difference of every route against the baseline
//! - **Banking Ledger**: append-only credits/debits with insufficient-funds protection
//! - **Pool Allocator**: pooling CB with a pluggable redistribution policy
//!
//! # Invariants
//!
//! | Invariant | Core Requirement |
//! |-----------|------------------|
//! | **Single Baseline** | At most one route carries `is_baseline` at any time |
//! | **Append-Only Ledger** | Entries are never edited or reordered; balance is their sum |
//! | **Non-Negative Balance** | `apply` never withdraws more than the banked balance |
//! | **Surplus-Only Banking** | `bank` only deposits a strictly positive CB |
//! | **Pool Conservation** | `sum(cb_after) == sum(cb_before) == total_cb` |
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 HTTP layer (fueleu-api)                  │
//! ├──────────────────────────────────────────────────────────┤
//! │  Calculator │ Baseline │ Comparator │ Ledger │ Pooling   │
//! │                   (this crate)                           │
//! ├──────────────────────────────────────────────────────────┤
//! │   RouteRepository │ LedgerRepository │ PoolRepository    │
//! │                 (fueleu-store)                           │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod banking;
pub mod baseline;
pub mod compliance;
pub mod error;
pub mod pooling;
pub mod repository;
pub mod types;

// Re-export error types
pub use error::{ComplianceError, ComplianceResult, ErrorKind};

// Re-export all types
pub use types::*;

// Re-export repository contracts
pub use repository::{LedgerRepository, PoolRepository, RouteRepository};

// Re-export compliance
pub use compliance::{
    compare_routes, compute_cb, compute_compliance_balance, percent_diff, resolve_baseline,
    round_presentation, BaselineSummary, Comparison, ComplianceBalance, ComplianceCalculator,
    RouteComparator, RouteComparison, RouteCompliance, TargetCompliance, ADJUSTMENT_FACTOR,
    MJ_PER_TONNE, POOL_CB_SCALE, PRESENTATION_DECIMALS, TARGET_GHG_INTENSITY,
};

// Re-export baseline
pub use baseline::BaselineSelector;

// Re-export banking
pub use banking::{BankingBasis, BankingLedger, RouteGuard, RouteLocks};

// Re-export pooling
pub use pooling::{
    allocate, pool_cb, validate_members, IdentityRedistribution, PoolAllocator,
    RedistributionPolicy, MIN_POOL_MEMBERS,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
