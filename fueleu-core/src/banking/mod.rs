//! Banking Ledger
//!
//! Core invariants:
//! - Entries are append-only and ordered by creation time
//! - A route's balance is the sum of `credit - debit` over its entries
//! - The balance never goes negative: `apply` is refused when it would
//! - `bank` only deposits a strictly positive CB
//!
//! Every operation on one route runs under that route's lock, so concurrent
//! `apply` calls cannot both spend the same balance.

mod ledger;

pub use ledger::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Which CB figure `bank` deposits
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BankingBasis {
    /// Energy-based CB against the regulatory target intensity
    #[default]
    RegulatoryTarget,
    /// Distance-based CB against the applicable baseline route
    BaselineRelative,
}

impl BankingBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            BankingBasis::RegulatoryTarget => "regulatory-target",
            BankingBasis::BaselineRelative => "baseline-relative",
        }
    }
}

impl std::fmt::Display for BankingBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BankingBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regulatory-target" | "target" => Ok(BankingBasis::RegulatoryTarget),
            "baseline-relative" | "baseline" => Ok(BankingBasis::BaselineRelative),
            other => Err(format!(
                "unknown banking basis '{}' (expected regulatory-target or baseline-relative)",
                other
            )),
        }
    }
}

type LockMap = HashMap<String, Arc<Mutex<()>>>;

/// Per-route lock registry
///
/// Entries live only while a guard or waiter references them. Releasing a
/// guard sweeps every entry nobody else holds.
#[derive(Debug, Default)]
pub struct RouteLocks {
    locks: Arc<StdMutex<LockMap>>,
}

impl RouteLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `route_id`, creating it on first use
    pub async fn acquire(&self, route_id: &str) -> RouteGuard {
        let lock = {
            let mut locks = lock_map(&self.locks);
            locks
                .entry(route_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        RouteGuard {
            guard: Some(lock.lock_owned().await),
            locks: Arc::clone(&self.locks),
        }
    }

    /// Number of routes currently locked or awaited
    pub fn len(&self) -> usize {
        lock_map(&self.locks).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Held route lock; releases and prunes the registry on drop
#[derive(Debug)]
pub struct RouteGuard {
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<StdMutex<LockMap>>,
}

impl Drop for RouteGuard {
    fn drop(&mut self) {
        // Release first so the entry's only remaining owner is the map
        drop(self.guard.take());
        lock_map(&self.locks).retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}

fn lock_map(locks: &StdMutex<LockMap>) -> MutexGuard<'_, LockMap> {
    locks.lock().unwrap_or_else(PoisonError::into_inner)
}
