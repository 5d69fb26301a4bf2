//! Ledger Operations

use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{BankingBasis, RouteLocks};
use crate::compliance::ComplianceCalculator;
use crate::error::{ComplianceError, ComplianceResult};
use crate::repository::LedgerRepository;
use crate::types::{running_balance, BankEntry};

/// Banking ledger
#[derive(Clone)]
pub struct BankingLedger {
    /// Entry store
    entries: Arc<dyn LedgerRepository>,
    /// CB source for deposits
    calculator: ComplianceCalculator,
    /// Which CB figure is deposited
    basis: BankingBasis,
    /// Per-route serialization
    locks: Arc<RouteLocks>,
    /// Route operations take it shared, a full reset takes it exclusive
    reset_gate: Arc<RwLock<()>>,
}

impl BankingLedger {
    /// Create new ledger
    pub fn new(entries: Arc<dyn LedgerRepository>, calculator: ComplianceCalculator) -> Self {
        Self {
            entries,
            calculator,
            basis: BankingBasis::default(),
            locks: Arc::new(RouteLocks::new()),
            reset_gate: Arc::new(RwLock::new(())),
        }
    }

    /// Set the banking basis
    pub fn with_basis(mut self, basis: BankingBasis) -> Self {
        self.basis = basis;
        self
    }

    /// Banking basis in use
    pub fn basis(&self) -> BankingBasis {
        self.basis
    }

    /// Current banked balance; zero for a route with no entries
    pub async fn get_balance(&self, route_id: &str) -> ComplianceResult<Decimal> {
        let _gate = self.reset_gate.read().await;
        let _route = self.locks.acquire(route_id).await;
        self.balance_unlocked(route_id).await
    }

    /// Ordered entries for a route
    pub async fn records(&self, route_id: &str) -> ComplianceResult<Vec<BankEntry>> {
        let _gate = self.reset_gate.read().await;
        let _route = self.locks.acquire(route_id).await;
        self.entries.entries_for_route(route_id).await
    }

    /// Deposit the route's surplus CB for `year`
    pub async fn bank(&self, route_id: &str, year: i32) -> ComplianceResult<BankEntry> {
        let _gate = self.reset_gate.read().await;
        let _route = self.locks.acquire(route_id).await;

        let cb = self.surplus_for(route_id, year).await?;
        if cb <= Decimal::ZERO {
            tracing::warn!(route_id, year, cb = %cb, "Bank rejected: no surplus");
            return Err(ComplianceError::NoSurplus {
                route_id: route_id.to_string(),
                cb,
            });
        }

        let balance = self.balance_unlocked(route_id).await?;
        let new_balance = balance.checked_add(cb).ok_or_else(|| {
            tracing::warn!(route_id, year, cb = %cb, balance = %balance, "Bank rejected: balance overflow");
            ComplianceError::BalanceOverflow {
                route_id: route_id.to_string(),
            }
        })?;
        let entry = BankEntry::credit(route_id, cb, new_balance)?;
        let entry = self.entries.append(entry).await?;

        tracing::info!(
            route_id,
            year,
            basis = %self.basis,
            credit = %entry.credit,
            balance = %entry.balance,
            "Banked surplus CB"
        );

        Ok(entry)
    }

    /// Withdraw `amount` from the route's banked balance
    pub async fn apply(&self, route_id: &str, amount: Decimal) -> ComplianceResult<BankEntry> {
        if amount <= Decimal::ZERO {
            return Err(ComplianceError::NonPositiveAmount { amount });
        }

        let _gate = self.reset_gate.read().await;
        let _route = self.locks.acquire(route_id).await;

        let balance = self.balance_unlocked(route_id).await?;
        if amount > balance {
            tracing::warn!(route_id, amount = %amount, balance = %balance, "Apply rejected: insufficient balance");
            return Err(ComplianceError::InsufficientBalance {
                route_id: route_id.to_string(),
                required: amount,
                available: balance,
            });
        }

        let entry = BankEntry::debit(route_id, amount, balance - amount)?;
        let entry = self.entries.append(entry).await?;

        tracing::info!(
            route_id,
            debit = %entry.debit,
            balance = %entry.balance,
            "Applied banked CB"
        );

        Ok(entry)
    }

    /// Remove every ledger entry (administrative)
    pub async fn reset(&self) -> ComplianceResult<u64> {
        let _gate = self.reset_gate.write().await;
        let removed = self.entries.reset().await?;
        tracing::warn!(removed, "Banking ledger reset");
        Ok(removed)
    }

    async fn balance_unlocked(&self, route_id: &str) -> ComplianceResult<Decimal> {
        let entries = self.entries.entries_for_route(route_id).await?;
        Ok(running_balance(&entries))
    }

    async fn surplus_for(&self, route_id: &str, year: i32) -> ComplianceResult<Decimal> {
        match self.basis {
            BankingBasis::RegulatoryTarget => {
                Ok(self.calculator.target_compliance(route_id, year).await?.cb)
            }
            BankingBasis::BaselineRelative => {
                Ok(self.calculator.route_compliance(route_id, year).await?.balance.cb)
            }
        }
    }
}
