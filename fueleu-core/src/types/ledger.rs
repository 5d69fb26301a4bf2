//! Bank Entry Types
//!
//! One immutable ledger movement: a deposit (credit) or a withdrawal (debit).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ComplianceError, ComplianceResult};

/// Ledger movement direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Banked surplus
    Credit,
    /// Applied (withdrawn) surplus
    Debit,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Credit => write!(f, "credit"),
            EntryKind::Debit => write!(f, "debit"),
        }
    }
}

/// Bank ledger entry
///
/// Amounts travel as exact JSON numbers so a client can apply back the
/// balance it reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankEntry {
    /// Entry ID
    pub id: String,
    /// Route the entry belongs to (reference, not ownership)
    pub route_id: String,
    /// Deposited amount
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub credit: Decimal,
    /// Withdrawn amount
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub debit: Decimal,
    /// Cumulative balance after this entry
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Tie-breaker for entries created within the same instant, assigned by the store
    #[serde(default)]
    pub sequence: u64,
}

impl BankEntry {
    /// Create a credit entry
    pub fn credit(route_id: impl Into<String>, amount: Decimal, balance_after: Decimal) -> ComplianceResult<Self> {
        if amount <= Decimal::ZERO {
            return Err(ComplianceError::invalid_argument(format!(
                "credit amount must be positive, got {}",
                amount
            )));
        }
        Ok(Self::build(route_id.into(), amount, Decimal::ZERO, balance_after))
    }

    /// Create a debit entry
    pub fn debit(route_id: impl Into<String>, amount: Decimal, balance_after: Decimal) -> ComplianceResult<Self> {
        if amount <= Decimal::ZERO {
            return Err(ComplianceError::NonPositiveAmount { amount });
        }
        Ok(Self::build(route_id.into(), Decimal::ZERO, amount, balance_after))
    }

    fn build(route_id: String, credit: Decimal, debit: Decimal, balance: Decimal) -> Self {
        Self {
            id: format!("bank:{}", uuid::Uuid::new_v4()),
            route_id,
            credit,
            debit,
            balance,
            created_at: Utc::now(),
            sequence: 0,
        }
    }

    /// Movement direction
    pub fn kind(&self) -> EntryKind {
        if self.credit > Decimal::ZERO {
            EntryKind::Credit
        } else {
            EntryKind::Debit
        }
    }

    /// Signed effect on the balance
    pub fn delta(&self) -> Decimal {
        self.credit - self.debit
    }

    /// Exactly one of credit/debit is nonzero and neither is negative
    pub fn is_well_formed(&self) -> bool {
        let non_negative = self.credit >= Decimal::ZERO && self.debit >= Decimal::ZERO;
        let exactly_one = (self.credit > Decimal::ZERO) != (self.debit > Decimal::ZERO);
        non_negative && exactly_one
    }
}

/// Sum `credit - debit` over the entries
pub fn running_balance<'a>(entries: impl IntoIterator<Item = &'a BankEntry>) -> Decimal {
    entries
        .into_iter()
        .fold(Decimal::ZERO, |acc, entry| acc + entry.delta())
}

/// Sort entries by creation time, then store sequence
pub fn sort_entries(entries: &mut [BankEntry]) {
    entries.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.sequence.cmp(&b.sequence))
    });
}
