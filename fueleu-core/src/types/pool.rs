//! Pool Types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Member reference in a pooling request
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolMemberRef {
    pub route_id: String,
}

impl PoolMemberRef {
    pub fn new(route_id: impl Into<String>) -> Self {
        Self {
            route_id: route_id.into(),
        }
    }
}

/// Per-member pooling figures
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolMember {
    /// Member route
    pub route_id: String,
    /// Vessel type of the member route
    pub ship: String,
    /// CB before redistribution
    pub cb_before: Decimal,
    /// CB after redistribution
    pub cb_after: Decimal,
}

/// A pooling event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    /// Pool ID
    pub id: String,
    /// Reporting year
    pub year: i32,
    /// Sum of member CB before redistribution (unrounded)
    pub total_cb: Decimal,
    /// Redistribution policy name
    pub policy: String,
    /// Members
    pub members: Vec<PoolMember>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Pool {
    /// Sum of `cb_before` across members
    pub fn sum_before(&self) -> Decimal {
        self.members.iter().map(|m| m.cb_before).sum()
    }

    /// Sum of `cb_after` across members
    pub fn sum_after(&self) -> Decimal {
        self.members.iter().map(|m| m.cb_after).sum()
    }
}
