//! Data Transfer Objects
//!
//! Request and response bodies. Field names are camelCase on the wire.

use fueleu_core::{BankEntry, Pool, PoolMember, PoolMemberRef, Route, RouteCompliance};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

// ============================================
// Query DTOs
// ============================================

/// `?routeId&year` query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteYearQuery {
    pub route_id: Option<String>,
    pub year: Option<i32>,
}

impl RouteYearQuery {
    /// Both parameters, or a validation error naming the missing one
    pub fn require(self) -> ApiResult<(String, i32)> {
        let route_id = require_route_id(self.route_id)?;
        let year = self.year.ok_or_else(|| ApiError::validation("year is required"))?;
        Ok((route_id, year))
    }
}

/// `?routeId` query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteIdQuery {
    pub route_id: Option<String>,
}

impl RouteIdQuery {
    pub fn require(self) -> ApiResult<String> {
        require_route_id(self.route_id)
    }
}

/// `?year` query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

fn require_route_id(route_id: Option<String>) -> ApiResult<String> {
    route_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::validation("routeId is required"))
}

/// Wire form of a compliance flag
pub fn yes_no(compliant: bool) -> String {
    if compliant { "Yes" } else { "No" }.to_string()
}

// ============================================
// Route DTOs
// ============================================

/// Response to a baseline designation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineResponse {
    pub message: String,
    pub updated: Route,
}

// ============================================
// Compliance DTOs
// ============================================

/// Baseline-relative CB of one route
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceCbResponse {
    pub route_id: String,
    pub year: i32,
    /// Rounded to 2 decimals
    pub cb_gco2eq: Decimal,
    /// "Yes" or "No"
    pub compliant: String,
    pub baseline_year: i32,
}

impl From<&RouteCompliance> for ComplianceCbResponse {
    fn from(result: &RouteCompliance) -> Self {
        Self {
            route_id: result.route_id.clone(),
            year: result.year,
            cb_gco2eq: result.balance.cb_rounded(),
            compliant: yes_no(result.balance.compliant),
            baseline_year: result.baseline_year,
        }
    }
}

/// Baseline-relative CB plus the adjusted figure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedCbResponse {
    pub route_id: String,
    pub year: i32,
    pub cb_gco2eq: Decimal,
    pub adjusted_cb: Decimal,
    pub compliant: String,
    pub baseline_year: i32,
}

impl From<&RouteCompliance> for AdjustedCbResponse {
    fn from(result: &RouteCompliance) -> Self {
        Self {
            route_id: result.route_id.clone(),
            year: result.year,
            cb_gco2eq: result.balance.cb_rounded(),
            adjusted_cb: result.balance.adjusted_cb_rounded(),
            compliant: yes_no(result.balance.compliant),
            baseline_year: result.baseline_year,
        }
    }
}

// ============================================
// Banking DTOs
// ============================================

/// Banked balance of a route
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankedResponse {
    pub route_id: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
}

/// Request to bank a route's surplus
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankRequest {
    pub route_id: String,
    pub year: i32,
}

/// Request to apply banked CB
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub route_id: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
}

/// Ledger entry written by bank/apply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntryResponse {
    pub message: String,
    pub entry: BankEntry,
}

/// Ledger entries of a route
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankRecordsResponse {
    pub route_id: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,
    pub records: Vec<BankEntry>,
}

/// Result of a ledger reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub message: String,
    pub removed: u64,
}

// ============================================
// Pooling DTOs
// ============================================

/// Request to create a pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePoolRequest {
    pub year: i32,
    #[serde(default)]
    pub members: Vec<PoolMemberRef>,
}

/// A created or listed pool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub id: String,
    pub year: i32,
    /// Rounded to 2 decimals
    pub total_cb: Decimal,
    pub policy: String,
    pub members: Vec<PoolMember>,
}

impl From<Pool> for PoolResponse {
    fn from(pool: Pool) -> Self {
        Self {
            message: None,
            id: pool.id,
            year: pool.year,
            total_cb: fueleu_core::round_presentation(pool.total_cb),
            policy: pool.policy,
            members: pool.members,
        }
    }
}

impl PoolResponse {
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

// ============================================
// Health DTOs
// ============================================

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status
    pub status: String,
    /// Service version
    pub version: String,
    /// Uptime in seconds
    pub uptime_secs: u64,
    /// Requests handled since startup
    #[serde(default)]
    pub requests_served: u64,
    /// Component health
    pub components: Vec<ComponentHealth>,
}

/// Component health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
