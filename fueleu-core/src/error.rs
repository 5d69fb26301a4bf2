//! FuelEU Error Codes Registry
//!
//! Error code format: FE-{area}-{sequence}
//! - FE-ROUTE: Route and baseline lookups
//! - FE-CB: Compliance balance computation
//! - FE-BANK: Banking ledger
//! - FE-POOL: Pooling
//! - FE-STORE: Storage collaborator faults

use rust_decimal::Decimal;
use thiserror::Error;

/// Compliance result type
pub type ComplianceResult<T> = Result<T, ComplianceError>;

/// Compliance error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComplianceError {
    // ============================================================
    // Route Errors (FE-ROUTE-*)
    // ============================================================
    /// [FE-ROUTE-001] Route not found
    #[error("[FE-ROUTE-001] Route {route_id} not found{}", year.map(|y| format!(" for year {}", y)).unwrap_or_default())]
    RouteNotFound { route_id: String, year: Option<i32> },

    /// [FE-ROUTE-002] No baseline designated
    #[error("[FE-ROUTE-002] No baseline route found{}", year.map(|y| format!(" for year {} or earlier", y)).unwrap_or_default())]
    BaselineNotFound { year: Option<i32> },

    /// [FE-ROUTE-003] Duplicate route record
    #[error("[FE-ROUTE-003] Route {route_id} already exists for year {year}")]
    DuplicateRoute { route_id: String, year: i32 },

    // ============================================================
    // Compliance Balance Errors (FE-CB-*)
    // ============================================================
    /// [FE-CB-001] Baseline intensity is zero, percent difference undefined
    #[error("[FE-CB-001] Baseline {route_id} has zero GHG intensity; percent difference is undefined")]
    ZeroBaselineIntensity { route_id: String },

    /// [FE-CB-002] Arithmetic overflow
    #[error("[FE-CB-002] Compliance balance overflow for route {route_id}")]
    BalanceOverflow { route_id: String },

    // ============================================================
    // Banking Errors (FE-BANK-*)
    // ============================================================
    /// [FE-BANK-001] Nothing to bank
    #[error("[FE-BANK-001] No surplus CB to bank for route {route_id}: computed {cb}")]
    NoSurplus { route_id: String, cb: Decimal },

    /// [FE-BANK-002] Apply amount must be positive
    #[error("[FE-BANK-002] Apply amount must be greater than zero, got {amount}")]
    NonPositiveAmount { amount: Decimal },

    /// [FE-BANK-003] Insufficient banked balance
    #[error("[FE-BANK-003] Insufficient banked balance for route {route_id}: required {required}, available {available}")]
    InsufficientBalance {
        route_id: String,
        required: Decimal,
        available: Decimal,
    },

    // ============================================================
    // Pooling Errors (FE-POOL-*)
    // ============================================================
    /// [FE-POOL-001] Too few members
    #[error("[FE-POOL-001] At least {minimum} members required, got {actual}")]
    TooFewPoolMembers { minimum: usize, actual: usize },

    /// [FE-POOL-002] Member listed twice
    #[error("[FE-POOL-002] Route {route_id} listed more than once in pool")]
    DuplicatePoolMember { route_id: String },

    // ============================================================
    // General Errors
    // ============================================================
    /// Invalid argument
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Invalid state
    #[error("Invalid state: {reason}")]
    InvalidState { reason: String },

    /// [FE-STORE-001] Storage collaborator fault
    #[error("[FE-STORE-001] Storage error: {message}")]
    Storage { message: String },
}

/// Caller-facing classification of a [`ComplianceError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing route, baseline or ledger target
    NotFound,
    /// Malformed or out-of-range input
    InvalidArgument,
    /// Precondition failure
    InvalidOperation,
    /// Withdrawal exceeds the banked balance
    InsufficientBalance,
    /// Data makes the requested computation undefined
    InvalidState,
    /// Collaborator fault, not a domain rule violation
    Internal,
}

impl ErrorKind {
    /// Stable name used in API error bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::InvalidOperation => "INVALID_OPERATION",
            ErrorKind::InsufficientBalance => "INSUFFICIENT_BALANCE",
            ErrorKind::InvalidState => "INVALID_STATE",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ComplianceError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ComplianceError::RouteNotFound { .. } | ComplianceError::BaselineNotFound { .. } => {
                ErrorKind::NotFound
            }
            ComplianceError::NonPositiveAmount { .. }
            | ComplianceError::TooFewPoolMembers { .. }
            | ComplianceError::DuplicatePoolMember { .. }
            | ComplianceError::DuplicateRoute { .. }
            | ComplianceError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            ComplianceError::NoSurplus { .. } => ErrorKind::InvalidOperation,
            ComplianceError::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            ComplianceError::ZeroBaselineIntensity { .. }
            | ComplianceError::BalanceOverflow { .. }
            | ComplianceError::InvalidState { .. } => ErrorKind::InvalidState,
            ComplianceError::Storage { .. } => ErrorKind::Internal,
        }
    }

    /// Create a route not found error
    pub fn route_not_found(route_id: impl Into<String>, year: Option<i32>) -> Self {
        ComplianceError::RouteNotFound {
            route_id: route_id.into(),
            year,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        ComplianceError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        ComplianceError::Storage {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ComplianceError {
    fn from(err: serde_json::Error) -> Self {
        ComplianceError::Storage {
            message: format!("serialization: {}", err),
        }
    }
}
