//! Store Repositories
//!
//! In-memory implementations of the `fueleu-core` repository contracts.

mod memory_ledger_repo;
mod memory_pool_repo;
mod memory_route_repo;

pub use memory_ledger_repo::*;
pub use memory_pool_repo::*;
pub use memory_route_repo::*;
