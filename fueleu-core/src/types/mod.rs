//! FuelEU Domain Types
//!
//! Naming conventions follow the JSON interface: fields serialize in camelCase.

mod ledger;
mod pool;
mod route;

pub use ledger::*;
pub use pool::*;
pub use route::*;
