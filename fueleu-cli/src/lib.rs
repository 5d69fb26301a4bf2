//! FuelEU CLI - Command Line Interface
//!
//! Runs the FuelEU API server and talks to a running instance.
//!
//! # Usage
//!
//! ```text
//! fueleu [OPTIONS] <COMMAND>
//!
//! Commands:
//!   start       Start the API server
//!   health      Check health of the API
//!   routes      Routes and baseline
//!   compliance  Compliance balance
//!   banking     Banking ledger
//!   pooling     Pooling
//!
//! Options:
//!   -a, --api-url <URL>    API endpoint URL [default: http://localhost:4000]
//!   -f, --format <FORMAT>  Output format (json, table, plain) [default: table]
//!   -v, --verbose          Enable verbose output
//!   -h, --help             Print help
//!   -V, --version          Print version
//! ```
//!
//! # Examples
//!
//! ## Start a seeded server
//! ```text
//! fueleu start --seed --port 4000
//! ```
//!
//! ## Compare routes against the baseline
//! ```text
//! fueleu routes set-baseline R3
//! fueleu routes compare
//! ```
//!
//! ## Bank and apply surplus
//! ```text
//! fueleu banking bank --route-id R2 --year 2024
//! fueleu banking apply --route-id R2 --amount 1000
//! ```
//!
//! ## Create a pool
//! ```text
//! fueleu pooling create --year 2024 --member R1,R2
//! ```

pub mod client;
pub mod commands;
pub mod error;
pub mod handler;
pub mod output;

pub use client::FuelEuClient;
pub use commands::{Cli, Commands, OutputFormat};
pub use error::{CliError, CliResult};

/// FuelEU CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
