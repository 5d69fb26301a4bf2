//! CLI Commands Module
//!
//! Command definitions for the FuelEU CLI.

pub mod banking;
pub mod compliance;
pub mod pooling;
pub mod routes;

use clap::{Parser, Subcommand};
use fueleu_core::BankingBasis;
use std::path::PathBuf;

/// FuelEU Maritime compliance CLI
#[derive(Parser, Debug)]
#[command(name = "fueleu")]
#[command(version)]
#[command(about = "FuelEU Maritime compliance Command Line Interface")]
#[command(long_about = "A command-line tool for the FuelEU compliance service.\n\n\
    Use it to run the API server, inspect routes and their compliance balance, \
    bank and apply surplus CB, and create pools.")]
pub struct Cli {
    /// API endpoint URL
    #[arg(short, long, env = "FUELEU_API_URL", default_value = "http://localhost:4000")]
    pub api_url: String,

    /// Output format (json, table, plain)
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Table format (human-readable)
    #[default]
    Table,
    /// Plain text
    Plain,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server
    Start {
        /// Host to bind to (env: FUELEU_API_HOST)
        #[arg(short = 'H', long, env = "FUELEU_API_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on (env: FUELEU_API_PORT)
        #[arg(short, long, env = "FUELEU_API_PORT", default_value = "4000")]
        port: u16,

        /// Load the demo routes at startup (env: FUELEU_SEED)
        #[arg(long, env = "FUELEU_SEED")]
        seed: bool,

        /// Load routes from a JSON file at startup
        #[arg(long)]
        routes_file: Option<PathBuf>,

        /// CB figure deposited by bank (env: FUELEU_BANKING_BASIS)
        #[arg(long, env = "FUELEU_BANKING_BASIS", default_value = "regulatory-target")]
        banking_basis: BankingBasis,
    },

    /// Check health of the API
    Health,

    /// Routes and baseline
    #[command(subcommand)]
    Routes(routes::RouteCommands),

    /// Compliance balance
    #[command(subcommand)]
    Compliance(compliance::ComplianceCommands),

    /// Banking ledger
    #[command(subcommand)]
    Banking(banking::BankingCommands),

    /// Pooling
    #[command(subcommand)]
    Pooling(pooling::PoolingCommands),
}
