//! Compliance Commands

use clap::Subcommand;

/// Compliance subcommands
#[derive(Subcommand, Debug)]
pub enum ComplianceCommands {
    /// Baseline-relative compliance balance
    Cb {
        /// Route ID
        #[arg(short, long)]
        route_id: String,

        /// Reporting year
        #[arg(short, long)]
        year: i32,
    },

    /// Compliance balance with the 0.95 adjustment
    AdjustedCb {
        /// Route ID
        #[arg(short, long)]
        route_id: String,

        /// Reporting year
        #[arg(short, long)]
        year: i32,
    },
}
