//! Banking Commands

use clap::Subcommand;
use rust_decimal::Decimal;

/// Banking subcommands
#[derive(Subcommand, Debug)]
pub enum BankingCommands {
    /// Show the banked balance of a route
    Balance {
        /// Route ID
        #[arg(short, long)]
        route_id: String,
    },

    /// Bank a route's surplus CB
    Bank {
        /// Route ID
        #[arg(short, long)]
        route_id: String,

        /// Reporting year
        #[arg(short, long)]
        year: i32,
    },

    /// Apply banked CB
    Apply {
        /// Route ID
        #[arg(short, long)]
        route_id: String,

        /// Amount to withdraw
        #[arg(short, long)]
        amount: Decimal,
    },

    /// List ledger entries of a route
    Records {
        /// Route ID
        #[arg(short, long)]
        route_id: String,
    },

    /// Remove every ledger entry
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}
