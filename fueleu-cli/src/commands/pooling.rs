//! Pooling Commands

use clap::Subcommand;

/// Pooling subcommands
#[derive(Subcommand, Debug)]
pub enum PoolingCommands {
    /// Create a pool
    Create {
        /// Reporting year
        #[arg(short, long)]
        year: i32,

        /// Member route IDs (comma separated or repeated)
        #[arg(short, long = "member", value_delimiter = ',', required = true)]
        members: Vec<String>,
    },

    /// List recorded pools
    List {
        /// Filter by year
        #[arg(short, long)]
        year: Option<i32>,
    },
}
