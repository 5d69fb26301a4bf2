//! Route Commands

use clap::Subcommand;
use fueleu_core::RouteFilter;

/// Route subcommands
#[derive(Subcommand, Debug)]
pub enum RouteCommands {
    /// List routes
    List {
        /// Filter by vessel type
        #[arg(long)]
        vessel_type: Option<String>,

        /// Filter by fuel type
        #[arg(long)]
        fuel_type: Option<String>,

        /// Filter by year
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Designate the baseline route
    SetBaseline {
        /// Route ID
        route_id: String,
    },

    /// Compare every route against the baseline
    Compare,
}

impl RouteCommands {
    /// Filter for the list subcommand
    pub fn filter(&self) -> Option<RouteFilter> {
        match self {
            RouteCommands::List {
                vessel_type,
                fuel_type,
                year,
            } => Some(RouteFilter {
                vessel_type: vessel_type.clone(),
                fuel_type: fuel_type.clone(),
                year: *year,
            }),
            _ => None,
        }
    }
}
