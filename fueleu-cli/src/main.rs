//! FuelEU CLI Entry Point
//!
//! Configuration is loaded from environment variables (via .env file).
//! Command-line arguments override environment variables.
//!
//! Usage:
//!   fueleu start        - Start the API server
//!   fueleu health       - Check health of the API
//!   fueleu routes       - List routes, set the baseline, compare
//!   fueleu compliance   - Compliance balance queries
//!   fueleu banking      - Bank and apply surplus CB
//!   fueleu pooling      - Create and list pools

use clap::Parser;
use fueleu_cli::{handler, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Err(e) = handler::run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

/// Initialize logging with tracing
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "fueleu_cli=debug,fueleu_api=debug,fueleu_core=debug,fueleu_store=debug,tower_http=debug"
    } else {
        "fueleu_cli=info,fueleu_api=info,fueleu_core=info,fueleu_store=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
