//! Command Handlers
//!
//! Handler functions for CLI commands.

use crate::client::FuelEuClient;
use crate::commands::{
    banking::BankingCommands, compliance::ComplianceCommands, pooling::PoolingCommands,
    routes::RouteCommands, Cli, Commands, OutputFormat,
};
use crate::error::{CliError, CliResult};
use crate::output;
use fueleu_api::{init_metrics, ApiConfig, AppState, MetricsConfig};
use fueleu_core::BankingBasis;
use fueleu_store::{load_routes_from_path, FuelEuDatabase};
use std::path::PathBuf;

/// Server options extracted from the `start` command
#[derive(Debug)]
struct StartOptions {
    host: String,
    port: u16,
    seed: bool,
    routes_file: Option<PathBuf>,
    banking_basis: BankingBasis,
}

impl StartOptions {
    fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Run the CLI with parsed arguments
pub async fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Start {
            host,
            port,
            seed,
            routes_file,
            banking_basis,
        } => {
            handle_start(StartOptions {
                host,
                port,
                seed,
                routes_file,
                banking_basis,
            })
            .await
        }
        command => {
            let client = FuelEuClient::new(&cli.api_url)?;
            match command {
                Commands::Health => handle_health(&client, cli.format).await,
                Commands::Routes(cmd) => handle_routes(&client, cmd, cli.format).await,
                Commands::Compliance(cmd) => handle_compliance(&client, cmd, cli.format).await,
                Commands::Banking(cmd) => handle_banking(&client, cmd, cli.format).await,
                Commands::Pooling(cmd) => handle_pooling(&client, cmd, cli.format).await,
                Commands::Start { .. } => unreachable!(),
            }
        }
    }
}

/// Build the in-memory database the server starts with
async fn prepare_database(options: &StartOptions) -> CliResult<FuelEuDatabase> {
    let database = FuelEuDatabase::in_memory();

    if let Some(path) = &options.routes_file {
        let routes = load_routes_from_path(path)?;
        let count = database.seed(routes).await?;
        tracing::info!(count, path = %path.display(), "Loaded routes from file");
    } else if options.seed {
        let count = database.seed_demo().await?;
        tracing::info!(count, "Loaded demo routes");
    }

    Ok(database)
}

/// Handle starting the API server
async fn handle_start(options: StartOptions) -> CliResult<()> {
    println!("Starting FuelEU API server...");
    println!("  Listen:        {}", options.listen_addr());
    println!("  Banking basis: {:?}", options.banking_basis);

    let database = prepare_database(&options).await?;

    let metrics_config = MetricsConfig::from_env();
    if metrics_config.enabled {
        init_metrics(&metrics_config)
            .map_err(|e| CliError::config(format!("Metrics exporter failed: {}", e)))?;
        println!("  Metrics:       0.0.0.0:{}", metrics_config.port);
    }

    let api_config = ApiConfig {
        listen_addr: options.listen_addr(),
        banking_basis: options.banking_basis,
        ..ApiConfig::default()
    };

    let state = AppState::with_config(api_config, database);

    fueleu_api::start_server(state)
        .await
        .map_err(|e| CliError::server(format!("Server error: {}", e)))?;

    Ok(())
}

/// Handle health check command
async fn handle_health(client: &FuelEuClient, format: OutputFormat) -> CliResult<()> {
    let health = client.health().await?;
    output::print_health(&health, format);
    Ok(())
}

/// Handle route commands
async fn handle_routes(
    client: &FuelEuClient,
    cmd: RouteCommands,
    format: OutputFormat,
) -> CliResult<()> {
    match cmd {
        RouteCommands::List { .. } => {
            let filter = cmd.filter().unwrap_or_default();
            let routes = client.list_routes(&filter).await?;
            output::print_routes(&routes, format);
        }
        RouteCommands::SetBaseline { route_id } => {
            let response = client.set_baseline(&route_id).await?;
            output::print_baseline(&response, format);
        }
        RouteCommands::Compare => {
            let comparison = client.comparison().await?;
            output::print_comparison(&comparison, format);
        }
    }
    Ok(())
}

/// Handle compliance commands
async fn handle_compliance(
    client: &FuelEuClient,
    cmd: ComplianceCommands,
    format: OutputFormat,
) -> CliResult<()> {
    match cmd {
        ComplianceCommands::Cb { route_id, year } => {
            let cb = client.compliance_cb(&route_id, year).await?;
            output::print_compliance_cb(&cb, format);
        }
        ComplianceCommands::AdjustedCb { route_id, year } => {
            let cb = client.adjusted_cb(&route_id, year).await?;
            output::print_adjusted_cb(&cb, format);
        }
    }
    Ok(())
}

/// Handle banking commands
async fn handle_banking(
    client: &FuelEuClient,
    cmd: BankingCommands,
    format: OutputFormat,
) -> CliResult<()> {
    match cmd {
        BankingCommands::Balance { route_id } => {
            let banked = client.banked(&route_id).await?;
            output::print_banked(&banked, format);
        }
        BankingCommands::Bank { route_id, year } => {
            let response = client.bank(&route_id, year).await?;
            output::print_ledger_entry(&response, format);
        }
        BankingCommands::Apply { route_id, amount } => {
            let response = client.apply(&route_id, amount).await?;
            output::print_ledger_entry(&response, format);
        }
        BankingCommands::Records { route_id } => {
            let records = client.bank_records(&route_id).await?;
            output::print_bank_records(&records, format);
        }
        BankingCommands::Reset { yes } => {
            if !yes {
                return Err(CliError::invalid_arg(
                    "Refusing to reset the ledger without --yes",
                ));
            }
            let response = client.reset_ledger().await?;
            output::print_output(&response, format);
        }
    }
    Ok(())
}

/// Handle pooling commands
async fn handle_pooling(
    client: &FuelEuClient,
    cmd: PoolingCommands,
    format: OutputFormat,
) -> CliResult<()> {
    match cmd {
        PoolingCommands::Create { year, members } => {
            let pool = client.create_pool(year, &members).await?;
            output::print_pool(&pool, format);
        }
        PoolingCommands::List { year } => {
            let pools = client.list_pools(year).await?;
            match format {
                OutputFormat::Json => output::print_output(&pools, format),
                OutputFormat::Table | OutputFormat::Plain => {
                    if pools.is_empty() {
                        output::print_info("No pools recorded.");
                    }
                    for pool in &pools {
                        output::print_pool(pool, format);
                        println!();
                    }
                }
            }
        }
    }
    Ok(())
}
