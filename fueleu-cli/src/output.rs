//! Output Formatting
//!
//! Utilities for formatting CLI output in various formats.

use crate::commands::OutputFormat;
use fueleu_api::{
    AdjustedCbResponse, BankRecordsResponse, BankedResponse, BaselineResponse,
    ComplianceCbResponse, HealthResponse, LedgerEntryResponse, PoolResponse,
};
use fueleu_core::{BankEntry, Comparison, Route};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Format and print data based on output format
pub fn print_output<T: Serialize>(data: &T, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(data),
        // No dedicated layout; fall back to JSON
        OutputFormat::Table | OutputFormat::Plain => print_json(data),
    }
}

/// Print as JSON
fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error formatting JSON: {}", e),
    }
}

/// Two-decimal rendering for tables
fn fmt_cb(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Print health response
pub fn print_health(health: &HealthResponse, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(health),
        OutputFormat::Table | OutputFormat::Plain => {
            println!("FuelEU Service Health");
            println!("=====================");
            println!("Status:  {}", health.status);
            println!("Version: {}", health.version);
            println!("Uptime:  {}s", health.uptime_secs);
            println!("Served:  {} requests", health.requests_served);
            println!();
            println!("Components:");
            for component in &health.components {
                print!("  - {}: {}", component.name, component.status);
                if let Some(msg) = &component.message {
                    print!(" ({})", msg);
                }
                println!();
            }
        }
    }
}

/// Print a route listing
pub fn print_routes(routes: &[Route], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&routes),
        OutputFormat::Plain => {
            for route in routes {
                println!(
                    "{} {} {} {} {}",
                    route.route_id, route.year, route.vessel_type, route.fuel_type, route.ghg_intensity
                );
            }
        }
        OutputFormat::Table => {
            println!(
                "{:<8} {:<6} {:<12} {:<10} {:>10} {:>12} {:>10} {:>12} {:<8}",
                "ROUTE", "YEAR", "VESSEL", "FUEL", "GHG", "FUEL (t)", "DISTANCE", "EMISSIONS", "BASELINE"
            );
            print_separator(96);
            for route in routes {
                println!(
                    "{:<8} {:<6} {:<12} {:<10} {:>10} {:>12} {:>10} {:>12} {:<8}",
                    route.route_id,
                    route.year,
                    route.vessel_type,
                    route.fuel_type,
                    route.ghg_intensity,
                    route.fuel_consumption,
                    route.distance,
                    route.total_emissions,
                    if route.is_baseline { "*" } else { "" }
                );
            }
        }
    }
}

/// Print the baseline designation result
pub fn print_baseline(response: &BaselineResponse, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(response),
        OutputFormat::Table | OutputFormat::Plain => {
            println!("{}", response.message);
            print_row("Route:", &response.updated.route_id);
            print_row("Year:", &response.updated.year.to_string());
            print_row("GHG Intensity:", &response.updated.ghg_intensity.to_string());
        }
    }
}

/// Print a baseline comparison
pub fn print_comparison(comparison: &Comparison, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(comparison),
        OutputFormat::Table | OutputFormat::Plain => {
            println!("Baseline Comparison");
            println!("===================");
            println!(
                "Baseline: {} ({} {}) {} gCO2e/MJ",
                comparison.baseline.route_id,
                comparison.baseline.fuel_type,
                comparison.baseline.year,
                comparison.baseline.ghg_intensity
            );
            println!();
            println!(
                "{:<8} {:<6} {:<10} {:>10} {:>10} {:<9}",
                "ROUTE", "YEAR", "FUEL", "GHG", "DIFF %", "COMPLIANT"
            );
            print_separator(58);
            for row in &comparison.comparison {
                println!(
                    "{:<8} {:<6} {:<10} {:>10} {:>10} {:<9}",
                    row.route_id,
                    row.year,
                    row.fuel_type,
                    row.ghg_intensity,
                    fmt_cb(row.percent_diff),
                    if row.compliant { "yes" } else { "no" }
                );
            }
        }
    }
}

/// Print a compliance balance
pub fn print_compliance_cb(cb: &ComplianceCbResponse, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(cb),
        OutputFormat::Table | OutputFormat::Plain => {
            println!("Compliance Balance");
            println!("==================");
            print_row("Route:", &cb.route_id);
            print_row("Year:", &cb.year.to_string());
            print_row("Baseline Year:", &cb.baseline_year.to_string());
            print_row("CB (gCO2e):", &fmt_cb(cb.cb_gco2eq));
            print_row("Compliant:", &cb.compliant);
        }
    }
}

/// Print an adjusted compliance balance
pub fn print_adjusted_cb(cb: &AdjustedCbResponse, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(cb),
        OutputFormat::Table | OutputFormat::Plain => {
            println!("Adjusted Compliance Balance");
            println!("===========================");
            print_row("Route:", &cb.route_id);
            print_row("Year:", &cb.year.to_string());
            print_row("Baseline Year:", &cb.baseline_year.to_string());
            print_row("CB (gCO2e):", &fmt_cb(cb.cb_gco2eq));
            print_row("Adjusted CB:", &fmt_cb(cb.adjusted_cb));
            print_row("Compliant:", &cb.compliant);
        }
    }
}

/// Print a banked balance
pub fn print_banked(banked: &BankedResponse, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(banked),
        OutputFormat::Plain => println!("{}", fmt_cb(banked.amount)),
        OutputFormat::Table => {
            print_row("Route:", &banked.route_id);
            print_row("Banked:", &fmt_cb(banked.amount));
        }
    }
}

/// Print a bank or apply result
pub fn print_ledger_entry(response: &LedgerEntryResponse, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(response),
        OutputFormat::Table | OutputFormat::Plain => {
            println!("{}", response.message);
            print_entry_header();
            print_entry(&response.entry);
        }
    }
}

/// Print the ledger of a route
pub fn print_bank_records(records: &BankRecordsResponse, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(records),
        OutputFormat::Table | OutputFormat::Plain => {
            println!("Bank Records: {}", records.route_id);
            println!("==============");
            print_entry_header();
            for entry in &records.records {
                print_entry(entry);
            }
            println!();
            print_row("Balance:", &fmt_cb(records.balance));
        }
    }
}

fn print_entry_header() {
    println!(
        "{:<38} {:>16} {:>16} {:>16} {:<20}",
        "ENTRY", "CREDIT", "DEBIT", "BALANCE", "CREATED"
    );
    print_separator(110);
}

fn print_entry(entry: &BankEntry) {
    println!(
        "{:<38} {:>16} {:>16} {:>16} {:<20}",
        entry.id,
        fmt_cb(entry.credit),
        fmt_cb(entry.debit),
        fmt_cb(entry.balance),
        entry.created_at.format("%Y-%m-%d %H:%M:%S")
    );
}

/// Print a pool
pub fn print_pool(pool: &PoolResponse, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(pool),
        OutputFormat::Table | OutputFormat::Plain => {
            if let Some(message) = &pool.message {
                println!("{}", message);
            }
            print_row("Pool:", &pool.id);
            print_row("Year:", &pool.year.to_string());
            print_row("Policy:", &pool.policy);
            print_row("Total CB:", &fmt_cb(pool.total_cb));
            println!();
            println!("{:<8} {:<12} {:>16} {:>16}", "ROUTE", "SHIP", "CB BEFORE", "CB AFTER");
            print_separator(55);
            for member in &pool.members {
                println!(
                    "{:<8} {:<12} {:>16} {:>16}",
                    member.route_id,
                    member.ship,
                    fmt_cb(member.cb_before),
                    fmt_cb(member.cb_after)
                );
            }
        }
    }
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{}", message);
}

/// Print a table row
pub fn print_row(key: &str, value: &str) {
    println!("{:<20} {}", key, value);
}

/// Print a separator line
fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fmt_cb_rounds_half_away_from_zero() {
        assert_eq!(fmt_cb(dec!(7591.108)), "7591.11");
        assert_eq!(fmt_cb(dec!(-0.125)), "-0.13");
        assert_eq!(fmt_cb(Decimal::ZERO), "0.00");
    }

    #[test]
    fn test_print_routes_does_not_panic() {
        let routes = fueleu_store::demo_routes();
        print_routes(&routes, OutputFormat::Table);
        print_routes(&routes, OutputFormat::Plain);
        print_routes(&routes, OutputFormat::Json);
    }

    #[test]
    fn test_print_health_does_not_panic() {
        let health = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            uptime_secs: 5,
            requests_served: 12,
            components: vec![],
        };
        print_health(&health, OutputFormat::Table);
        print_health(&health, OutputFormat::Json);
    }

    #[test]
    fn test_print_row_format() {
        print_row("Key", "Value");
    }
}
