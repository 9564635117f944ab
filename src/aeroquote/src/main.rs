//! AeroQuote CLI — reproduce quotes offline from a published snapshot file.
//!
//! Invoicing runs the exact same calculator the configurator does, against
//! the snapshot the customer was quoted on, so the figures cannot drift.

use aeroplan_core::{Money, PricingResult};
use aeroplan_pricing::calculator::{calculate_monthly_price, price_matrix, QuoteInput};
use aeroplan_pricing::snapshot::{PricingSnapshot, SnapshotPayload};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "aeroquote")]
#[command(about = "Offline quote reproduction against a published pricing snapshot")]
#[command(version)]
struct Cli {
    /// Path to a snapshot JSON file (as served by /v1/pricing/snapshot)
    #[arg(short, long)]
    snapshot: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price one set of selections
    Quote {
        /// Tier id (e.g. "performance")
        #[arg(short, long)]
        tier: String,

        /// Usage band id (e.g. "20-50")
        #[arg(short, long)]
        band: String,

        /// Add-on id; repeat for multiple
        #[arg(short, long = "add-on")]
        add_ons: Vec<String>,

        /// Location slug ("none" for own storage)
        #[arg(short, long)]
        location: Option<String>,

        /// Emit the full breakdown as JSON instead of a summary
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Price the selections at every usage band
    Matrix {
        /// Tier id
        #[arg(short, long)]
        tier: String,

        /// Add-on id; repeat for multiple
        #[arg(short, long = "add-on")]
        add_ons: Vec<String>,

        /// Location slug
        #[arg(short, long)]
        location: Option<String>,
    },

    /// Show the snapshot's label, publication time, and catalog counts
    Info,
}

fn load_payload(path: &str) -> PricingResult<(Option<PricingSnapshot>, SnapshotPayload)> {
    let raw = std::fs::read_to_string(path)?;
    // Accept either a full snapshot record or a bare payload.
    if let Ok(snapshot) = serde_json::from_str::<PricingSnapshot>(&raw) {
        let payload = snapshot.payload.clone();
        return Ok((Some(snapshot), payload));
    }
    let payload: SnapshotPayload = serde_json::from_str(&raw)?;
    Ok((None, payload))
}

fn cmd_quote(
    payload: &SnapshotPayload,
    tier: String,
    band: String,
    add_ons: Vec<String>,
    location: Option<String>,
    json: bool,
) -> PricingResult<()> {
    let input = QuoteInput {
        tier_id: tier,
        usage_band_id: Some(band),
        add_on_ids: add_ons,
        location_id: location,
    };
    let breakdown = calculate_monthly_price(&input, payload)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    println!("Base price:           {}", breakdown.base_price);
    println!("Usage adjusted:       {}", breakdown.usage_adjusted_price);
    for line in &breakdown.add_on_lines {
        println!("Add-on {:<14} {}", format!("({})", line.id), line.price);
    }
    match breakdown.hangar_cost {
        Some(cost) => println!("Hangar:               {cost}"),
        None => println!("Hangar:               not selected"),
    }
    println!("Total monthly:        {}", breakdown.total);
    Ok(())
}

fn cmd_matrix(
    payload: &SnapshotPayload,
    tier: String,
    add_ons: Vec<String>,
    location: Option<String>,
) -> PricingResult<()> {
    let input = QuoteInput {
        tier_id: tier,
        usage_band_id: None,
        add_on_ids: add_ons,
        location_id: location,
    };
    let rows = price_matrix(&input, payload)?;

    println!("{:<10} {:>10} {:>14}", "band", "multiplier", "total");
    for row in rows {
        println!(
            "{:<10} {:>9.2}x {:>14}",
            row.usage_band_id,
            row.multiplier_bps as f64 / 10_000.0,
            row.breakdown.total.to_string(),
        );
    }
    Ok(())
}

fn cmd_info(snapshot: Option<&PricingSnapshot>, payload: &SnapshotPayload) {
    if let Some(s) = snapshot {
        println!("Snapshot:    {} ({})", s.label, s.id);
        println!("Published:   {}", s.published_at);
    } else {
        println!("Snapshot:    bare payload (no publication record)");
    }
    println!("Tiers:       {}", payload.tiers.len());
    println!("Usage bands: {}", payload.usage_bands.len());
    println!("Add-ons:     {}", payload.add_ons.len());
    println!("Locations:   {}", payload.locations.len());
    let active_total: Money = payload
        .tiers
        .iter()
        .filter(|t| t.active)
        .map(|t| t.base_monthly)
        .sum();
    println!("Active tier base sum: {active_total}");
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (snapshot, payload) = match load_payload(&cli.snapshot) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: failed to load snapshot '{}': {e}", cli.snapshot);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Quote {
            tier,
            band,
            add_ons,
            location,
            json,
        } => cmd_quote(&payload, tier, band, add_ons, location, json),
        Commands::Matrix {
            tier,
            add_ons,
            location,
        } => cmd_matrix(&payload, tier, add_ons, location),
        Commands::Info => {
            cmd_info(snapshot.as_ref(), &payload);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
