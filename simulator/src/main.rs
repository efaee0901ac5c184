//! Sarraf Simulator
//!
//! Drives the back office end to end against a fresh store: seeds
//! defaults, runs a scripted scenario and prints the resulting dashboard
//! figures.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use sarraf_store::Store;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod scenario;

use scenario::{Backoffice, Scenario};

/// Sarraf scenario driver CLI.
#[derive(Parser, Debug)]
#[command(name = "simulator")]
#[command(about = "Sarraf back-office scenario driver")]
struct Args {
    /// Scenario to run
    #[arg(short, long, default_value = "settlement-day")]
    scenario: String,

    /// Persist the store to this JSON file instead of running in memory
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Wipe the store before running
    #[arg(long)]
    reset: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let store = match &args.data_file {
        Some(path) => {
            info!(path = %path.display(), "Using file-backed store");
            Arc::new(Store::open(path)?)
        }
        None => Arc::new(Store::in_memory()),
    };

    if args.reset {
        store.clear_all()?;
    }
    store.seed_defaults()?;

    let backoffice = Backoffice::new(store);
    let scenario = Scenario::load(&args.scenario)?;

    info!(scenario = %args.scenario, "Running scenario");
    scenario.run(&backoffice)?;

    let summary = backoffice.reports.dashboard()?;
    info!("Scenario complete");
    info!("Total SDG: {}", summary.total_sdg);
    info!("Total AED: {}", summary.total_aed);
    info!("Total value (AED): {}", summary.total_in_aed);
    info!("Pending: {}", summary.pending_count);
    info!("In progress: {}", summary.in_progress_count);
    info!("Profit/loss (AED): {}", summary.profit_loss);

    Ok(())
}
