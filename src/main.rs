//! Simultaneous Kelly Sizing Engine - Entry Point
//!
//! Sizes every wager on one fight card and prints the wager sheet as
//! JSON on stdout. Logs go to stderr so the sheet stays pipeable.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging to stderr)
//! 3. Read the card snapshot named on the command line
//! 4. Build the projected gradient solver from config
//! 5. Size the card through BetSizer
//! 6. Print the wager sheet JSON on stdout

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use anyhow::{Context, Result};
use tracing::info;

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::solver::{ProjectedGradientConfig, ProjectedGradientSolver};
use domain::{CardSnapshot, FightCard};
use usecases::bet_sizer::BetSizer;

fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.engine.log_level)
                }),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    info!(
        name = %config.engine.name,
        version = env!("CARGO_PKG_VERSION"),
        fraction = config.staking.fraction,
        "Starting Kelly sizing engine"
    );

    // ── 3. Read the card snapshot ───────────────────────────
    let snapshot_path = std::env::args()
        .nth(1)
        .context("Usage: simkelly <card-snapshot.json>")?;
    let raw = std::fs::read_to_string(&snapshot_path)
        .with_context(|| format!("Failed to read card snapshot: {snapshot_path}"))?;
    let snapshot: CardSnapshot =
        serde_json::from_str(&raw).context("Failed to parse card snapshot")?;
    let card = FightCard::new(snapshot.bouts).context("Card failed validation")?;

    // ── 4. Build the solver from config ─────────────────────
    let solver = ProjectedGradientSolver::new(ProjectedGradientConfig {
        max_iterations: config.solver.max_iterations,
        tolerance: config.solver.tolerance,
        ..ProjectedGradientConfig::default()
    });

    // ── 5. Size the card ────────────────────────────────────
    let sizer = BetSizer::new(solver, config.staking.clone())
        .context("Staking limits failed validation")?;
    let sheet = sizer
        .size_card(&card, snapshot.bankroll)
        .context("Sizing failed")?;

    // ── 6. Print the wager sheet ────────────────────────────
    println!("{}", serde_json::to_string_pretty(&sheet)?);

    Ok(())
}
