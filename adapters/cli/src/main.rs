#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a headless garden session.

mod config;
mod render;
mod script;
mod session;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use garden_core::{CellCoord, Command};
use garden_system_inspection::{Inspection, Subject};
use garden_world::{query, World};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{script::ScriptedBuild, session::Session};

/// Arguments accepted by the garden runner.
#[derive(Debug, Parser)]
#[command(author, version, about = "Headless garden simulation runner")]
struct Cli {
    /// Path to a TOML file overriding the default session tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of days to simulate
    #[arg(long, default_value_t = 10)]
    days: u32,

    /// Tower to buy before the first day, written as `NAME@COLUMN,ROW`
    #[arg(long = "build", value_parser = script::parse_build)]
    builds: Vec<ScriptedBuild>,

    /// Seed blight at `COLUMN,ROW` before the first day
    #[arg(long = "blight", value_parser = script::parse_cell)]
    blights: Vec<CellCoord>,

    /// Sell the tower at `COLUMN,ROW` after the last day
    #[arg(long = "sell", value_parser = script::parse_cell)]
    sales: Vec<CellCoord>,

    /// Print hover text for the tile at `COLUMN,ROW` at the end
    #[arg(long = "inspect", value_parser = script::parse_cell)]
    inspections: Vec<CellCoord>,

    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Entry point for the garden command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    install_logging(&cli.log_level)?;

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let mut session = Session::new(World::with_config(config));
    println!("{}", query::welcome_banner(session.world()));

    for cell in cli.blights {
        session.apply(Command::SpawnBlight { cell });
    }
    for build in &cli.builds {
        if !session.build(build)? {
            warn!(
                tower = %build.tower,
                column = build.cell.column(),
                row = build.cell.row(),
                "scripted build failed"
            );
        }
    }

    for _ in 0..cli.days {
        if session.advance_day() {
            warn!(day = query::day(session.world()), "blight reached its cap, the garden is lost");
            break;
        }
    }

    for cell in cli.sales {
        if !session.sell(cell) {
            warn!(column = cell.column(), row = cell.row(), "scripted sale failed");
        }
    }

    info!(days = query::day(session.world()), "simulation finished");
    println!("{}", render::board(session.world()));
    println!("{}", render::resources(session.world()));

    for cell in cli.inspections {
        match Inspection.hover_text(session.world(), Subject::Board(cell)) {
            Some(text) => println!("\n{text}"),
            None => println!("\n({}, {}) is empty", cell.column(), cell.row()),
        }
    }

    Ok(())
}

fn install_logging(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .with_context(|| format!("invalid log filter `{default_filter}`"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow!(error))
        .context("failed to install logging")
}
