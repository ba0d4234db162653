//! # Mercury POS Terminal
//!
//! Process bootstrap for a simulated store of checkout lanes.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        mercury-terminal                                 │
//! │                                                                         │
//! │   stdin commands ──► lane dispatch ──► StoreComposite                   │
//! │                                            │ tick loop                  │
//! │                                            ▼                            │
//! │                                  Journal ──► stdout / TCP collector     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `dev` mode wires everything in memory; `prod` has no wiring yet and
//! exits with a configuration error.

mod cli;
mod simulator;

use anyhow::bail;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, RunMode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    info!(mode = %cli.mode, store = %cli.store, lanes = cli.lanes, "starting terminal");

    match cli.mode {
        RunMode::Dev => simulator::run(cli).await,
        RunMode::Prod => {
            bail!("prod mode has no persistence wiring yet; run with --mode dev")
        }
    }
}

/// Installs the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - show debug messages everywhere
/// - `RUST_LOG=mercury=trace` - trace for mercury crates only
/// - Default: `info,mercury=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mercury=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
