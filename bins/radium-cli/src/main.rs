//! radium-cli - Inspect and query Radium checkpoints.
//!
//! Status and operator surface over the compiled-in checkpoint tables:
//! listing entries, the total-blocks estimate, hardened-checkpoint checks,
//! and the sync-checkpoint boundary for a given tip height.

mod config;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use radium_consensus::checkpoint::CheckpointRegistry;
use radium_consensus::sync::sync_boundary_height;
use radium_core::constants::{NetworkType, CHECKPOINT_SPAN};
use radium_core::types::Hash256;
use tracing::debug;

use crate::config::{CliConfig, LogFormat};

/// Radium checkpoint inspection tool.
#[derive(Parser, Debug)]
#[command(name = "radium-cli")]
#[command(version, about = "Inspect Radium hardened checkpoints and sync boundaries")]
struct Cli {
    /// Use the testnet checkpoint table instead of mainnet.
    #[arg(long, global = true)]
    testnet: bool,

    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every checkpoint of the selected network.
    List,
    /// Print the total-blocks estimate (highest checkpoint height).
    Estimate,
    /// Check a block hash against the hardened checkpoint at its height.
    Check {
        /// Block height.
        height: u64,
        /// Block hash (64 hex characters, optional 0x prefix).
        hash: String,
    },
    /// Show the sync-checkpoint boundary for a contiguous chain.
    SyncBoundary {
        /// Height of the current chain tip.
        tip_height: u64,
        /// Also report whether a reorg to this height is allowed.
        #[arg(long)]
        height: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    config.apply_overrides(cli.testnet, cli.log_level, cli.log_format);

    init_logging(&config.log_level, config.log_format);
    debug!(network = %config.network, "configuration loaded");

    let registry = CheckpointRegistry::new().context("compiled-in checkpoint table is invalid")?;

    let stdout = io::stdout();
    run(cli.command, &registry, config.network, &mut stdout.lock())
}

/// Execute one subcommand, writing its report to `out`.
fn run(
    command: Commands,
    registry: &CheckpointRegistry,
    network: NetworkType,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::List => {
            let table = registry.table_for(network);
            writeln!(out, "network: {network} ({} checkpoints)", table.len())?;
            for cp in table.iter() {
                writeln!(out, "{:>10}  {}", cp.height, cp.hash.to_hex())?;
            }
        }
        Commands::Estimate => {
            writeln!(out, "{}", registry.total_blocks_estimate(network))?;
        }
        Commands::Check { height, hash } => {
            let hash = Hash256::from_hex(&hash)
                .with_context(|| format!("invalid block hash: {hash}"))?;
            registry
                .verify_hardened(network, height, &hash)
                .context("hardened checkpoint check failed")?;
            match registry.table_for(network).get(height) {
                Some(_) => writeln!(out, "ok: matches checkpoint at height {height}")?,
                None => writeln!(out, "ok: no checkpoint at height {height}")?,
            }
        }
        Commands::SyncBoundary { tip_height, height } => {
            let boundary = sync_boundary_height(tip_height);
            writeln!(
                out,
                "sync checkpoint: height {boundary} (tip {tip_height}, span {CHECKPOINT_SPAN})"
            )?;
            if let Some(height) = height {
                if height > boundary {
                    writeln!(out, "height {height}: reorg allowed")?;
                } else {
                    bail!("height {height} is at or below the sync checkpoint {boundary}");
                }
            }
        }
    }
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_logging(level_str: &str, format: LogFormat) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_str));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true).with_writer(io::stderr))
            .init(),
    }
}
