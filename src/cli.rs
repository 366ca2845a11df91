use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::prelude::*;

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"), version = env!("CARGO_PKG_VERSION"), about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Also write debug logs to a file under /tmp/scoutbench_logs
    #[arg(long, global = true)]
    pub log_file: bool,

    /// Raise console verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Solve every position of the principal variation, end of game first
    Pv {
        /// 1 = negamax, 2 = alpha-beta, 3 = scout, 4 = negascout
        algorithm: Option<Algorithm>,
        /// Engage the transposition table (alpha-beta and negascout only)
        #[arg(long)]
        tt: bool,
        /// Search depth
        #[arg(short, long)]
        depth: Option<u16>,
        /// Only solve the first N positions
        #[arg(short = 'n', long)]
        positions: Option<usize>,
        /// Load settings from a TOML file, flags override it
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the effective settings to a TOML file
        #[arg(long)]
        save_config: Option<PathBuf>,
    },

    /// Check every algorithm against negamax on the first PV positions
    Verify {
        /// Search depth
        #[arg(short, long, default_value_t = 6)]
        depth: u16,
        /// Number of PV positions to check
        #[arg(short = 'n', long, default_value_t = 12)]
        positions: usize,
        /// Engage the transposition table
        #[arg(long)]
        tt: bool,
    },

    /// Print a PV position (0 is the final one)
    Show {
        #[arg(short = 'n', long, default_value_t = 0)]
        position: usize,
    },
}

/// Effective benchmark settings: file first, then flags
pub fn resolve_config(
    algorithm: Option<Algorithm>,
    tt: bool,
    depth: Option<u16>,
    config: Option<&PathBuf>,
) -> miette::Result<SearchConfig> {
    let mut resolved = match config {
        Some(path) => SearchConfig::load_from_file(path)
            .with_context(|| format!("Loading config from {}", path.display()))?,
        None => SearchConfig::default(),
    };

    if let Some(algorithm) = algorithm {
        resolved.algorithm = algorithm;
    }
    if let Some(depth) = depth {
        resolved.depth = depth;
    }
    resolved.use_tt |= tt;

    if resolved.use_tt && !resolved.algorithm.uses_tt() {
        warn!(
            "{} does not use the transposition table, ignoring it",
            resolved.algorithm
        );
        resolved.use_tt = false;
    }
    Ok(resolved)
}

/// Console level for the `-v` count, `RUST_LOG` decides when it is zero
pub fn verbosity(count: u8) -> Level {
    match count {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
