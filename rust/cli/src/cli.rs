//! Command-line surface of the `sevens` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sevens",
    version,
    about = "Sevens card game engine with pluggable strategies"
)]
pub struct SevensCli {
    /// Seed for shuffling and choosing the dealer
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    /// Append every finished round to this file as a JSON line
    #[arg(long, global = true, value_name = "FILE")]
    pub record: Option<PathBuf>,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// One displayed round where every seat runs the same strategy
    Internal {
        #[arg(long)]
        players: Option<usize>,
        /// Strategy module to load for every seat
        #[arg(long, value_name = "PATH")]
        plugin: Option<PathBuf>,
        /// Use a built-in strategy instead of loading a module
        #[arg(long, value_name = "NAME")]
        strategy: Option<String>,
    },
    /// One displayed round alternating RandomAggressive and Calculative seats
    Demo {
        #[arg(long)]
        players: Option<usize>,
        /// Use the built-in strategies instead of loading modules
        #[arg(long)]
        builtin: bool,
    },
    /// One displayed round between the given players
    Competition {
        /// Strategy module paths or `builtin:<name>`, one per seat
        #[arg(required = true, num_args = 2.., value_name = "PLAYER")]
        players: Vec<String>,
    },
    /// Rounds until someone reaches the threshold, then final standings
    Tournament {
        /// Strategy module paths or `builtin:<name>`, one per seat
        #[arg(required = true, num_args = 2.., value_name = "PLAYER")]
        players: Vec<String>,
        #[arg(long)]
        threshold: Option<usize>,
    },
    /// List the built-in strategies
    Strategies,
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Internal { .. } => "internal",
            Commands::Demo { .. } => "demo",
            Commands::Competition { .. } => "competition",
            Commands::Tournament { .. } => "tournament",
            Commands::Strategies => "strategies",
            Commands::Cfg => "cfg",
        }
    }
}
