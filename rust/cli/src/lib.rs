//! # Sevens CLI Library
//!
//! Command-line front end for the Sevens engine: seats strategies (loaded
//! from shared libraries or linked in from `sevens-ai`), plays narrated
//! rounds and runs tournaments.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments and executes the mode.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["sevens", "competition", "builtin:prudent", "builtin:sentinel"];
//! let code = sevens_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Modes
//!
//! - `internal`: every seat plays the same strategy
//! - `demo`: RandomAggressive and Calculative alternate
//! - `competition`: one round between the given players
//! - `tournament`: rounds until someone reaches the threshold
//! - `strategies`: list built-in strategies
//! - `cfg`: display the resolved configuration

use clap::Parser;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod logging;
pub mod ui;

use cli::{Commands, SevensCli};
use commands::{
    RunOptions, handle_cfg_command, handle_competition_command, handle_demo_command,
    handle_internal_command, handle_strategies_command, handle_tournament_command,
};
pub use error::CliError;

const COMMANDS: &[&str] = &[
    "internal",
    "demo",
    "competition",
    "tournament",
    "strategies",
    "cfg",
];

/// Main entry point for the CLI application.
///
/// # Returns
///
/// [`exit_code::SUCCESS`] on success, and also for an unknown mode, which is
/// reported as `Unknown mode: <mode>` on `err` without playing anything.
/// [`exit_code::ERROR`] for usage, configuration, load and engine errors.
///
/// # Example
///
/// ```
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = sevens_cli::run(["sevens", "checkers"], &mut out, &mut err);
/// assert_eq!(code, 0);
/// assert_eq!(String::from_utf8(err).unwrap(), "Unknown mode: checkers\n");
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match SevensCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(&e, out, err),
    };
    debug!(mode = cli.cmd.name(), "dispatching");
    let SevensCli { seed, record, cmd } = cli;

    let result = match cmd {
        Commands::Strategies => handle_strategies_command(out),
        Commands::Cfg => handle_cfg_command(out),
        Commands::Internal {
            players,
            plugin,
            strategy,
        } => resolve_options(seed, record, players, None)
            .and_then(|opts| handle_internal_command(plugin, strategy, &opts, out, err)),
        Commands::Demo { players, builtin } => resolve_options(seed, record, players, None)
            .and_then(|opts| handle_demo_command(builtin, &opts, out)),
        Commands::Competition { players } => resolve_options(seed, record, None, None)
            .and_then(|opts| handle_competition_command(&players, &opts, out)),
        Commands::Tournament { players, threshold } => {
            resolve_options(seed, record, None, threshold)
                .and_then(|opts| handle_tournament_command(&players, &opts, out))
        }
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: &clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    match e.kind() {
        // Help and version should print to stdout and exit 0
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        ErrorKind::InvalidSubcommand => {
            let mode = match e.get(ContextKind::InvalidSubcommand) {
                Some(ContextValue::String(mode)) => mode.as_str(),
                _ => "?",
            };
            if writeln!(err, "Unknown mode: {}", mode).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            if writeln!(err, "{}", e).is_err() || write_usage(err).is_err() {
                return exit_code::ERROR;
            }
            exit_code::ERROR
        }
    }
}

fn write_usage(err: &mut dyn Write) -> std::io::Result<()> {
    writeln!(err)?;
    writeln!(err, "Sevens card game CLI")?;
    writeln!(err, "Usage: sevens <mode> [options]\n")?;
    writeln!(err, "Modes:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: sevens --help")
}

/// Layers command-line flags over the file and environment configuration.
/// Range checks are left to the modes, which know which values they use.
fn resolve_options(
    seed: Option<u64>,
    record: Option<PathBuf>,
    players: Option<usize>,
    threshold: Option<usize>,
) -> Result<RunOptions, CliError> {
    let mut config = config::load_with_sources()?.config;
    if seed.is_some() {
        config.seed = seed;
    }
    if let Some(n) = players {
        config.players = n;
    }
    if let Some(t) = threshold {
        config.threshold = t;
    }
    Ok(RunOptions { config, record })
}
