//! Command handlers for the `sevens` CLI.
//!
//! Each mode lives in its own file with a `handle_<mode>_command` function
//! that writes game output to `out`, warnings to `err`, and returns
//! `Result<(), CliError>`. Shared pieces:
//!
//! - [`seating`]: player arguments to registered strategies
//! - [`display`]: observers that narrate rounds and tournaments
//! - [`record`]: `--record` support

use std::io::Write;
use std::path::PathBuf;

use sevens_engine::engine::Engine;
use tracing::info;

use crate::config::Config;
use crate::error::CliError;

pub mod cfg;
pub mod competition;
pub mod demo;
pub mod display;
pub mod internal;
pub mod record;
pub mod seating;
pub mod strategies;
pub mod tournament;

pub use cfg::handle_cfg_command;
pub use competition::handle_competition_command;
pub use demo::handle_demo_command;
pub use internal::handle_internal_command;
pub use strategies::handle_strategies_command;
pub use tournament::handle_tournament_command;

use display::RoundDisplay;
use record::{RoundRecorder, Tee};

/// Settings every game mode shares, already merged from config and flags.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: Config,
    pub record: Option<PathBuf>,
}

impl RunOptions {
    pub fn engine(&self) -> Engine {
        Engine::new(self.config.seed)
    }
}

/// Plays one narrated round, then lists each strategy with the cards it
/// was left holding.
pub(crate) fn play_displayed_round(
    engine: &mut Engine,
    opts: &RunOptions,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let names = engine.strategy_names();
    let mut recorder = match &opts.record {
        Some(path) => Some(RoundRecorder::open(path, engine.seed(), names.clone())?),
        None => None,
    };

    writeln!(out)?;
    let mut display = RoundDisplay::new(out);
    let result = match recorder.as_mut() {
        Some(recorder) => engine.play_round_with(&mut Tee(&mut display, recorder)),
        None => engine.play_round_with(&mut display),
    };
    display.finish()?;
    let result = result?;
    if let Some(recorder) = recorder {
        let written = recorder.finish()?;
        info!(written, "round recorded");
    }

    writeln!(out, "\n--- Results ---")?;
    for (name, remaining) in result.named(&names) {
        writeln!(out, "{} → {} cards left", name, remaining)?;
    }
    Ok(())
}
