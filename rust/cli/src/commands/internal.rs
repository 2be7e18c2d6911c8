//! `internal`: every seat runs the same strategy.

use std::io::Write;
use std::path::PathBuf;

use crate::commands::seating::{PlayerSource, Seating};
use crate::commands::{RunOptions, play_displayed_round};
use crate::config;
use crate::error::CliError;
use crate::ui;

/// Module loaded for every seat when neither `--plugin` nor `--strategy` is given.
pub const DEFAULT_MODULE: &str = "sevens_random_aggressive";

pub fn handle_internal_command(
    plugin: Option<PathBuf>,
    strategy: Option<String>,
    opts: &RunOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let source = match (strategy, plugin) {
        (Some(name), plugin) => {
            if plugin.is_some() {
                ui::display_warning(err, "--plugin is ignored when --strategy is given")?;
            }
            PlayerSource::Builtin(name)
        }
        (None, Some(path)) => PlayerSource::Module(path),
        (None, None) => PlayerSource::shipped_module(&opts.config.plugin_dir, DEFAULT_MODULE),
    };

    let players = opts.config.players;
    config::validate_players(players)?;
    writeln!(out, "Internal mode: {} players", players)?;
    let sources = vec![source; players];
    let mut engine = opts.engine();
    Seating::new().seat_all(&mut engine, &sources, out)?;
    play_displayed_round(&mut engine, opts, out)
}
