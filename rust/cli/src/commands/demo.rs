//! `demo`: RandomAggressive and Calculative seated alternately.

use std::io::Write;

use crate::commands::seating::{PlayerSource, Seating};
use crate::commands::{RunOptions, play_displayed_round};
use crate::config;
use crate::error::CliError;

/// `(module crate name, built-in name)` for even and odd seats.
const LINEUP: [(&str, &str); 2] = [
    ("sevens_random_aggressive", "random-aggressive"),
    ("sevens_calculative", "calculative"),
];

pub fn demo_sources(opts: &RunOptions, builtin: bool) -> Vec<PlayerSource> {
    (0..opts.config.players)
        .map(|seat| {
            let (module, name) = LINEUP[seat % LINEUP.len()];
            if builtin {
                PlayerSource::Builtin(name.to_string())
            } else {
                PlayerSource::shipped_module(&opts.config.plugin_dir, module)
            }
        })
        .collect()
}

pub fn handle_demo_command(
    builtin: bool,
    opts: &RunOptions,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    config::validate_players(opts.config.players)?;
    writeln!(out, "Demo mode: {} players", opts.config.players)?;
    let sources = demo_sources(opts, builtin);
    let mut engine = opts.engine();
    Seating::new().seat_all(&mut engine, &sources, out)?;
    play_displayed_round(&mut engine, opts, out)
}
