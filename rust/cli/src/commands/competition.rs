use std::io::Write;

use crate::commands::seating::{PlayerSource, Seating};
use crate::commands::{RunOptions, play_displayed_round};
use crate::config;
use crate::error::CliError;

/// One narrated round, one seat per player argument.
pub fn handle_competition_command(
    players: &[String],
    opts: &RunOptions,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    config::validate_players(players.len())?;
    let sources: Vec<PlayerSource> = players.iter().map(|p| PlayerSource::parse(p)).collect();
    writeln!(out, "Competition mode: {} players", sources.len())?;
    let mut engine = opts.engine();
    Seating::new().seat_all(&mut engine, &sources, out)?;
    play_displayed_round(&mut engine, opts, out)
}
