//! `tournament`: rounds until a total reaches the threshold.
//!
//! Rounds run silently apart from the running totals; the final table ranks
//! players by total score, ties broken by wins.

use std::io::Write;

use sevens_engine::tournament::Tournament;
use tracing::info;

use crate::commands::display::{TournamentDisplay, write_standings};
use crate::commands::record::{RecordingRunner, RoundRecorder};
use crate::commands::seating::{PlayerSource, Seating};
use crate::commands::RunOptions;
use crate::config;
use crate::error::CliError;

pub fn handle_tournament_command(
    players: &[String],
    opts: &RunOptions,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    config::validate_players(players.len())?;
    let threshold = opts.config.threshold;
    config::validate_threshold(threshold)?;
    let sources: Vec<PlayerSource> = players.iter().map(|p| PlayerSource::parse(p)).collect();
    writeln!(
        out,
        "Tournament mode: {} players, threshold {} points",
        sources.len(),
        threshold
    )?;

    let mut engine = opts.engine();
    let names = Seating::new().seat_all(&mut engine, &sources, out)?;
    let recorder = match &opts.record {
        Some(path) => Some(RoundRecorder::open(path, engine.seed(), names.clone())?),
        None => None,
    };

    let mut tournament = Tournament::new(RecordingRunner::new(engine, recorder), threshold)?;
    let mut display = TournamentDisplay::new(out);
    let result = tournament.run_with(&mut display);
    display.finish()?;
    let result = result?;
    let written = tournament.into_runner().finish()?;
    info!(rounds = result.rounds, written, "tournament finished");

    write_standings(out, &result, &names)?;
    Ok(())
}
