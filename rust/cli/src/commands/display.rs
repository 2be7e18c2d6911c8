//! Terminal narration of rounds and tournaments.
//!
//! Observers cannot return errors to the engine, so the first failed write is
//! kept and handed back by `finish`; later events are skipped.

use std::io::{self, Write};

use sevens_engine::cards::Card;
use sevens_engine::engine::{RoundObserver, RoundOutcome, RoundResult, RoundView};
use sevens_engine::player::PlayerId;
use sevens_engine::tournament::{TournamentObserver, TournamentResult};

use crate::formatters::{format_card, format_hand, format_table};

pub fn outcome_line(outcome: &RoundOutcome) -> String {
    match outcome {
        RoundOutcome::HandEmptied(player) => {
            format!("{} has emptied their hand! Game over.", player)
        }
        RoundOutcome::AllPassed => "All players have passed! Game over.".to_string(),
    }
}

/// Writer that remembers its first failure.
struct Sink<'a> {
    out: &'a mut dyn Write,
    failed: Option<io::Error>,
}

impl<'a> Sink<'a> {
    fn new(out: &'a mut dyn Write) -> Self {
        Self { out, failed: None }
    }

    fn step(&mut self, write: impl FnOnce(&mut dyn Write) -> io::Result<()>) {
        if self.failed.is_none()
            && let Err(e) = write(&mut *self.out)
        {
            self.failed = Some(e);
        }
    }

    fn finish(self) -> io::Result<()> {
        match self.failed {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Prints every deal, turn, play and pass of a single round.
pub struct RoundDisplay<'a>(Sink<'a>);

impl<'a> RoundDisplay<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self(Sink::new(out))
    }

    pub fn finish(self) -> io::Result<()> {
        self.0.finish()
    }
}

fn write_table(out: &mut dyn Write, view: &RoundView<'_>) -> io::Result<()> {
    writeln!(out, "\n----- TABLE -----")?;
    writeln!(out, "{}", format_table(view.table()))?;
    writeln!(out, "-----------------")
}

impl RoundObserver for RoundDisplay<'_> {
    fn on_deal(&mut self, opening: Card, view: &RoundView<'_>) {
        self.0.step(|out| {
            writeln!(
                out,
                "{} is on the table at the start of the game.",
                format_card(&opening)
            )?;
            writeln!(out, "\n--- Players' Hands ---")?;
            for (player, hand) in view.hands() {
                writeln!(out, "{} : {}", player, format_hand(hand))?;
            }
            writeln!(out, "----------------------")?;
            write_table(out, view)
        });
    }

    fn on_turn(&mut self, player: PlayerId, _view: &RoundView<'_>) {
        self.0.step(|out| writeln!(out, "\n{}'s turn", player));
    }

    fn on_play(&mut self, player: PlayerId, card: Card, view: &RoundView<'_>) {
        self.0.step(|out| {
            writeln!(out, "{} plays {}", player, format_card(&card))?;
            write_table(out, view)
        });
    }

    fn on_pass(&mut self, player: PlayerId) {
        self.0.step(|out| writeln!(out, "{} passes", player));
    }

    fn on_finish(&mut self, result: &RoundResult) {
        self.0.step(|out| {
            writeln!(out, "\n{}", outcome_line(&result.outcome))?;
            writeln!(out, "\n--- Final Scores ---")?;
            for score in &result.ranking {
                writeln!(out, "{} : {} cards remaining", score.player, score.remaining)?;
            }
            Ok(())
        });
    }
}

/// Prints running totals around every tournament round.
pub struct TournamentDisplay<'a>(Sink<'a>);

impl<'a> TournamentDisplay<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self(Sink::new(out))
    }

    pub fn finish(self) -> io::Result<()> {
        self.0.finish()
    }
}

impl TournamentObserver for TournamentDisplay<'_> {
    fn on_round_start(&mut self, round: usize, totals: &[usize]) {
        self.0.step(|out| {
            writeln!(out, "\n=== ROUND {} ===", round)?;
            writeln!(out, "--- Current Scores ---")?;
            for (seat, total) in totals.iter().enumerate() {
                writeln!(out, "{}: {} points", PlayerId(seat), total)?;
            }
            Ok(())
        });
    }

    fn on_round_end(&mut self, _round: usize, result: &RoundResult, totals: &[usize]) {
        self.0.step(|out| {
            writeln!(out, "{}", outcome_line(&result.outcome))?;
            writeln!(out, "--- Round Results ---")?;
            for (seat, total) in totals.iter().enumerate() {
                let player = PlayerId(seat);
                let gained = result.score_of(player).unwrap_or(0);
                writeln!(out, "{}: +{} points (Total: {})", player, gained, total)?;
            }
            Ok(())
        });
    }
}

/// Final leaderboard, best rank first.
pub fn write_standings(
    out: &mut dyn Write,
    result: &TournamentResult,
    names: &[String],
) -> io::Result<()> {
    writeln!(out, "\n=== FINAL RESULTS AFTER {} ROUNDS ===", result.rounds)?;
    for standing in result.by_rank() {
        let name = names
            .get(standing.player.index())
            .map(String::as_str)
            .unwrap_or("?");
        writeln!(
            out,
            "Rank {} | {} | Score: {} | Wins: {} | Win Rate: {:.2}% | Name: {}",
            standing.rank,
            standing.player,
            standing.score,
            standing.wins,
            result.win_rate(standing.player),
            name
        )?;
    }
    Ok(())
}
