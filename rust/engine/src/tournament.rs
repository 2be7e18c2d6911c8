//! Repeated rounds with cumulative scoring until a score threshold is reached.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{Engine, RoundResult};
use crate::errors::EngineError;
use crate::player::PlayerId;

/// Default cumulative score that ends a tournament.
pub const DEFAULT_THRESHOLD: usize = 50;

/// Anything that can play rounds for a fixed set of players.
pub trait RoundRunner {
    fn player_count(&self) -> usize;
    fn play_round(&mut self) -> Result<RoundResult, EngineError>;
}

impl RoundRunner for Engine {
    fn player_count(&self) -> usize {
        Engine::player_count(self)
    }

    fn play_round(&mut self) -> Result<RoundResult, EngineError> {
        Engine::play_round(self)
    }
}

/// Final line of the tournament table for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    /// Cumulative remaining cards over all rounds, lower is better
    pub score: usize,
    /// Rounds in which the player had the lowest score, ties included
    pub wins: usize,
    /// Competition rank: equal score and wins share a rank, the next rank skips
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentResult {
    pub rounds: usize,
    /// One entry per player, in seat order
    pub standings: Vec<Standing>,
}

impl TournamentResult {
    pub fn standing(&self, player: PlayerId) -> Option<&Standing> {
        self.standings.iter().find(|s| s.player == player)
    }

    /// Percentage of rounds won by `player`.
    pub fn win_rate(&self, player: PlayerId) -> f64 {
        match self.standing(player) {
            Some(s) if self.rounds > 0 => 100.0 * s.wins as f64 / self.rounds as f64,
            _ => 0.0,
        }
    }

    /// Standings ordered best first.
    pub fn by_rank(&self) -> Vec<Standing> {
        let mut ordered = self.standings.clone();
        ordered.sort_by_key(|s| (s.rank, s.player));
        ordered
    }
}

/// Receives round-by-round progress of a tournament.
pub trait TournamentObserver {
    fn on_round_start(&mut self, _round: usize, _totals: &[usize]) {}
    fn on_round_end(&mut self, _round: usize, _result: &RoundResult, _totals: &[usize]) {}
}

impl TournamentObserver for crate::engine::Quiet {}

/// Cumulative score and round wins per player.
#[derive(Debug, Clone, Default)]
struct TournamentState {
    totals: Vec<usize>,
    wins: Vec<usize>,
    rounds: usize,
}

impl TournamentState {
    fn new(players: usize) -> Self {
        Self {
            totals: vec![0; players],
            wins: vec![0; players],
            rounds: 0,
        }
    }

    fn record(&mut self, result: &RoundResult) {
        self.rounds += 1;
        let best = result.ranking.iter().map(|s| s.remaining).min();
        for score in &result.ranking {
            let seat = score.player.index();
            self.totals[seat] += score.remaining;
            if Some(score.remaining) == best {
                self.wins[seat] += 1;
            }
        }
    }

    fn reached(&self, threshold: usize) -> bool {
        self.totals.iter().any(|&t| t >= threshold)
    }

    fn standings(&self) -> Vec<Standing> {
        let mut order: Vec<usize> = (0..self.totals.len()).collect();
        order.sort_by(|&a, &b| {
            self.totals[a]
                .cmp(&self.totals[b])
                .then(self.wins[b].cmp(&self.wins[a]))
        });

        let mut standings: Vec<Standing> = Vec::with_capacity(order.len());
        for (i, &seat) in order.iter().enumerate() {
            let rank = match standings.last() {
                Some(prev) if prev.score == self.totals[seat] && prev.wins == self.wins[seat] => {
                    prev.rank
                }
                _ => i + 1,
            };
            standings.push(Standing {
                player: PlayerId(seat),
                score: self.totals[seat],
                wins: self.wins[seat],
                rank,
            });
        }
        standings.sort_by_key(|s| s.player);
        standings
    }
}

/// Drives a [`RoundRunner`] until some player's cumulative score reaches the
/// threshold. Strategy instances are shared by every round, so whatever they
/// learn carries over between rounds.
pub struct Tournament<R: RoundRunner> {
    runner: R,
    threshold: usize,
}

impl<R: RoundRunner> Tournament<R> {
    pub fn new(runner: R, threshold: usize) -> Result<Self, EngineError> {
        if threshold == 0 {
            return Err(EngineError::InvalidThreshold);
        }
        Ok(Self { runner, threshold })
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn into_runner(self) -> R {
        self.runner
    }

    pub fn run(&mut self) -> Result<TournamentResult, EngineError> {
        self.run_with(&mut crate::engine::Quiet)
    }

    pub fn run_with(
        &mut self,
        observer: &mut dyn TournamentObserver,
    ) -> Result<TournamentResult, EngineError> {
        let mut state = TournamentState::new(self.runner.player_count());
        info!(
            players = state.totals.len(),
            threshold = self.threshold,
            "tournament started"
        );

        while !state.reached(self.threshold) {
            let round = state.rounds + 1;
            observer.on_round_start(round, &state.totals);
            let result = self.runner.play_round()?;
            if result.ranking.iter().all(|s| s.remaining == 0) {
                return Err(EngineError::ScorelessRound { round });
            }
            state.record(&result);
            observer.on_round_end(round, &result, &state.totals);
        }

        info!(rounds = state.rounds, "tournament finished");
        Ok(TournamentResult {
            rounds: state.rounds,
            standings: state.standings(),
        })
    }
}
