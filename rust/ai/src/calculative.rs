//! Weighted move scoring with a light model of the opponents.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use sevens_engine::cards::{Card, Rank, Suit};
use sevens_engine::player::PlayerId;
use sevens_engine::rules::legal_moves;
use sevens_engine::strategy::Strategy;
use sevens_engine::table::Table;
use tracing::trace;

use crate::heuristics::{creates_blocking_gap, pick_near_best, suit_count, unlocked_by};
use crate::opponents::OpponentModel;

/// Scores every legal card and plays one of the strongest.
///
/// # Scoring
///
/// For a legal `card` in `hand`:
///
/// - Ten through King: `30 + (rank - 9)`; Ace: `30`
/// - `+20` for each of its own cards the play makes legal
/// - `+15` when the suit is nearly exhausted (two or fewer in hand), `+10`
///   when it is long (seven or more)
/// - `+25` when an opponent has been playing the suit and the card leaves a
///   hole that blocks the run toward the Seven
/// - `+5` for a Seven
/// - `-0.5` per step away from Seven
///
/// Among the moves scoring at least 80% of the best one, the choice is random.
///
/// # State
///
/// The opponent model (cards seen, pass streaks, suit strengths and inferred
/// weaknesses) is round-scoped: `initialize` clears it. Only the random
/// generator survives between rounds.
#[derive(Debug, Clone)]
pub struct Calculative {
    model: OpponentModel,
    rng: StdRng,
}

impl Calculative {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            model: OpponentModel::default(),
            rng,
        }
    }

    /// Suits `player` is believed to be short of after passing repeatedly.
    pub fn suspected_weaknesses(&self, player: PlayerId) -> Option<&BTreeSet<Suit>> {
        self.model.weaknesses(player)
    }

    /// Number of opponent plays observed this round.
    pub fn cards_seen(&self) -> usize {
        self.model.opponent_cards_seen()
    }

    /// Score of one legal card; higher is better.
    pub fn score(&self, card: Card, hand: &[Card], table: &Table) -> f64 {
        let mut score = match card.rank.value() {
            v if v >= 10 => 30.0 + f64::from(v - 9),
            1 => 30.0,
            _ => 0.0,
        };

        score += 20.0 * unlocked_by(card, hand, table) as f64;

        let in_suit = suit_count(hand, card.suit);
        if in_suit <= 2 {
            score += 15.0;
        } else if in_suit >= 7 {
            score += 10.0;
        }

        if self.model.opponent_plays(card.suit) && creates_blocking_gap(card, table) {
            score += 25.0;
        }

        if card.rank == Rank::Seven {
            score += 5.0;
        }

        score - 0.5 * f64::from(card.rank.distance_from_seven())
    }

    pub(crate) fn choose(
        &mut self,
        hand: &[Card],
        table: &Table,
        score: impl Fn(&Self, Card) -> f64,
    ) -> Option<usize> {
        let this: &Self = self;
        let scored: Vec<(f64, usize)> = legal_moves(hand, table)
            .into_iter()
            .map(|i| (score(this, hand[i]), i))
            .collect();
        trace!(?scored, "scored legal moves");
        pick_near_best(scored, &mut self.rng)
    }
}

impl Default for Calculative {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Calculative {
    fn initialize(&mut self, me: PlayerId) {
        self.model.reset(me);
    }

    fn select_card_to_play(&mut self, hand: &[Card], table: &Table) -> Option<usize> {
        self.choose(hand, table, |ai, card| ai.score(card, hand, table))
    }

    fn observe_move(&mut self, player: PlayerId, card: Card) {
        self.model.record_move(player, card);
    }

    fn observe_pass(&mut self, player: PlayerId) {
        self.model.record_pass(player);
    }

    fn name(&self) -> &str {
        "Calculative"
    }
}
