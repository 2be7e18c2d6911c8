//! Calculative scoring tuned for the shape of the round.

use std::collections::{BTreeMap, BTreeSet};

use sevens_engine::cards::{Card, Rank};
use sevens_engine::player::PlayerId;
use sevens_engine::rules::legal_moves;
use sevens_engine::strategy::Strategy;
use sevens_engine::table::Table;

use crate::calculative::Calculative;
use crate::heuristics::potential_run;

/// Hand size assumed for opponents before any roster is known.
const DEFAULT_HAND_ESTIMATE: usize = 13;
/// Opponents estimated at this many cards or fewer are about to go out.
const CLOSE_TO_WINNING: usize = 3;
const SMALL_HAND: usize = 5;

/// Builds on [`Calculative`] and adds timing around the cards that open up
/// the table.
///
/// On top of the calculative score, for a legal `card`:
///
/// - Sixes, Sevens and Eights are held back (`-50`) while less than half the
///   deck is down and another legal card exists; between half and three
///   quarters they are held back (`-40`) only while an opponent is close to
///   going out; later, with five cards or fewer in hand, they get `+20`
/// - `+15` for any card once the hand is down to five
/// - `+8` per card in the run the play starts, when that run has at least two
///
/// # State
///
/// Estimated opponent hand sizes are round-scoped. The roster of opponents
/// seen is tournament-scoped: it survives `initialize`, and each new round
/// starts every known opponent at `51 / players` cards.
#[derive(Debug, Clone)]
pub struct Sentinel {
    base: Calculative,
    me: Option<PlayerId>,
    roster: BTreeSet<PlayerId>,
    estimates: BTreeMap<PlayerId, usize>,
    opening_estimate: usize,
}

impl Sentinel {
    pub fn new() -> Self {
        Self::from_base(Calculative::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_base(Calculative::with_seed(seed))
    }

    fn from_base(base: Calculative) -> Self {
        Self {
            base,
            me: None,
            roster: BTreeSet::new(),
            estimates: BTreeMap::new(),
            opening_estimate: DEFAULT_HAND_ESTIMATE,
        }
    }

    pub fn estimated_hand_size(&self, player: PlayerId) -> Option<usize> {
        self.estimates.get(&player).copied()
    }

    pub fn known_opponents(&self) -> usize {
        self.roster.len()
    }

    fn opponent_close_to_winning(&self) -> bool {
        self.estimates.values().any(|&n| n <= CLOSE_TO_WINNING)
    }

    pub fn score(&self, card: Card, hand: &[Card], table: &Table) -> f64 {
        score_with(&self.base, self.opponent_close_to_winning(), card, hand, table)
    }
}

fn score_with(base: &Calculative, close: bool, card: Card, hand: &[Card], table: &Table) -> f64 {
    let mut score = base.score(card, hand, table);
    let progress = progress(table);

    if matches!(card.rank, Rank::Six | Rank::Seven | Rank::Eight) {
        let alternatives = legal_moves(hand, table).len() > 1;
        if progress < 50 && alternatives {
            score -= 50.0;
        } else if progress < 75 && alternatives && close {
            score -= 40.0;
        } else if progress >= 75 && hand.len() <= SMALL_HAND {
            score += 20.0;
        }
    }

    if hand.len() <= SMALL_HAND {
        score += 15.0;
    }

    let run = potential_run(card, hand, table);
    if run >= 2 {
        score += 8.0 * run as f64;
    }
    score
}

/// Share of the deck already on the table, 0 to 100.
fn progress(table: &Table) -> usize {
    (table.played_count() * 100 / 52).min(100)
}

impl Default for Sentinel {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Sentinel {
    fn initialize(&mut self, me: PlayerId) {
        self.base.initialize(me);
        self.me = Some(me);
        self.roster.remove(&me);
        self.opening_estimate = if self.roster.is_empty() {
            DEFAULT_HAND_ESTIMATE
        } else {
            51 / (self.roster.len() + 1)
        };
        self.estimates = self
            .roster
            .iter()
            .map(|&p| (p, self.opening_estimate))
            .collect();
    }

    fn select_card_to_play(&mut self, hand: &[Card], table: &Table) -> Option<usize> {
        let close = self.opponent_close_to_winning();
        self.base
            .choose(hand, table, |base, card| score_with(base, close, card, hand, table))
    }

    fn observe_move(&mut self, player: PlayerId, card: Card) {
        self.base.observe_move(player, card);
        if self.me == Some(player) {
            return;
        }
        self.roster.insert(player);
        let left = self.estimates.entry(player).or_insert(self.opening_estimate);
        *left = left.saturating_sub(1);
    }

    fn observe_pass(&mut self, player: PlayerId) {
        self.base.observe_pass(player);
    }

    fn name(&self) -> &str {
        "Sentinel7"
    }
}
