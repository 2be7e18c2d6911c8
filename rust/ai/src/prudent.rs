use std::collections::{HashMap, HashSet};

use sevens_engine::cards::{Card, Rank};
use sevens_engine::player::PlayerId;
use sevens_engine::rules::is_legal;
use sevens_engine::strategy::Strategy;
use sevens_engine::table::Table;

use crate::heuristics::suit_count;

/// Cautious fixed-score policy.
///
/// Opens a new suit only when holding more than two of it, keeps Aces, Twos,
/// Queens and Kings back, and otherwise favours its longest suits. Every
/// tracker here is round-scoped and cleared by `initialize`.
#[derive(Debug, Clone, Default)]
pub struct Prudent {
    me: Option<PlayerId>,
    played: HashSet<Card>,
    passes: HashMap<PlayerId, u32>,
}

impl Prudent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played_cards(&self) -> &HashSet<Card> {
        &self.played
    }

    pub fn pass_count(&self, player: PlayerId) -> u32 {
        self.passes.get(&player).copied().unwrap_or(0)
    }

    fn score(card: Card, hand: &[Card], table: &Table) -> Option<i32> {
        let in_suit = suit_count(hand, card.suit) as i32;
        if card.rank == Rank::Seven {
            if table.contains(card) {
                return None;
            }
            return Some(if in_suit > 2 { 10 } else { -10 });
        }
        if !is_legal(card, table) {
            return None;
        }

        let played = |r: Option<Rank>| r.is_some_and(|r| table.is_played(card.suit, r));
        let mut score = match card.rank {
            Rank::Ace | Rank::Two | Rank::Queen | Rank::King => -5,
            _ => 2,
        };
        if played(card.rank.lower()) && played(card.rank.higher()) {
            score += 2;
        }
        Some(score + in_suit)
    }
}

impl Strategy for Prudent {
    fn initialize(&mut self, me: PlayerId) {
        self.me = Some(me);
        self.played.clear();
        self.passes.clear();
    }

    fn select_card_to_play(&mut self, hand: &[Card], table: &Table) -> Option<usize> {
        let mut scored: Vec<(usize, i32)> = hand
            .iter()
            .enumerate()
            .filter_map(|(i, &card)| Self::score(card, hand, table).map(|s| (i, s)))
            .collect();
        // Stable, so equal scores keep hand order
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.first().map(|&(i, _)| i)
    }

    fn observe_move(&mut self, _player: PlayerId, card: Card) {
        self.played.insert(card);
    }

    fn observe_pass(&mut self, player: PlayerId) {
        *self.passes.entry(player).or_insert(0) += 1;
    }

    fn name(&self) -> &str {
        "Prudent"
    }
}
