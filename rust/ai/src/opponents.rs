use std::collections::{BTreeSet, HashMap};

use sevens_engine::cards::{Card, Suit, all_suits};
use sevens_engine::player::PlayerId;

/// Passes in a row after which an opponent's unplayed suits count as weak.
const WEAKNESS_PASSES: u32 = 2;

/// What a strategy has learned about the other players during a round.
#[derive(Debug, Clone, Default)]
pub(crate) struct OpponentModel {
    me: Option<PlayerId>,
    played: Vec<Card>,
    passes: HashMap<PlayerId, u32>,
    strengths: HashMap<PlayerId, BTreeSet<Suit>>,
    weaknesses: HashMap<PlayerId, BTreeSet<Suit>>,
}

impl OpponentModel {
    pub fn reset(&mut self, me: PlayerId) {
        *self = Self {
            me: Some(me),
            ..Self::default()
        };
    }

    pub fn is_me(&self, player: PlayerId) -> bool {
        self.me == Some(player)
    }

    /// Records an opponent's play. Own plays are ignored.
    pub fn record_move(&mut self, player: PlayerId, card: Card) -> bool {
        if self.is_me(player) {
            return false;
        }
        self.played.push(card);
        self.strengths.entry(player).or_default().insert(card.suit);
        self.passes.insert(player, 0);
        true
    }

    pub fn record_pass(&mut self, player: PlayerId) {
        if self.is_me(player) {
            return;
        }
        let count = self.passes.entry(player).or_insert(0);
        *count += 1;
        if *count >= WEAKNESS_PASSES {
            self.infer_weaknesses(player);
        }
    }

    fn infer_weaknesses(&mut self, player: PlayerId) {
        let strengths = self.strengths.get(&player);
        let weak = self.weaknesses.entry(player).or_default();
        for suit in all_suits() {
            if !strengths.is_some_and(|s| s.contains(&suit)) {
                weak.insert(suit);
            }
        }
    }

    /// True when some opponent has played a card of `suit` this round.
    pub fn opponent_plays(&self, suit: Suit) -> bool {
        self.strengths
            .iter()
            .any(|(player, suits)| !self.is_me(*player) && suits.contains(&suit))
    }

    pub fn weaknesses(&self, player: PlayerId) -> Option<&BTreeSet<Suit>> {
        self.weaknesses.get(&player)
    }

    pub fn opponent_cards_seen(&self) -> usize {
        self.played.len()
    }
}
