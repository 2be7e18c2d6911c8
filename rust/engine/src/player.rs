use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// 0-based seat index of a player within a round or tournament.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PlayerId(pub usize);

impl PlayerId {
    pub const fn index(self) -> usize {
        self.0
    }

    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count).map(PlayerId)
    }

    /// The next seat in round-robin order.
    pub fn next(self, player_count: usize) -> PlayerId {
        PlayerId((self.0 + 1) % player_count)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Engine-side state of one player during a round.
/// Created at deal time and discarded when the round ends.
#[derive(Debug, Clone)]
pub(crate) struct PlayerState {
    pub id: PlayerId,
    hand: Vec<Card>,
    /// Set when the player passed since their last successful play
    passed: bool,
}

impl PlayerState {
    pub fn new(id: PlayerId, hand: Vec<Card>) -> Self {
        Self {
            id,
            hand,
            passed: false,
        }
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn remaining(&self) -> usize {
        self.hand.len()
    }

    pub fn has_passed(&self) -> bool {
        self.passed
    }

    pub fn holds(&self, card: Card) -> bool {
        self.hand.contains(&card)
    }

    /// Removes `card` from the hand if present.
    pub fn discard(&mut self, card: Card) -> bool {
        match self.hand.iter().position(|&c| c == card) {
            Some(i) => {
                self.hand.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn play(&mut self, index: usize) -> Card {
        self.passed = false;
        self.hand.remove(index)
    }

    pub fn pass(&mut self) {
        self.passed = true;
    }
}
