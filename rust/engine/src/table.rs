use serde::{Deserialize, Serialize};

use crate::cards::{all_ranks, all_suits, Card, Rank, Suit};

/// Shared record of which cards have been played.
///
/// One bit per rank for each suit; an unset bit means "not played". Marks are
/// only ever added, so a `Table` never loses a card once it is on it. The
/// engine owns the authoritative table and hands strategies a `&Table` at
/// decision time; since the type is `Copy`, strategies that want to look ahead
/// work on their own copy.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Table {
    played: [u16; 4],
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    fn bit(rank: Rank) -> u16 {
        1 << rank.value()
    }

    pub fn is_played(&self, suit: Suit, rank: Rank) -> bool {
        self.played[suit.index()] & Self::bit(rank) != 0
    }

    pub fn contains(&self, card: Card) -> bool {
        self.is_played(card.suit, card.rank)
    }

    /// Marks a card as played. Marking an already played card is a no-op.
    pub fn mark_played(&mut self, suit: Suit, rank: Rank) {
        self.played[suit.index()] |= Self::bit(rank);
    }

    pub fn mark(&mut self, card: Card) {
        self.mark_played(card.suit, card.rank);
    }

    /// A copy of this table with `card` also marked.
    pub fn with_card(&self, card: Card) -> Table {
        let mut next = *self;
        next.mark(card);
        next
    }

    pub fn played_count(&self) -> usize {
        self.played.iter().map(|m| m.count_ones() as usize).sum()
    }

    pub fn played_in_suit(&self, suit: Suit) -> usize {
        self.played[suit.index()].count_ones() as usize
    }

    /// True when every mark in `self` is also present in `other`.
    pub fn is_subset_of(&self, other: &Table) -> bool {
        self.played
            .iter()
            .zip(other.played.iter())
            .all(|(a, b)| a & !b == 0)
    }

    /// Played cards in suit-major, rank-ascending order.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        all_suits().into_iter().flat_map(move |suit| {
            all_ranks()
                .into_iter()
                .filter(move |&rank| self.is_played(suit, rank))
                .map(move |rank| Card::new(suit, rank))
        })
    }
}
