//! Card universe and opening layout providers, plus the per-round deck.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card, Rank, Suit};
use crate::table::Table;

/// Supplies the card universe dealt each round.
pub trait CardSource {
    fn cards(&self) -> Vec<Card>;
}

/// Supplies the card that sits on the table before the first turn.
pub trait LayoutSource {
    fn opening_card(&self) -> Card;

    /// Table before the first turn. A round refuses to start unless it holds
    /// exactly [`opening_card`](Self::opening_card).
    fn initial_table(&self) -> Table {
        let mut table = Table::new();
        table.mark(self.opening_card());
        table
    }
}

/// The standard 52-card universe in suit-major order.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDeck;

impl CardSource for StandardDeck {
    fn cards(&self) -> Vec<Card> {
        full_deck()
    }
}

/// Layout with a single opening card, the Seven of Diamonds by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningLayout {
    pub card: Card,
}

pub const OPENING_CARD: Card = Card::new(Suit::Diamonds, Rank::Seven);

impl Default for OpeningLayout {
    fn default() -> Self {
        Self { card: OPENING_CARD }
    }
}

impl LayoutSource for OpeningLayout {
    fn opening_card(&self) -> Card {
        self.card
    }
}

/// A shuffled copy of the universe, consumed by a single deal.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn shuffled(source: &dyn CardSource, rng: &mut ChaCha20Rng) -> Self {
        let mut cards = source.cards();
        cards.shuffle(rng);
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Deals every card round-robin, the first card going to `first`.
    pub fn deal(self, players: usize, first: usize) -> Vec<Vec<Card>> {
        let mut hands = vec![Vec::with_capacity(self.cards.len() / players + 1); players];
        for (i, card) in self.cards.into_iter().enumerate() {
            hands[(first + i) % players].push(card);
        }
        hands
    }
}
