use serde::{Deserialize, Serialize};

/// Represents one of the four suits of the Sevens deck.
/// The discriminant is the suit's wire index used by plugins and records.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Spades (♠), index 0
    Spades = 0,
    /// Hearts (♥), index 1
    Hearts = 1,
    /// Diamonds (♦), index 2
    Diamonds = 2,
    /// Clubs (♣), index 3
    Clubs = 3,
}

impl Suit {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(v: usize) -> Option<Suit> {
        match v {
            0 => Some(Suit::Spades),
            1 => Some(Suit::Hearts),
            2 => Some(Suit::Diamonds),
            3 => Some(Suit::Clubs),
            _ => None,
        }
    }
}

/// Represents the rank of a card from Ace (1) through King (13).
/// Ranks are linear: Ace only touches Two and King only touches Queen.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace (1)
    Ace = 1,
    /// Rank 2
    Two,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7, the rank that opens a suit
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
}

impl Rank {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(v: u8) -> Option<Rank> {
        match v {
            1 => Some(Rank::Ace),
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            _ => None,
        }
    }

    /// The rank directly below this one, `None` for the Ace.
    pub fn lower(self) -> Option<Rank> {
        Rank::from_value(self.value() - 1)
    }

    /// The rank directly above this one, `None` for the King.
    pub fn higher(self) -> Option<Rank> {
        Rank::from_value(self.value() + 1)
    }

    /// Distance from the opening rank, used by strategies that prefer the centre.
    pub fn distance_from_seven(self) -> u8 {
        self.value().abs_diff(Rank::Seven.value())
    }
}

/// A single playing card. Two cards are equal iff suit and rank match.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Builds a card from its numeric form (`suit` 0..=3, `rank` 1..=13).
    pub fn from_indices(suit: usize, rank: u8) -> Option<Card> {
        Some(Card {
            suit: Suit::from_index(suit)?,
            rank: Rank::from_value(rank)?,
        })
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}
