//! Card, hand and table formatters for terminal display.
//!
//! Pure functions over engine values. Suits use the Unicode symbols with an
//! ASCII-letter fallback for terminals that cannot render them.
//!
//! - **Unicode mode**: ♠ ♥ ♦ ♣
//! - **ASCII mode**: s h d c
//!
//! ## Example
//!
//! ```rust
//! use sevens_engine::cards::{Card, Rank, Suit};
//! use sevens_cli::formatters::{format_card, format_hand};
//!
//! let ten = Card::new(Suit::Spades, Rank::Ten);
//! assert!(format_card(&ten) == "10♠" || format_card(&ten) == "10s");
//! assert_eq!(format_hand(&[]), "");
//! ```

use sevens_engine::cards::{Card, Rank, Suit, all_ranks, all_suits};
use sevens_engine::table::Table;

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> &'static str {
    if supports_unicode() {
        match suit {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        }
    } else {
        match suit {
            Suit::Spades => "s",
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
        }
    }
}

/// Face cards and the Ace by letter, everything else by number (`10`, not `T`).
pub fn format_rank(rank: &Rank) -> &'static str {
    match rank {
        Rank::Ace => "A",
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "10",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
    }
}

/// Format a Card as rank then suit, like "7♦" (Unicode) or "7d" (ASCII).
pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Cards separated by single spaces, in hand order.
pub fn format_hand(cards: &[Card]) -> String {
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

/// One line per suit: the suit symbol, then every rank from Ace to King
/// with `.` where the card is not on the table yet.
///
/// # Example
///
/// ```rust
/// use sevens_engine::deck::{LayoutSource, OpeningLayout};
/// # use sevens_cli::formatters::format_table;
///
/// let table = OpeningLayout::default().initial_table();
/// let grid = format_table(&table);
/// assert_eq!(grid.lines().count(), 4);
/// assert!(grid.lines().nth(2).unwrap().ends_with(". 7 . . . . . ."));
/// ```
pub fn format_table(table: &Table) -> String {
    all_suits()
        .iter()
        .map(|suit| {
            let cells: Vec<&str> = all_ranks()
                .iter()
                .map(|rank| {
                    if table.is_played(*suit, *rank) {
                        format_rank(rank)
                    } else {
                        "."
                    }
                })
                .collect();
            format!("{} {}", format_suit(suit), cells.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
