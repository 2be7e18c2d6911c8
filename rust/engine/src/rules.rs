use crate::cards::{Card, Rank};
use crate::table::Table;

/// Checks whether `card` may be played onto `table`.
///
/// A Seven is legal while its suit's Seven is not yet on the table. Any other
/// card is legal when the rank directly below or directly above it, in the same
/// suit, is already played. Ace and King have a single neighbour each.
///
/// # Examples
///
/// ```
/// use sevens_engine::cards::{Card, Rank, Suit};
/// use sevens_engine::rules::is_legal;
/// use sevens_engine::table::Table;
///
/// let mut table = Table::new();
/// table.mark_played(Suit::Diamonds, Rank::Seven);
///
/// assert!(is_legal(Card::new(Suit::Diamonds, Rank::Eight), &table));
/// assert!(is_legal(Card::new(Suit::Hearts, Rank::Seven), &table));
/// assert!(!is_legal(Card::new(Suit::Hearts, Rank::Eight), &table));
/// ```
pub fn is_legal(card: Card, table: &Table) -> bool {
    if card.rank == Rank::Seven {
        return !table.is_played(card.suit, Rank::Seven);
    }
    let below = card
        .rank
        .lower()
        .is_some_and(|r| table.is_played(card.suit, r));
    let above = card
        .rank
        .higher()
        .is_some_and(|r| table.is_played(card.suit, r));
    below || above
}

/// Indices of the cards in `hand` that are legal on `table`, in hand order.
pub fn legal_moves(hand: &[Card], table: &Table) -> Vec<usize> {
    hand.iter()
        .enumerate()
        .filter(|(_, &c)| is_legal(c, table))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{full_deck, Suit};

    fn table_with(cards: &[(Suit, Rank)]) -> Table {
        let mut t = Table::new();
        for &(s, r) in cards {
            t.mark_played(s, r);
        }
        t
    }

    #[test]
    fn seven_is_legal_until_played() {
        let t = Table::new();
        assert!(is_legal(Card::new(Suit::Spades, Rank::Seven), &t));
        let t = table_with(&[(Suit::Spades, Rank::Seven)]);
        assert!(!is_legal(Card::new(Suit::Spades, Rank::Seven), &t));
    }

    #[test]
    fn adjacency_extends_runs_in_both_directions() {
        let t = table_with(&[(Suit::Hearts, Rank::Seven)]);
        assert!(is_legal(Card::new(Suit::Hearts, Rank::Six), &t));
        assert!(is_legal(Card::new(Suit::Hearts, Rank::Eight), &t));
        assert!(!is_legal(Card::new(Suit::Hearts, Rank::Five), &t));
        assert!(!is_legal(Card::new(Suit::Hearts, Rank::Nine), &t));
        assert!(!is_legal(Card::new(Suit::Clubs, Rank::Eight), &t));
    }

    #[test]
    fn boundary_ranks_check_a_single_neighbour() {
        let t = table_with(&[(Suit::Clubs, Rank::Two), (Suit::Clubs, Rank::Queen)]);
        assert!(is_legal(Card::new(Suit::Clubs, Rank::Ace), &t));
        assert!(is_legal(Card::new(Suit::Clubs, Rank::King), &t));

        // King does not wrap around to the Ace
        let t = table_with(&[(Suit::Clubs, Rank::Ace)]);
        assert!(!is_legal(Card::new(Suit::Clubs, Rank::King), &t));
        let t = table_with(&[(Suit::Clubs, Rank::King)]);
        assert!(!is_legal(Card::new(Suit::Clubs, Rank::Ace), &t));
    }

    #[test]
    fn legality_survives_additional_marks() {
        // Once a non-seven card is legal, adding marks never revokes it.
        let base = table_with(&[(Suit::Diamonds, Rank::Seven), (Suit::Spades, Rank::Seven)]);
        let legal_before: Vec<Card> = full_deck()
            .into_iter()
            .filter(|c| c.rank != Rank::Seven && is_legal(*c, &base))
            .collect();
        let mut grown = base;
        for card in full_deck().into_iter().step_by(3) {
            grown.mark(card);
            for c in &legal_before {
                assert!(is_legal(*c, &grown), "{:?} became illegal", c);
            }
        }
    }

    #[test]
    fn legal_moves_reports_hand_indices() {
        let t = table_with(&[(Suit::Diamonds, Rank::Seven)]);
        let hand = vec![
            Card::new(Suit::Spades, Rank::King),
            Card::new(Suit::Diamonds, Rank::Six),
            Card::new(Suit::Hearts, Rank::Seven),
            Card::new(Suit::Diamonds, Rank::Ten),
        ];
        assert_eq!(legal_moves(&hand, &t), vec![1, 2]);
        assert!(legal_moves(&[], &t).is_empty());
    }
}
