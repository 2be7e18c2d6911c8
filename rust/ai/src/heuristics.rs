//! Scoring building blocks shared by the weighted strategies.

use rand::Rng;
use sevens_engine::cards::{Card, Rank, Suit};
use sevens_engine::rules::is_legal;
use sevens_engine::table::Table;

pub(crate) fn suit_count(hand: &[Card], suit: Suit) -> usize {
    hand.iter().filter(|c| c.suit == suit).count()
}

/// Cards in `hand` that are not legal now but would be once `card` is played.
pub(crate) fn unlocked_by(card: Card, hand: &[Card], table: &Table) -> usize {
    let after = table.with_card(card);
    hand.iter()
        .filter(|&&other| other != card)
        .filter(|&&other| !is_legal(other, table) && is_legal(other, &after))
        .count()
}

/// True when playing `card` leaves a one-card hole toward the Seven,
/// e.g. a Four played while the Six is down and the Five is not.
pub(crate) fn creates_blocking_gap(card: Card, table: &Table) -> bool {
    let suit = card.suit;
    let value = card.rank.value();
    let played = |v: u8| Rank::from_value(v).is_some_and(|r| table.is_played(suit, r));
    if value <= 5 {
        !played(value + 1) && played(value + 2)
    } else if value >= 9 {
        !played(value - 1) && played(value - 2)
    } else {
        false
    }
}

/// How many more cards of the suit this player could chain after `card`,
/// counting `card` itself.
pub(crate) fn potential_run(card: Card, hand: &[Card], table: &Table) -> usize {
    let mut layout = table.with_card(card);
    let mut run = 1;
    for step in [Rank::higher, Rank::lower] {
        let mut next = step(card.rank);
        while let Some(rank) = next {
            let candidate = Card::new(card.suit, rank);
            if !hand.contains(&candidate) || !is_legal(candidate, &layout) {
                break;
            }
            layout.mark(candidate);
            run += 1;
            next = step(rank);
        }
    }
    run
}

/// Picks among `(score, index)` pairs: uniformly among the leading moves
/// scoring at least 80% of the best, otherwise the best one.
pub(crate) fn pick_near_best<R: Rng>(mut scored: Vec<(f64, usize)>, rng: &mut R) -> Option<usize> {
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    let (top, best) = *scored.first()?;

    let close: Vec<usize> = scored
        .iter()
        .take_while(|(score, _)| *score >= top * 0.8)
        .map(|&(_, index)| index)
        .collect();
    if close.len() > 1 {
        return Some(close[rng.random_range(0..close.len())]);
    }
    Some(best)
}
