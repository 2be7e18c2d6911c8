//! Always plays when it can, picking uniformly among legal cards.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sevens_engine::cards::Card;
use sevens_engine::player::PlayerId;
use sevens_engine::rules::legal_moves;
use sevens_engine::strategy::Strategy;
use sevens_engine::table::Table;

/// Plays a random legal card every turn it has one and passes only when forced.
///
/// Keeps no memory of the table or the other players, so nothing carries over
/// between rounds apart from the random generator.
///
/// # Example
///
/// ```rust
/// use sevens_ai::random_aggressive::RandomAggressive;
/// use sevens_engine::deck::{LayoutSource, OpeningLayout};
/// use sevens_engine::cards::{Card, Rank, Suit};
/// use sevens_engine::strategy::Strategy;
///
/// let mut ai = RandomAggressive::with_seed(7);
/// let table = OpeningLayout::default().initial_table();
/// let hand = [Card::new(Suit::Clubs, Rank::Two), Card::new(Suit::Diamonds, Rank::Eight)];
/// assert_eq!(ai.select_card_to_play(&hand, &table), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct RandomAggressive {
    me: Option<PlayerId>,
    rng: StdRng,
}

impl RandomAggressive {
    pub fn new() -> Self {
        Self {
            me: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic instance for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            me: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seat(&self) -> Option<PlayerId> {
        self.me
    }
}

impl Default for RandomAggressive {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomAggressive {
    fn initialize(&mut self, me: PlayerId) {
        self.me = Some(me);
    }

    fn select_card_to_play(&mut self, hand: &[Card], table: &Table) -> Option<usize> {
        let legal = legal_moves(hand, table);
        if legal.is_empty() {
            return None;
        }
        Some(legal[self.rng.random_range(0..legal.len())])
    }

    fn observe_move(&mut self, _player: PlayerId, _card: Card) {}

    fn observe_pass(&mut self, _player: PlayerId) {}

    fn name(&self) -> &str {
        "RandomAggressive"
    }
}
