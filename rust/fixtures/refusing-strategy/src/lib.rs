//! Strategy module whose constructor always fails, so its factory returns
//! null. Used by the engine's module loading tests.

use sevens_engine::cards::Card;
use sevens_engine::player::PlayerId;
use sevens_engine::strategy::Strategy;
use sevens_engine::table::Table;

pub struct Refusing;

impl Refusing {
    pub fn new() -> Self {
        panic!("Refusing never builds a strategy");
    }
}

impl Strategy for Refusing {
    fn initialize(&mut self, _me: PlayerId) {}

    fn select_card_to_play(&mut self, _hand: &[Card], _table: &Table) -> Option<usize> {
        None
    }

    fn observe_move(&mut self, _player: PlayerId, _card: Card) {}

    fn observe_pass(&mut self, _player: PlayerId) {}

    fn name(&self) -> &str {
        "Refusing"
    }
}

sevens_engine::declare_strategy!(Refusing::new);
