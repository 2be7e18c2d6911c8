//! Scripted strategies shared by the engine integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use sevens_engine::cards::Card;
use sevens_engine::engine::{RoundObserver, RoundView};
use sevens_engine::player::PlayerId;
use sevens_engine::rules::legal_moves;
use sevens_engine::strategy::Strategy;
use sevens_engine::table::Table;

/// Everything a strategy was told, shared with the test through an `Rc`.
#[derive(Debug, Default)]
pub struct Log {
    pub me: Option<PlayerId>,
    pub initialized: usize,
    pub selections: usize,
    pub moves: Vec<(PlayerId, Card)>,
    pub passes: Vec<PlayerId>,
}

pub type SharedLog = Rc<RefCell<Log>>;

pub enum Behaviour {
    AlwaysPass,
    FirstLegal,
    OutOfRange,
    /// Picks a card that is not legal when one exists, otherwise passes
    Illegal,
    /// Plays the first legal card but panics whenever it observes a move
    PanicOnObserve,
    /// Panics instead of choosing
    PanicOnSelect,
}

pub struct Scripted {
    behaviour: Behaviour,
    log: SharedLog,
}

impl Scripted {
    pub fn new(behaviour: Behaviour) -> (Self, SharedLog) {
        let log = SharedLog::default();
        (
            Self {
                behaviour,
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl Strategy for Scripted {
    fn initialize(&mut self, me: PlayerId) {
        let mut log = self.log.borrow_mut();
        log.me = Some(me);
        log.initialized += 1;
    }

    fn select_card_to_play(&mut self, hand: &[Card], table: &Table) -> Option<usize> {
        self.log.borrow_mut().selections += 1;
        match self.behaviour {
            Behaviour::AlwaysPass => None,
            Behaviour::FirstLegal | Behaviour::PanicOnObserve => {
                legal_moves(hand, table).first().copied()
            }
            Behaviour::OutOfRange => Some(hand.len() + 10),
            Behaviour::Illegal => {
                let legal = legal_moves(hand, table);
                (0..hand.len()).find(|i| !legal.contains(i))
            }
            Behaviour::PanicOnSelect => panic!("strategy exploded while selecting"),
        }
    }

    fn observe_move(&mut self, player: PlayerId, card: Card) {
        self.log.borrow_mut().moves.push((player, card));
        if let Behaviour::PanicOnObserve = self.behaviour {
            panic!("strategy exploded while observing");
        }
    }

    fn observe_pass(&mut self, player: PlayerId) {
        self.log.borrow_mut().passes.push(player);
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

/// Captures the hands as dealt and every table the round went through.
#[derive(Default)]
pub struct Recorder {
    pub dealt: Vec<Vec<Card>>,
    pub tables: Vec<Table>,
    pub turns: Vec<PlayerId>,
    pub plays: Vec<(PlayerId, Card)>,
    pub passes: Vec<PlayerId>,
}

impl RoundObserver for Recorder {
    fn on_deal(&mut self, _opening: Card, view: &RoundView<'_>) {
        self.dealt = view.hands().map(|(_, h)| h.to_vec()).collect();
        self.tables.push(*view.table());
    }

    fn on_turn(&mut self, player: PlayerId, _view: &RoundView<'_>) {
        self.turns.push(player);
    }

    fn on_play(&mut self, player: PlayerId, card: Card, view: &RoundView<'_>) {
        self.plays.push((player, card));
        self.tables.push(*view.table());
    }

    fn on_pass(&mut self, player: PlayerId) {
        self.passes.push(player);
    }
}

/// Picks any index, legal or not, sometimes out of range, sometimes passes.
pub struct Wanderer {
    rng: rand_chacha::ChaCha8Rng,
}

impl Wanderer {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            rng: rand_chacha::ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Strategy for Wanderer {
    fn initialize(&mut self, _me: PlayerId) {}

    fn select_card_to_play(&mut self, hand: &[Card], table: &Table) -> Option<usize> {
        use rand::Rng;
        match self.rng.random_range(0..10) {
            0 => None,
            1 => Some(hand.len() + self.rng.random_range(0..3)),
            2..=5 => Some(self.rng.random_range(0..hand.len().max(1))),
            _ => {
                let legal = legal_moves(hand, table);
                if legal.is_empty() {
                    None
                } else {
                    Some(legal[self.rng.random_range(0..legal.len())])
                }
            }
        }
    }

    fn observe_move(&mut self, _player: PlayerId, _card: Card) {}

    fn observe_pass(&mut self, _player: PlayerId) {}

    fn name(&self) -> &str {
        "Wanderer"
    }
}
