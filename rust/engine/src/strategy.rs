//! The contract every opponent policy implements, and the plugin export macro.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cards::Card;
use crate::player::PlayerId;
use crate::table::Table;

/// Trait defining the interface for Sevens opponent policies.
/// The engine drives every strategy through the same lifecycle:
///
/// 1. [`initialize`](Strategy::initialize) once at the start of each round
/// 2. [`select_card_to_play`](Strategy::select_card_to_play) on each of its turns
/// 3. [`observe_move`](Strategy::observe_move) for every accepted play by any
///    player, its own included
/// 4. [`observe_pass`](Strategy::observe_pass) when it passed itself
///
/// A strategy instance lives for a whole tournament, so whatever it does not
/// reset in `initialize` carries over from round to round.
///
/// # Example Implementation
///
/// ```rust
/// use sevens_engine::cards::Card;
/// use sevens_engine::player::PlayerId;
/// use sevens_engine::rules::legal_moves;
/// use sevens_engine::strategy::Strategy;
/// use sevens_engine::table::Table;
///
/// struct FirstLegal;
///
/// impl Strategy for FirstLegal {
///     fn initialize(&mut self, _me: PlayerId) {}
///
///     fn select_card_to_play(&mut self, hand: &[Card], table: &Table) -> Option<usize> {
///         legal_moves(hand, table).first().copied()
///     }
///
///     fn observe_move(&mut self, _player: PlayerId, _card: Card) {}
///
///     fn observe_pass(&mut self, _player: PlayerId) {}
///
///     fn name(&self) -> &str {
///         "FirstLegal"
///     }
/// }
/// ```
pub trait Strategy {
    /// Binds the strategy to a seat and resets its round-scoped tracking.
    fn initialize(&mut self, me: PlayerId);

    /// Chooses a card from `hand` to play on `table`.
    ///
    /// Returns an index into `hand`, or `None` to pass. The engine turns an
    /// out-of-range index or an illegal card into a pass.
    fn select_card_to_play(&mut self, hand: &[Card], table: &Table) -> Option<usize>;

    /// Notification that `player` played `card`.
    fn observe_move(&mut self, player: PlayerId, card: Card);

    /// Notification that `player` passed.
    fn observe_pass(&mut self, player: PlayerId);

    /// Display name, constant for the lifetime of the instance.
    fn name(&self) -> &str;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn initialize(&mut self, me: PlayerId) {
        (**self).initialize(me)
    }

    fn select_card_to_play(&mut self, hand: &[Card], table: &Table) -> Option<usize> {
        (**self).select_card_to_play(hand, table)
    }

    fn observe_move(&mut self, player: PlayerId, card: Card) {
        (**self).observe_move(player, card)
    }

    fn observe_pass(&mut self, player: PlayerId) {
        (**self).observe_pass(player)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Shared handle to a strategy instance.
///
/// Handles are cloned into the engine and kept by the caller; the instance,
/// and the module backing it when it was loaded from a plugin, lives until the
/// last clone is dropped.
pub type StrategyHandle = Rc<RefCell<dyn Strategy>>;

pub fn into_handle<S: Strategy + 'static>(strategy: S) -> StrategyHandle {
    Rc::new(RefCell::new(strategy))
}

/// Name of the factory symbol every strategy module exports.
pub const FACTORY_SYMBOL: &str = "sevens_create_strategy";

/// Signature of the exported factory. The returned pointer comes from
/// `Box::into_raw` and is null when construction failed.
pub type StrategyFactory = unsafe extern "C" fn() -> *mut Box<dyn Strategy>;

/// Exports `constructor` as the strategy factory of a `cdylib`.
///
/// A panic inside the constructor is caught and reported to the loader as a
/// null instance.
///
/// ```ignore
/// sevens_engine::declare_strategy!(my_crate::MyStrategy::new);
/// ```
#[macro_export]
macro_rules! declare_strategy {
    ($constructor:path) => {
        #[no_mangle]
        #[allow(improper_ctypes_definitions)]
        pub extern "C" fn sevens_create_strategy(
        ) -> *mut ::std::boxed::Box<dyn $crate::strategy::Strategy> {
            let built = ::std::panic::catch_unwind(|| {
                let strategy: ::std::boxed::Box<dyn $crate::strategy::Strategy> =
                    ::std::boxed::Box::new($constructor());
                strategy
            });
            match built {
                Ok(strategy) => ::std::boxed::Box::into_raw(::std::boxed::Box::new(strategy)),
                Err(_) => ::std::ptr::null_mut(),
            }
        }
    };
}
