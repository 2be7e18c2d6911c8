use std::any::Any;
use std::collections::{BTreeMap, HashSet};
use std::panic::{self, AssertUnwindSafe};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::deck::{CardSource, Deck, LayoutSource, OpeningLayout, StandardDeck};
use crate::errors::EngineError;
use crate::player::{PlayerId, PlayerState};
use crate::rules::is_legal;
use crate::strategy::StrategyHandle;
use crate::table::Table;

pub const MIN_PLAYERS: usize = 2;

/// Round controller: deals, runs the turn loop and ranks the players.
///
/// The engine owns the table and every hand. Strategies only ever see a
/// `&[Card]` of their own hand and a `&Table`, and their answers go through
/// [`is_legal`] before anything changes.
///
/// # Examples
///
/// ```
/// use sevens_engine::engine::Engine;
/// use sevens_engine::player::PlayerId;
/// use sevens_engine::strategy::{into_handle, Strategy};
/// use sevens_engine::cards::Card;
/// use sevens_engine::table::Table;
/// use sevens_engine::rules::legal_moves;
///
/// struct FirstLegal;
/// impl Strategy for FirstLegal {
///     fn initialize(&mut self, _me: PlayerId) {}
///     fn select_card_to_play(&mut self, hand: &[Card], table: &Table) -> Option<usize> {
///         legal_moves(hand, table).first().copied()
///     }
///     fn observe_move(&mut self, _p: PlayerId, _c: Card) {}
///     fn observe_pass(&mut self, _p: PlayerId) {}
///     fn name(&self) -> &str { "FirstLegal" }
/// }
///
/// let mut engine = Engine::new(Some(42));
/// for id in PlayerId::all(4) {
///     engine.register_strategy(id, into_handle(FirstLegal));
/// }
/// let result = engine.play_round().expect("round runs");
/// assert_eq!(result.ranking.len(), 4);
/// ```
pub struct Engine {
    seed: u64,
    rng: ChaCha20Rng,
    cards: Box<dyn CardSource>,
    layout: Box<dyn LayoutSource>,
    strategies: BTreeMap<PlayerId, StrategyHandle>,
}

/// Why a round stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// The player emptied their hand
    HandEmptied(PlayerId),
    /// Every player passed since their last play; the table is stuck
    AllPassed,
}

/// Cards left in one player's hand when the round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player: PlayerId,
    pub remaining: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Players sorted by remaining cards, fewest first; ties keep seat order
    pub ranking: Vec<PlayerScore>,
    pub outcome: RoundOutcome,
    /// Player who received the first dealt card
    pub dealer: PlayerId,
    /// Accepted plays, not counting the opening card
    pub moves: usize,
    pub turns: usize,
}

impl RoundResult {
    pub fn score_of(&self, player: PlayerId) -> Option<usize> {
        self.ranking
            .iter()
            .find(|s| s.player == player)
            .map(|s| s.remaining)
    }

    /// Maps the ranking onto display names indexed by seat.
    pub fn named(&self, names: &[String]) -> Vec<(String, usize)> {
        self.ranking
            .iter()
            .map(|s| {
                let name = names
                    .get(s.player.index())
                    .cloned()
                    .unwrap_or_else(|| s.player.to_string());
                (name, s.remaining)
            })
            .collect()
    }
}

/// Read-only projection of a round in progress, handed to observers.
pub struct RoundView<'a> {
    players: &'a [PlayerState],
    table: &'a Table,
}

impl<'a> RoundView<'a> {
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn hand(&self, player: PlayerId) -> &'a [Card] {
        let players = self.players;
        players[player.index()].hand()
    }

    pub fn hands(&self) -> impl Iterator<Item = (PlayerId, &'a [Card])> + 'a {
        let players = self.players;
        players.iter().map(|p| (p.id, p.hand()))
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }
}

/// Receives presentation events while a round runs. Every method defaults to
/// doing nothing.
pub trait RoundObserver {
    fn on_deal(&mut self, _opening: Card, _view: &RoundView<'_>) {}
    fn on_turn(&mut self, _player: PlayerId, _view: &RoundView<'_>) {}
    fn on_play(&mut self, _player: PlayerId, _card: Card, _view: &RoundView<'_>) {}
    fn on_pass(&mut self, _player: PlayerId) {}
    fn on_finish(&mut self, _result: &RoundResult) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Quiet;

impl RoundObserver for Quiet {}

enum Phase {
    AwaitingTurn(PlayerId),
    Resolving(PlayerId, Option<usize>),
    RoundOver(RoundOutcome),
}

struct Round<'e> {
    strategies: &'e BTreeMap<PlayerId, StrategyHandle>,
    players: Vec<PlayerState>,
    table: Table,
    universe: usize,
    dealer: PlayerId,
    moves: usize,
    turns: usize,
}

impl Engine {
    /// Creates an engine with the standard deck and the Seven of Diamonds opening.
    /// Without a seed the shuffle is drawn from the process random source.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
            cards: Box::new(StandardDeck),
            layout: Box::new(OpeningLayout::default()),
            strategies: BTreeMap::new(),
        }
    }

    pub fn with_sources(
        mut self,
        cards: impl CardSource + 'static,
        layout: impl LayoutSource + 'static,
    ) -> Self {
        self.cards = Box::new(cards);
        self.layout = Box::new(layout);
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Binds `strategy` to `player`, replacing any earlier registration.
    pub fn register_strategy(&mut self, player: PlayerId, strategy: StrategyHandle) {
        self.strategies.insert(player, strategy);
    }

    pub fn has_registered_strategies(&self) -> bool {
        !self.strategies.is_empty()
    }

    pub fn player_count(&self) -> usize {
        self.strategies.len()
    }

    /// Strategy display names in seat order.
    pub fn strategy_names(&self) -> Vec<String> {
        self.strategies
            .values()
            .map(|s| s.borrow().name().to_string())
            .collect()
    }

    pub fn play_round(&mut self) -> Result<RoundResult, EngineError> {
        self.play_round_with(&mut Quiet)
    }

    /// Plays one round, reporting progress to `observer`.
    pub fn play_round_with(
        &mut self,
        observer: &mut dyn RoundObserver,
    ) -> Result<RoundResult, EngineError> {
        self.validate_seats()?;
        let players = self.strategies.len();
        let opening = self.layout.opening_card();
        let universe = self.cards.cards();
        validate_universe(&universe, opening, players)?;
        let table = self.layout.initial_table();
        validate_layout(&table, opening)?;

        let deck = Deck::shuffled(self.cards.as_ref(), &mut self.rng);
        let dealer = PlayerId(self.rng.random_range(0..players));
        let hands = deck.deal(players, dealer.index());

        let mut round = Round {
            strategies: &self.strategies,
            players: hands
                .into_iter()
                .enumerate()
                .map(|(i, hand)| PlayerState::new(PlayerId(i), hand))
                .collect(),
            table,
            universe: universe.len(),
            dealer,
            moves: 0,
            turns: 0,
        };
        round.remove_opening_card(opening);

        info!(players, dealer = dealer.index(), seed = self.seed, "round started");
        for (id, strategy) in self.strategies.iter() {
            guarded(*id, "initialize", || strategy.borrow_mut().initialize(*id));
        }
        observer.on_deal(opening, &round.view());

        let result = round.run(observer);
        info!(
            outcome = ?result.outcome,
            moves = result.moves,
            turns = result.turns,
            "round finished"
        );
        observer.on_finish(&result);
        Ok(result)
    }

    fn validate_seats(&self) -> Result<(), EngineError> {
        if self.strategies.len() < MIN_PLAYERS {
            return Err(EngineError::NotEnoughPlayers {
                minimum: MIN_PLAYERS,
                actual: self.strategies.len(),
            });
        }
        // Seats must be exactly 0..n
        let seats = self.strategies.len();
        if let Some(missing) = (0..seats).find(|i| !self.strategies.contains_key(&PlayerId(*i))) {
            return Err(EngineError::MissingStrategy(missing));
        }
        Ok(())
    }
}

fn validate_universe(universe: &[Card], opening: Card, players: usize) -> Result<(), EngineError> {
    // Every seat is dealt at least one card
    if universe.len() < players {
        return Err(EngineError::UniverseTooSmall {
            cards: universe.len(),
            players,
        });
    }
    let mut seen = HashSet::with_capacity(universe.len());
    for &card in universe {
        if !seen.insert(card) {
            return Err(EngineError::DuplicateCard(card));
        }
    }
    if !seen.contains(&opening) {
        return Err(EngineError::OpeningCardMissing(opening));
    }
    Ok(())
}

/// The layout must start with the opening card and nothing else on the table.
fn validate_layout(table: &Table, opening: Card) -> Result<(), EngineError> {
    if table.played_count() == 1 && table.contains(opening) {
        return Ok(());
    }
    Err(EngineError::LayoutMismatch {
        opening,
        found: table.cards().collect(),
    })
}

impl Round<'_> {
    fn view(&self) -> RoundView<'_> {
        RoundView {
            players: &self.players,
            table: &self.table,
        }
    }

    fn remove_opening_card(&mut self, opening: Card) {
        debug_assert_eq!(
            self.players.iter().filter(|p| p.holds(opening)).count(),
            1,
            "opening card must be dealt exactly once"
        );
        if let Some(holder) = self.players.iter_mut().find(|p| p.holds(opening)) {
            holder.discard(opening);
            debug!(player = holder.id.index(), "opening card removed from hand");
        }
    }

    fn run(mut self, observer: &mut dyn RoundObserver) -> RoundResult {
        let mut phase = Phase::AwaitingTurn(self.dealer.next(self.players.len()));
        let outcome = loop {
            phase = match phase {
                Phase::AwaitingTurn(player) => {
                    self.turns += 1;
                    observer.on_turn(player, &self.view());
                    let choice = self.ask(player);
                    Phase::Resolving(player, choice)
                }
                Phase::Resolving(player, choice) => self.resolve(player, choice, observer),
                Phase::RoundOver(outcome) => break outcome,
            };
        };
        self.finish(outcome)
    }

    fn ask(&self, player: PlayerId) -> Option<usize> {
        let strategy = &self.strategies[&player];
        let hand = self.players[player.index()].hand();
        guarded(player, "select_card_to_play", || {
            strategy.borrow_mut().select_card_to_play(hand, &self.table)
        })
        .flatten()
    }

    fn resolve(
        &mut self,
        player: PlayerId,
        choice: Option<usize>,
        observer: &mut dyn RoundObserver,
    ) -> Phase {
        let seat = player.index();
        let accepted = choice.filter(|&i| {
            self.players[seat]
                .hand()
                .get(i)
                .is_some_and(|&card| is_legal(card, &self.table))
        });

        match accepted {
            Some(index) => {
                let card = self.players[seat].hand()[index];
                debug_assert!(!self.table.contains(card), "card already on the table");
                let before = self.table;
                self.table.mark(card);
                debug_assert!(before.is_subset_of(&self.table));
                self.moves += 1;
                debug!(player = seat, card = ?card, "card played");

                for (id, strategy) in self.strategies.iter() {
                    guarded(*id, "observe_move", || {
                        strategy.borrow_mut().observe_move(player, card)
                    });
                }

                let removed = self.players[seat].play(index);
                debug_assert_eq!(removed, card);
                observer.on_play(player, card, &self.view());

                if self.players[seat].remaining() == 0 {
                    return Phase::RoundOver(RoundOutcome::HandEmptied(player));
                }
            }
            None => {
                if let Some(index) = choice {
                    warn!(player = seat, index, "illegal selection treated as a pass");
                }
                debug!(player = seat, "player passed");
                let strategy = &self.strategies[&player];
                guarded(player, "observe_pass", || {
                    strategy.borrow_mut().observe_pass(player)
                });
                self.players[seat].pass();
                observer.on_pass(player);
            }
        }

        if self.players.iter().all(PlayerState::has_passed) {
            Phase::RoundOver(RoundOutcome::AllPassed)
        } else {
            Phase::AwaitingTurn(player.next(self.players.len()))
        }
    }

    fn finish(self, outcome: RoundOutcome) -> RoundResult {
        let mut ranking: Vec<PlayerScore> = self
            .players
            .iter()
            .map(|p| PlayerScore {
                player: p.id,
                remaining: p.remaining(),
            })
            .collect();
        ranking.sort_by_key(|s| s.remaining);

        debug_assert_eq!(
            ranking.iter().map(|s| s.remaining).sum::<usize>() + self.moves + 1,
            self.universe,
            "cards were lost or duplicated during the round"
        );

        RoundResult {
            ranking,
            outcome,
            dealer: self.dealer,
            moves: self.moves,
            turns: self.turns,
        }
    }
}

/// Runs a strategy callback, absorbing a panic into `None`.
fn guarded<R>(player: PlayerId, callback: &'static str, f: impl FnOnce() -> R) -> Option<R> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(payload) => {
            warn!(
                player = player.index(),
                callback,
                reason = panic_message(payload.as_ref()),
                "strategy panicked; ignoring"
            );
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
