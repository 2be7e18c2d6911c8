use std::path::PathBuf;

use thiserror::Error;

use crate::cards::Card;

/// Configuration errors detected before a round or tournament starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("At least {minimum} players are required, got {actual}")]
    NotEnoughPlayers { minimum: usize, actual: usize },
    #[error("No strategy registered for player {0}")]
    MissingStrategy(usize),
    #[error("Opening card {0:?} is not part of the card universe")]
    OpeningCardMissing(Card),
    #[error("Card {0:?} appears more than once in the card universe")]
    DuplicateCard(Card),
    #[error("Initial table must hold exactly the opening card {opening:?}, found {found:?}")]
    LayoutMismatch { opening: Card, found: Vec<Card> },
    #[error("A card universe of {cards} cannot deal a card to each of {players} players")]
    UniverseTooSmall { cards: usize, players: usize },
    #[error("Round {round} ended with no cards left in any hand; the threshold is unreachable")]
    ScorelessRound { round: usize },
    #[error("Tournament threshold must be greater than zero")]
    InvalidThreshold,
}

/// Failures while resolving a strategy from an external module.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot open strategy module {path}: {source}")]
    ModuleNotFound {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
    #[error("Strategy module {path} does not export `{symbol}`: {source}")]
    EntryPointMissing {
        path: PathBuf,
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },
    #[error("Strategy module {path} did not produce a strategy instance")]
    InstantiationFailed { path: PathBuf },
}
