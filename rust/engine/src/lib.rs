//! # sevens-engine: Sevens Game Engine Core
//!
//! Rule engine and turn scheduler for the card game Sevens. Players race to
//! empty their hands by extending each suit outward from its Seven, starting
//! from the Seven of Diamonds already on the table. Opponents are strategies,
//! either linked in or loaded at runtime from shared libraries.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and the 52-card universe
//! - [`table`] - The shared record of played cards
//! - [`rules`] - Move legality
//! - [`deck`] - Card/opening providers and the shuffled per-round deck
//! - [`strategy`] - The strategy contract and plugin export macro
//! - [`loader`] - Loading strategies from shared libraries
//! - [`engine`] - Round controller
//! - [`tournament`] - Multi-round scoring to a threshold
//! - [`logger`] - JSONL round records
//! - [`errors`] - Error types for configuration and loading
//!
//! ## Quick Start
//!
//! ```rust
//! use sevens_engine::cards::{Card, Rank, Suit};
//! use sevens_engine::rules::is_legal;
//! use sevens_engine::deck::{LayoutSource, OpeningLayout};
//!
//! let table = OpeningLayout::default().initial_table();
//! assert!(is_legal(Card::new(Suit::Diamonds, Rank::Six), &table));
//! assert!(!is_legal(Card::new(Suit::Diamonds, Rank::Five), &table));
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod loader;
pub mod logger;
pub mod player;
pub mod rules;
pub mod strategy;
pub mod table;
pub mod tournament;
