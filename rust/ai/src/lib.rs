//! # sevens-ai: Opponent Strategies for Sevens
//!
//! Concrete policies implementing [`Strategy`] from `sevens-engine`. Each one
//! can be linked in directly or built into a plugin module with
//! `sevens_engine::declare_strategy!`.
//!
//! ## Core Components
//!
//! - [`random_aggressive`] - Plays a uniformly random legal card
//! - [`prudent`] - Fixed scoring that avoids opening thin suits
//! - [`calculative`] - Weighted scoring with opponent suit tracking
//! - [`sentinel`] - Calculative scoring plus critical-card timing
//! - [`create_strategy`] - Factory function for creating strategies by name
//!
//! ## Quick Start
//!
//! ```rust
//! use sevens_ai::create_strategy;
//! use sevens_engine::engine::Engine;
//! use sevens_engine::player::PlayerId;
//! use sevens_engine::strategy::into_handle;
//!
//! let mut engine = Engine::new(Some(42));
//! for (seat, name) in ["calculative", "prudent", "sentinel"].iter().enumerate() {
//!     let strategy = create_strategy(name).expect("known strategy");
//!     engine.register_strategy(PlayerId(seat), into_handle(strategy));
//! }
//! let result = engine.play_round().expect("round runs");
//! println!("Winner: {}", result.ranking[0].player);
//! ```
//!
//! ## Strategy Names
//!
//! - `"random-aggressive"` (alias `"random"`)
//! - `"prudent"`
//! - `"calculative"`
//! - `"sentinel"` (alias `"sentinel7"`)

use sevens_engine::strategy::Strategy;
use thiserror::Error;

pub mod calculative;
mod heuristics;
mod opponents;
pub mod prudent;
pub mod random_aggressive;
pub mod sentinel;

/// Canonical names accepted by [`create_strategy`].
pub const STRATEGY_NAMES: [&str; 4] = ["random-aggressive", "prudent", "calculative", "sentinel"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown strategy: {0}")]
pub struct UnknownStrategy(pub String);

/// Factory function to create strategies by name.
///
/// # Arguments
///
/// * `name` - Strategy identifier, case-insensitive (e.g., "calculative")
///
/// # Returns
///
/// A boxed trait object implementing `Strategy`, freshly seeded from the
/// operating system, or [`UnknownStrategy`] for a name not listed in
/// [`STRATEGY_NAMES`] or its aliases.
///
/// # Example
///
/// ```rust
/// use sevens_ai::create_strategy;
///
/// let strategy = create_strategy("prudent").unwrap();
/// assert_eq!(strategy.name(), "Prudent");
/// assert!(create_strategy("bluff").is_err());
/// ```
pub fn create_strategy(name: &str) -> Result<Box<dyn Strategy>, UnknownStrategy> {
    match name.to_ascii_lowercase().as_str() {
        "random-aggressive" | "random" => Ok(Box::new(random_aggressive::RandomAggressive::new())),
        "prudent" => Ok(Box::new(prudent::Prudent::new())),
        "calculative" => Ok(Box::new(calculative::Calculative::new())),
        "sentinel" | "sentinel7" => Ok(Box::new(sentinel::Sentinel::new())),
        _ => Err(UnknownStrategy(name.to_string())),
    }
}
