//! Exit codes returned by [`crate::run`].

/// Success, and also an unrecognised mode (nothing was run).
pub const SUCCESS: i32 = 0;

/// Usage, configuration, load or engine error.
pub const ERROR: i32 = 2;
