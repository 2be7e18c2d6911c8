//! Turning player arguments into registered strategies.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use sevens_ai::create_strategy;
use sevens_engine::engine::Engine;
use sevens_engine::loader::StrategyLoader;
use sevens_engine::player::PlayerId;
use sevens_engine::strategy::{StrategyHandle, into_handle};
use tracing::debug;

use crate::error::CliError;

const BUILTIN_PREFIX: &str = "builtin:";

/// Where a seat's strategy comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerSource {
    /// A strategy linked into the binary, by name.
    Builtin(String),
    /// A shared library exporting the strategy factory.
    Module(PathBuf),
}

impl PlayerSource {
    /// `builtin:<name>` selects a linked strategy; anything else is a module path.
    pub fn parse(arg: &str) -> Self {
        match arg.strip_prefix(BUILTIN_PREFIX) {
            Some(name) => PlayerSource::Builtin(name.to_string()),
            None => PlayerSource::Module(PathBuf::from(arg)),
        }
    }

    /// The module for one of the shipped strategy crates inside `dir`,
    /// named the way the platform names shared libraries.
    pub fn shipped_module(dir: &Path, crate_name: &str) -> Self {
        let file: OsString = libloading::library_filename(crate_name);
        PlayerSource::Module(dir.join(file))
    }
}

/// Resolves sources into strategies and seats them in an engine.
///
/// Modules are opened once per path; every seat still gets its own instance.
#[derive(Default)]
pub struct Seating {
    loader: StrategyLoader,
}

impl Seating {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, source: &PlayerSource) -> Result<StrategyHandle, CliError> {
        match source {
            PlayerSource::Builtin(name) => {
                let strategy =
                    create_strategy(name).map_err(|e| CliError::InvalidInput(e.to_string()))?;
                Ok(into_handle(strategy))
            }
            PlayerSource::Module(path) => Ok(self.loader.load(path)?),
        }
    }

    /// Seats `sources` in order, announcing each as `Player <i> → <name>`.
    pub fn seat_all(
        &mut self,
        engine: &mut Engine,
        sources: &[PlayerSource],
        out: &mut dyn Write,
    ) -> Result<Vec<String>, CliError> {
        for (i, source) in sources.iter().enumerate() {
            let handle = self.resolve(source)?;
            let name = handle.borrow().name().to_string();
            debug!(seat = i, %name, ?source, "seated strategy");
            writeln!(out, "Player {} → {}", i, name)?;
            engine.register_strategy(PlayerId(i), handle);
        }
        debug!(modules = self.loader.loaded_modules(), "seating complete");
        Ok(engine.strategy_names())
    }
}
