//! `--record FILE`: one JSON line per finished round.

use std::io;
use std::path::Path;

use sevens_engine::cards::Card;
use sevens_engine::engine::{Engine, RoundObserver, RoundResult, RoundView};
use sevens_engine::errors::EngineError;
use sevens_engine::logger::{RoundLogger, RoundRecord};
use sevens_engine::player::PlayerId;
use sevens_engine::tournament::RoundRunner;
use tracing::{info, warn};

use crate::error::CliError;

pub struct RoundRecorder {
    logger: RoundLogger,
    seed: u64,
    players: Vec<String>,
    written: usize,
    failed: Option<io::Error>,
}

impl RoundRecorder {
    pub fn open(path: &Path, seed: u64, players: Vec<String>) -> Result<Self, CliError> {
        let logger = RoundLogger::create(path)?;
        info!(path = %path.display(), seed, "recording rounds");
        Ok(Self {
            logger,
            seed,
            players,
            written: 0,
            failed: None,
        })
    }

    /// Number of records written, or the first write error.
    pub fn finish(self) -> io::Result<usize> {
        match self.failed {
            Some(e) => Err(e),
            None => Ok(self.written),
        }
    }
}

impl RoundObserver for RoundRecorder {
    fn on_finish(&mut self, result: &RoundResult) {
        if self.failed.is_some() {
            return;
        }
        let id = self.logger.next_id();
        let round = self.written + 1;
        let record = RoundRecord::from_result(id, self.seed, round, self.players.clone(), result);
        match self.logger.write(&record) {
            Ok(()) => self.written += 1,
            Err(e) => {
                warn!(error = %e, round = %record.round_id, "cannot write round record");
                self.failed = Some(e);
            }
        }
    }
}

/// Forwards every round event to both observers, left first.
pub struct Tee<'a>(pub &'a mut dyn RoundObserver, pub &'a mut dyn RoundObserver);

impl RoundObserver for Tee<'_> {
    fn on_deal(&mut self, opening: Card, view: &RoundView<'_>) {
        self.0.on_deal(opening, view);
        self.1.on_deal(opening, view);
    }

    fn on_turn(&mut self, player: PlayerId, view: &RoundView<'_>) {
        self.0.on_turn(player, view);
        self.1.on_turn(player, view);
    }

    fn on_play(&mut self, player: PlayerId, card: Card, view: &RoundView<'_>) {
        self.0.on_play(player, card, view);
        self.1.on_play(player, card, view);
    }

    fn on_pass(&mut self, player: PlayerId) {
        self.0.on_pass(player);
        self.1.on_pass(player);
    }

    fn on_finish(&mut self, result: &RoundResult) {
        self.0.on_finish(result);
        self.1.on_finish(result);
    }
}

/// Tournament runner that records each round when a recorder is attached.
pub struct RecordingRunner {
    engine: Engine,
    recorder: Option<RoundRecorder>,
}

impl RecordingRunner {
    pub fn new(engine: Engine, recorder: Option<RoundRecorder>) -> Self {
        Self { engine, recorder }
    }

    /// Records written, zero when nothing was being recorded.
    pub fn finish(self) -> io::Result<usize> {
        self.recorder.map_or(Ok(0), RoundRecorder::finish)
    }
}

impl RoundRunner for RecordingRunner {
    fn player_count(&self) -> usize {
        self.engine.player_count()
    }

    fn play_round(&mut self) -> Result<RoundResult, EngineError> {
        match self.recorder.as_mut() {
            Some(recorder) => self.engine.play_round_with(recorder),
            None => self.engine.play_round(),
        }
    }
}
