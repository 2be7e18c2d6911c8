use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::{RoundOutcome, RoundResult};

/// One finished round as written to a JSONL record file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier for this round (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    /// Engine seed. The deal of round `round` is the `round`-th deal drawn
    /// from an engine created with this seed.
    pub seed: u64,
    /// 1-based position of the round among those played by the engine
    #[serde(default)]
    pub round: usize,
    /// Strategy names in seat order
    pub players: Vec<String>,
    pub dealer: usize,
    pub outcome: RoundOutcome,
    /// `(seat, remaining cards)`, best first
    pub ranking: Vec<(usize, usize)>,
    pub moves: usize,
    pub turns: usize,
    /// Timestamp when the record was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl RoundRecord {
    pub fn from_result(
        round_id: String,
        seed: u64,
        round: usize,
        players: Vec<String>,
        result: &RoundResult,
    ) -> Self {
        Self {
            round_id,
            seed,
            round,
            players,
            dealer: result.dealer.index(),
            outcome: result.outcome,
            ranking: result
                .ranking
                .iter()
                .map(|s| (s.player.index(), s.remaining))
                .collect(),
            moves: result.moves,
            turns: result.turns,
            ts: None,
        }
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends [`RoundRecord`]s to a JSONL file, numbering them per logger.
pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    #[cfg(test)]
    fn with_date(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
