use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use match3::{GameConfig, Position, Resolution, Snapshot, SwapStatus};
use serde::{Deserialize, Serialize};

use crate::SessionSummary;

/// One line of a recording.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entry", rename_all = "snake_case")]
pub enum RecordEntry {
    Start {
        seed: u64,
        config: GameConfig,
        snapshot: Snapshot,
    },
    Move(MoveRecord),
    End(SessionSummary),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub move_idx: usize,
    pub a: Position,
    pub b: Position,
    pub status: SwapStatus,
    pub resolution: Resolution,
    /// The score after this move.
    pub score: u64,
}

/// Writes a session as JSON lines, one [`RecordEntry`] per line.
pub struct Recorder {
    writer: BufWriter<File>,
}

impl Recorder {
    pub fn new(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                anyhow::bail!("Directory '{}' does not exist", parent.display());
            }
        }
        Ok(Self {
            writer: BufWriter::new(File::create(path)?),
        })
    }

    pub fn record(&mut self, entry: &RecordEntry) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.writer, entry)?;
        writeln!(self.writer)?;
        Ok(())
    }

    pub fn finish(mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
