use serde::{Deserialize, Serialize};

use crate::{Cell, Phase};

/// A read-only copy of the engine state that can be handed to a renderer or
/// written out as JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: usize,
    pub kind_count: u8,
    pub score: u64,
    pub phase: Phase,
    /// Empty squares are `null`, tiles are their kind index.
    pub rows: Vec<Vec<Cell>>,
}
