use serde::{Deserialize, Serialize};

use crate::{Board, MatchSet, Position, SwapRejection};

/// What became of a swap request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SwapStatus {
    /// The swap produced at least one match and was kept.
    Committed,
    /// The swap produced no match and was undone.
    Reverted,
    /// The swap was not attempted at all.
    Rejected(SwapRejection),
}

impl SwapStatus {
    pub fn committed(self) -> bool {
        matches!(self, SwapStatus::Committed)
    }
}

/// The result of [`Board::try_swap()`].
///
/// If the swap was not committed, `board` is an exact copy of the input board
/// and `matches` is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapOutcome {
    pub status: SwapStatus,
    pub board: Board,
    pub matches: MatchSet,
}

impl SwapOutcome {
    pub fn committed(&self) -> bool {
        self.status.committed()
    }
}

/// Checks that `a` and `b` are two different, neighboring squares on a board
/// of the given size.
pub fn validate_swap(board_size: usize, a: Position, b: Position) -> Result<(), SwapRejection> {
    for position in [a, b] {
        if !position.is_within(board_size) {
            return Err(SwapRejection::OutOfBounds { position });
        }
    }
    if a == b {
        return Err(SwapRejection::SamePosition);
    }
    if !a.is_adjacent(b) {
        return Err(SwapRejection::NotAdjacent);
    }
    Ok(())
}

impl Board {
    /// Tries swapping two neighboring tiles.
    ///
    /// The swap is kept only if the swapped board contains a match. This is
    /// the only way player moves reach the board, so a swap that does not
    /// match is never persisted. The matches are not removed here; the
    /// caller resolves the committed board afterwards.
    pub fn try_swap(&self, a: Position, b: Position) -> SwapOutcome {
        if let Err(rejection) = validate_swap(self.size(), a, b) {
            return SwapOutcome {
                status: SwapStatus::Rejected(rejection),
                board: self.clone(),
                matches: MatchSet::new(),
            };
        }

        let mut swapped = self.clone();
        swapped.swap(a, b);
        let matches = swapped.find_matches();
        if matches.is_empty() {
            SwapOutcome {
                status: SwapStatus::Reverted,
                board: self.clone(),
                matches,
            }
        } else {
            SwapOutcome {
                status: SwapStatus::Committed,
                board: swapped,
                matches,
            }
        }
    }
}
