use serde::{Deserialize, Serialize};

use crate::{Position, MAX_BOARD_SIZE, MAX_TILE_KINDS};

/// Why a swap request was turned down.
///
/// Rejections are an expected part of play (an ambiguous gesture, a tap while
/// tiles are still falling), so they are reported as an outcome rather than
/// as an error, and nothing on the board changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SwapRejection {
    SamePosition,
    OutOfBounds { position: Position },
    NotAdjacent,
    /// A previous swap or its cascade has not finished yet.
    Busy,
}

impl std::error::Error for SwapRejection {}

impl std::fmt::Display for SwapRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwapRejection::SamePosition => write!(f, "Tried to swap a tile with itself"),
            SwapRejection::OutOfBounds { position } => {
                write!(f, "Position {} is not on the board", position)
            }
            SwapRejection::NotAdjacent => write!(f, "Only neighboring tiles can be swapped"),
            SwapRejection::Busy => {
                write!(f, "Cannot swap while a previous move is still being resolved")
            }
        }
    }
}

/// The error type for [`GameConfig::validate()`](crate::GameConfig::validate).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    SizeOutOfRange { size: usize },
    KindCountOutOfRange { kind_count: u8 },
    ZeroCascadeLimit,
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::SizeOutOfRange { size } => write!(
                f,
                "Board size {} is outside of the supported range 1..={}",
                size, MAX_BOARD_SIZE
            ),
            ConfigError::KindCountOutOfRange { kind_count } => write!(
                f,
                "{} tile kinds is outside of the supported range 1..={}",
                kind_count, MAX_TILE_KINDS
            ),
            ConfigError::ZeroCascadeLimit => write!(f, "The cascade limit must be at least 1"),
        }
    }
}

/// The error type for the [`BoardEngine`](crate::BoardEngine).
///
/// None of these are caused by player input, they all point at a bad
/// configuration or a broken invariant.
#[derive(Debug, PartialEq, Eq)]
pub enum EngineError {
    InvalidConfig(ConfigError),
    BoardSizeMismatch { expected: usize, actual: usize },
    KindOutOfRange { position: Position, kind_count: u8 },
    /// Matches kept appearing after `limit` rounds of removal and refill.
    ///
    /// With a sensible number of kinds this does not happen in practice;
    /// it usually means there are too few kinds for the board size.
    CascadeLimitExceeded { limit: usize },
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::InvalidConfig(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidConfig(_) => write!(f, "Invalid game configuration"),
            EngineError::BoardSizeMismatch { expected, actual } => write!(
                f,
                "Board is {0}x{0}, but the configuration asks for {1}x{1}",
                actual, expected
            ),
            EngineError::KindOutOfRange {
                position,
                kind_count,
            } => write!(
                f,
                "Tile at {} is not one of the {} configured kinds",
                position, kind_count
            ),
            EngineError::CascadeLimitExceeded { limit } => write!(
                f,
                "Board still had matches after {} cascade steps",
                limit
            ),
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::InvalidConfig(err)
    }
}
