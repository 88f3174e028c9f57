use serde::{Deserialize, Serialize};

use crate::{ConfigError, MAX_BOARD_SIZE, MAX_TILE_KINDS};

pub const DEFAULT_BOARD_SIZE: usize = 8;

pub const DEFAULT_KIND_COUNT: u8 = 6;

/// Parameters of a game. Missing fields take their default when deserialized.
///
/// ```
/// # use match3::GameConfig;
/// let config: GameConfig = serde_json::from_str(r#"{ "kind_count": 5 }"#).unwrap();
/// assert_eq!(config.size, 8);
/// assert_eq!(config.kind_count, 5);
/// assert_eq!(config.effective_cascade_limit(), 64);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the board.
    pub size: usize,
    /// Tiles are drawn from `0..kind_count`.
    pub kind_count: u8,
    /// How many rounds of removal and refill a single resolution may take.
    /// Defaults to `size * size`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cascade_limit: Option<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            kind_count: DEFAULT_KIND_COUNT,
            cascade_limit: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 || self.size > MAX_BOARD_SIZE {
            return Err(ConfigError::SizeOutOfRange { size: self.size });
        }
        if self.kind_count == 0 || self.kind_count > MAX_TILE_KINDS {
            return Err(ConfigError::KindCountOutOfRange {
                kind_count: self.kind_count,
            });
        }
        if self.cascade_limit == Some(0) {
            return Err(ConfigError::ZeroCascadeLimit);
        }
        Ok(())
    }

    pub fn effective_cascade_limit(&self) -> usize {
        self.cascade_limit.unwrap_or(self.size * self.size)
    }
}
