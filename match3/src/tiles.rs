use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound on the number of distinct tile kinds, one per letter of the alphabet.
pub const MAX_TILE_KINDS: u8 = 26;

/// The kind of a tile on the board.
///
/// Tiles only ever compare by kind, so a kind is nothing more than an index in
/// `0..kind_count`. The first six kinds have names, any further kinds are
/// anonymous and only shown by their [symbol](TileKind::symbol).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TileKind(u8);

/// A single square of the board. `None` means the tile was removed and the
/// square is waiting to be refilled.
pub type Cell = Option<TileKind>;

static NAMES: [&str; 6] = ["gem", "star", "heart", "zap", "diamond", "droplet"];

impl TileKind {
    pub const GEM: TileKind = TileKind(0);
    pub const STAR: TileKind = TileKind(1);
    pub const HEART: TileKind = TileKind(2);
    pub const ZAP: TileKind = TileKind(3);
    pub const DIAMOND: TileKind = TileKind(4);
    pub const DROPLET: TileKind = TileKind(5);

    /// Returns `None` if `index` is not below [`MAX_TILE_KINDS`].
    pub fn new(index: u8) -> Option<Self> {
        (index < MAX_TILE_KINDS).then_some(Self(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Draws a kind uniformly from `0..kind_count`.
    ///
    /// # Panics
    ///
    /// Panics if `kind_count` is 0 or greater than [`MAX_TILE_KINDS`].
    pub fn random<R: Rng + ?Sized>(kind_count: u8, rng: &mut R) -> Self {
        assert!(kind_count > 0 && kind_count <= MAX_TILE_KINDS);
        Self(rng.gen_range(0..kind_count))
    }

    /// Single uppercase letter, `A` for index 0.
    pub fn symbol(self) -> char {
        char::from(b'A' + self.0)
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        if symbol.is_ascii_uppercase() {
            Some(Self(symbol as u8 - b'A'))
        } else {
            None
        }
    }

    pub fn name(self) -> Option<&'static str> {
        NAMES.get(usize::from(self.0)).copied()
    }
}

impl std::fmt::Display for TileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The error type for converting a raw index into a [`TileKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileKindOutOfRange(pub u8);

impl std::error::Error for TileKindOutOfRange {}

impl std::fmt::Display for TileKindOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tile kind {} is out of range, there are at most {} kinds",
            self.0, MAX_TILE_KINDS
        )
    }
}

impl TryFrom<u8> for TileKind {
    type Error = TileKindOutOfRange;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index).ok_or(TileKindOutOfRange(index))
    }
}

impl From<TileKind> for u8 {
    fn from(kind: TileKind) -> u8 {
        kind.0
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn symbols_roundtrip() {
        for index in 0..MAX_TILE_KINDS {
            let kind = TileKind::new(index).unwrap();
            assert_eq!(TileKind::from_symbol(kind.symbol()), Some(kind));
        }
        assert_eq!(TileKind::from_symbol('a'), None);
        assert_eq!(TileKind::from_symbol('.'), None);
    }

    #[test]
    fn reference_kinds_are_named() {
        assert_eq!(TileKind::GEM.name(), Some("gem"));
        assert_eq!(TileKind::DROPLET.name(), Some("droplet"));
        assert_eq!(TileKind::new(6).unwrap().name(), None);
    }

    #[test]
    fn random_kinds_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(TileKind::random(6, &mut rng).index() < 6);
        }
    }

    #[test]
    fn deserializing_rejects_out_of_range_kinds() {
        assert_eq!(
            serde_json::from_str::<TileKind>("5").unwrap(),
            TileKind::DROPLET
        );
        assert!(serde_json::from_str::<TileKind>("26").is_err());
    }
}
