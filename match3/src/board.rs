mod error;
mod match_set;

use std::str::FromStr;

pub use error::*;
pub use match_set::*;
use rand::Rng;

use crate::{Cell, Position, TileKind};

/// Points awarded for every tile that is removed.
pub const POINTS_PER_TILE: u32 = 10;

pub const MAX_BOARD_SIZE: usize = 32;

/// Minimum number of equal tiles in a line that count as a match.
pub const MATCH_LENGTH: usize = 3;

/// A square grid of [`Cell`]s in row-major order.
///
/// The board itself knows nothing about turns or scores. It provides the
/// building blocks (matching, removal, gravity, refill) that the
/// [`BoardEngine`](crate::BoardEngine) strings together.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// A board on which every square is empty.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0 or greater than [`MAX_BOARD_SIZE`].
    pub fn empty(size: usize) -> Self {
        assert!(size > 0 && size <= MAX_BOARD_SIZE);
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Fills every square with a kind drawn uniformly from `0..kind_count`.
    ///
    /// The result may well contain matches, which is why a fresh board is
    /// always resolved before it is handed to the player.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0 or greater than [`MAX_BOARD_SIZE`], or if
    /// `kind_count` is 0 or greater than [`MAX_TILE_KINDS`](crate::MAX_TILE_KINDS).
    pub fn random<R: Rng + ?Sized>(size: usize, kind_count: u8, rng: &mut R) -> Self {
        let mut board = Self::empty(size);
        for cell in board.cells.iter_mut() {
            *cell = Some(TileKind::random(kind_count, rng));
        }
        board
    }

    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, BoardShapeError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardShapeError::NoRows);
        }
        if size > MAX_BOARD_SIZE {
            return Err(BoardShapeError::TooLarge { size });
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, cells_in_row) in rows.into_iter().enumerate() {
            if cells_in_row.len() != size {
                return Err(BoardShapeError::RaggedRow {
                    row,
                    len: cells_in_row.len(),
                    expected: size,
                });
            }
            cells.extend(cells_in_row);
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, pos: Position) -> Option<usize> {
        pos.is_within(self.size)
            .then(|| pos.row * self.size + pos.col)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.is_within(self.size)
    }

    /// Returns `None` if the position is off the board.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Returns false if the position is off the board.
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Exchanges the contents of two squares, adjacent or not.
    ///
    /// Returns false, without changing anything, if either position is off the board.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(idx_a), Some(idx_b)) => {
                self.cells.swap(idx_a, idx_b);
                true
            }
            _ => false,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    /// The cells of one column, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().skip(col).step_by(self.size).copied()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn num_empty(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Finds every position that is part of a horizontal or vertical line of
    /// at least three equal tiles.
    ///
    /// Each window of three consecutive squares is checked on its own, so a
    /// line of five contributes all five positions, and positions shared by
    /// a horizontal and a vertical line are reported once.
    pub fn find_matches(&self) -> MatchSet {
        let mut matches = MatchSet::new();
        let span = self.size.saturating_sub(MATCH_LENGTH - 1);

        for row in 0..self.size {
            for col in 0..span {
                let window = [0, 1, 2].map(|offset| Position::new(row, col + offset));
                if self.is_uniform(window) {
                    matches.extend(window);
                }
            }
        }

        for row in 0..span {
            for col in 0..self.size {
                let window = [0, 1, 2].map(|offset| Position::new(row + offset, col));
                if self.is_uniform(window) {
                    matches.extend(window);
                }
            }
        }

        matches
    }

    // Are all squares in the window filled with the same kind?
    fn is_uniform(&self, window: [Position; MATCH_LENGTH]) -> bool {
        let first = self.get(window[0]).flatten();
        first.is_some()
            && window[1..]
                .iter()
                .all(|&pos| self.get(pos).flatten() == first)
    }

    /// Empties every matched square and returns the points for them.
    ///
    /// Scoring is flat: every removed tile is worth [`POINTS_PER_TILE`], no
    /// matter how long the line it was part of.
    pub fn remove_matches(&mut self, matches: &MatchSet) -> u32 {
        for pos in matches {
            self.set(pos, None);
        }
        POINTS_PER_TILE * matches.len() as u32
    }

    /// Lets tiles fall into the empty squares below them.
    ///
    /// Every column is compacted on its own, keeping the order of its tiles,
    /// so afterwards all empty squares are at the top of their column.
    pub fn apply_gravity(&mut self) {
        let size = self.size;
        for col in 0..size {
            // Scan from the bottom, moving each tile down to the lowest free row
            let mut write_row = size;
            for read_row in (0..size).rev() {
                let read_idx = read_row * size + col;
                if let Some(kind) = self.cells[read_idx] {
                    write_row -= 1;
                    if write_row != read_row {
                        self.cells[write_row * size + col] = Some(kind);
                        self.cells[read_idx] = None;
                    }
                }
            }
        }
    }

    /// Fills every empty square with a random kind and returns how many were filled.
    ///
    /// Squares are visited column by column, top to bottom.
    pub fn refill<R: Rng + ?Sized>(&mut self, kind_count: u8, rng: &mut R) -> usize {
        let mut filled = 0;
        for col in 0..self.size {
            for row in 0..self.size {
                let cell = &mut self.cells[row * self.size + col];
                if cell.is_none() {
                    *cell = Some(TileKind::random(kind_count, rng));
                    filled += 1;
                }
            }
        }
        filled
    }

    /// [`Self::apply_gravity()`] followed by [`Self::refill()`].
    pub fn drop_and_refill<R: Rng + ?Sized>(&mut self, kind_count: u8, rng: &mut R) -> usize {
        self.apply_gravity();
        self.refill(kind_count, rng)
    }
}

/// Parses whitespace-separated rows of tile letters, with `.` for an empty square.
impl FromStr for Board {
    type Err = BoardShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for (row, line) in s.split_whitespace().enumerate() {
            let mut cells = Vec::with_capacity(line.len());
            for (col, symbol) in line.chars().enumerate() {
                let cell = match symbol {
                    '.' => None,
                    _ => Some(TileKind::from_symbol(symbol).ok_or(
                        BoardShapeError::InvalidSymbol { row, col, symbol },
                    )?),
                };
                cells.push(cell);
            }
            rows.push(cells);
        }
        Self::from_rows(rows)
    }
}

/// Shorthand for creating a board from rows of tile letters.
///
/// This macro is just calling the [`FromStr`] instance of [`Board`].
/// ```
/// # use match3::{board, Position, TileKind};
/// let board = board!("ABC", "B.A", "CCC");
/// assert_eq!(board.get(Position::new(1, 1)), Some(None));
/// assert_eq!(board.get(Position::new(2, 0)), Some(Some(TileKind::HEART)));
/// assert_eq!(board.find_matches().len(), 3);
/// ```
#[macro_export]
macro_rules! board {
    ($($row:literal),+ $(,)?) => {
        <$crate::Board as std::str::FromStr>::from_str(concat!($($row, " "),+))
            .expect("Invalid rows given to board! macro")
    };
}
#[allow(unused_imports)]
pub(crate) use board;

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::{BoardInput, SparseBoardInput};

    quickcheck! {
        fn removal_awards_ten_points_per_tile(input: BoardInput) -> bool {
            let mut board = input.board;
            let matches = board.find_matches();
            let points = board.remove_matches(&matches);
            points == 10 * matches.len() as u32
                && matches.iter().all(|pos| board.get(pos) == Some(None))
                && board.num_empty() == matches.len()
        }
    }

    quickcheck! {
        fn gravity_keeps_column_order(input: SparseBoardInput) -> bool {
            let before = input.board.clone();
            let mut after = input.board;
            after.apply_gravity();
            (0..before.size()).all(|col| {
                let tiles: Vec<Cell> = before.column(col).filter(Option::is_some).collect();
                let column: Vec<Cell> = after.column(col).collect();
                let num_empty = column.len() - tiles.len();
                column[..num_empty].iter().all(Option::is_none) && column[num_empty..] == tiles[..]
            })
        }
    }

    quickcheck! {
        fn refill_fills_only_the_gaps(input: SparseBoardInput, seed: u64) -> bool {
            use rand::SeedableRng;
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            let before = input.board.clone();
            let mut after = input.board;
            let num_empty = after.num_empty();
            let filled = after.refill(input.kind_count, &mut rng);
            filled == num_empty
                && after.is_full()
                && before.cells().iter().zip(after.cells()).all(|(b, a)| b.is_none() || b == a)
                && after.cells().iter().flatten().all(|kind| kind.index() < input.kind_count)
        }
    }

    #[test]
    fn flat_row_major_layout() {
        let board = board!("AB", "CD");
        assert_eq!(board.size(), 2);
        assert_eq!(board.get(Position::new(0, 1)), Some(Some(TileKind::STAR)));
        assert_eq!(board.get(Position::new(1, 0)), Some(Some(TileKind::HEART)));
        assert_eq!(board.get(Position::new(2, 0)), None);
        assert_eq!(
            board.column(1).collect::<Vec<_>>(),
            vec![Some(TileKind::STAR), Some(TileKind::ZAP)]
        );
    }

    #[test]
    fn malformed_rows_are_rejected() {
        assert_eq!(Board::from_str(""), Err(BoardShapeError::NoRows));
        assert_eq!(
            Board::from_str("AB A"),
            Err(BoardShapeError::RaggedRow {
                row: 1,
                len: 1,
                expected: 2
            })
        );
        assert_eq!(
            Board::from_str("A? BA"),
            Err(BoardShapeError::InvalidSymbol {
                row: 0,
                col: 1,
                symbol: '?'
            })
        );
    }

    #[test]
    fn horizontal_match_in_row_three() {
        let mut board = board!(
            "ABCDEFAB",
            "CDEFABCD",
            "EFABCDEF",
            "BCCCDEFA",
            "CDEFABCD",
            "EFABCDEF",
            "ABCDEFAB",
            "CDEFABCD",
        );
        let matches = board.find_matches();
        assert_eq!(
            matches,
            MatchSet::from_iter([Position::new(3, 1), Position::new(3, 2), Position::new(3, 3)])
        );
        assert_eq!(board.remove_matches(&matches), 30);
        for col in 1..=3 {
            assert_eq!(board.get(Position::new(3, col)), Some(None));
        }
    }

    #[test]
    fn long_lines_report_every_tile() {
        let board = board!("AAAAA", "BCBCB", "CBCBC", "BCBCB", "CBCBC");
        let matches = board.find_matches();
        assert_eq!(matches.len(), 5);
        assert!((0..5).all(|col| matches.contains(Position::new(0, col))));
    }

    #[test]
    fn crossing_lines_share_positions() {
        let board = board!("BAB", "AAA", "BAB");
        // Five distinct positions, the center belongs to both lines
        assert_eq!(board.find_matches().len(), 5);
    }

    #[test]
    fn empty_squares_never_match() {
        let board = board!("...", "...", "...");
        assert!(board.find_matches().is_empty());
    }

    #[test]
    fn far_off_board_positions_are_ignored() {
        let mut board = board!("ABC", "BCA", "CAB");
        let before = board.clone();
        let far = Position::new(usize::MAX, 0);
        assert_eq!(board.get(far), None);
        assert!(!board.set(far, None));
        assert!(!board.swap(Position::new(0, 0), far));
        assert!(!board.swap(Position::new(0, 0), Position::new(usize::MAX / 2, 0)));
        assert_eq!(board, before);
    }

    #[test]
    #[should_panic]
    fn empty_board_of_size_zero_panics() {
        Board::empty(0);
    }

    #[test]
    #[should_panic]
    fn random_board_without_kinds_panics() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        Board::random(3, 0, &mut rng);
    }

    #[test]
    fn gravity_in_a_single_column() {
        let mut board = board!("A..", "...", "B..");
        board.apply_gravity();
        assert_eq!(board, board!("...", "A..", "B.."));

        let mut board = board!("AB", ".C");
        board.apply_gravity();
        assert_eq!(board, board!(".B", "AC"));
    }
}
