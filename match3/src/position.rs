use serde::{Deserialize, Serialize};

/// Coordinates of a square on the board.
///
/// Row 0 is the top row and column 0 the leftmost column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_within(self, board_size: usize) -> bool {
        self.row < board_size && self.col < board_size
    }

    /// True if the two positions share an edge, i.e. their Manhattan distance is 1.
    pub fn is_adjacent(self, other: Position) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    /// The square one step in `direction`, or `None` if that leaves the board.
    pub fn neighbor(self, direction: Direction, board_size: usize) -> Option<Position> {
        let (row, col) = match direction {
            Direction::Up => (self.row.checked_sub(1)?, self.col),
            Direction::Down => (self.row + 1, self.col),
            Direction::Left => (self.row, self.col.checked_sub(1)?),
            Direction::Right => (self.row, self.col + 1),
        };
        let neighbor = Position { row, col };
        neighbor.is_within(board_size).then_some(neighbor)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    quickcheck! {
        fn neighbors_are_adjacent(row: u8, col: u8, direction: Direction) -> bool {
            let size = 8;
            let pos = Position::new(usize::from(row % 8), usize::from(col % 8));
            match pos.neighbor(direction, size) {
                Some(neighbor) => neighbor.is_adjacent(pos)
                    && neighbor.neighbor(direction.opposite(), size) == Some(pos),
                None => true,
            }
        }
    }

    #[test]
    fn adjacency() {
        let pos = Position::new(3, 3);
        assert!(pos.is_adjacent(Position::new(2, 3)));
        assert!(pos.is_adjacent(Position::new(3, 4)));
        assert!(!pos.is_adjacent(pos));
        assert!(!pos.is_adjacent(Position::new(4, 4)));
        assert!(!pos.is_adjacent(Position::new(3, 5)));
    }

    #[test]
    fn neighbors_stop_at_the_edge() {
        assert_eq!(Position::new(0, 0).neighbor(Direction::Up, 8), None);
        assert_eq!(Position::new(0, 0).neighbor(Direction::Left, 8), None);
        assert_eq!(Position::new(7, 7).neighbor(Direction::Down, 8), None);
        assert_eq!(Position::new(7, 7).neighbor(Direction::Right, 8), None);
        assert_eq!(
            Position::new(7, 7).neighbor(Direction::Up, 8),
            Some(Position::new(6, 7))
        );
    }
}
