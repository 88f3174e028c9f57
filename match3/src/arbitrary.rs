use quickcheck::{Arbitrary, Gen};

use crate::{Board, Direction, Position, TileKind};

/// A full board with between 3x3 and 8x8 squares.
#[derive(Clone, Debug)]
pub struct BoardInput {
    pub board: Board,
    pub kind_count: u8,
}

/// Like [`BoardInput`], but roughly a third of the squares are empty.
#[derive(Clone, Debug)]
pub struct SparseBoardInput {
    pub board: Board,
    pub kind_count: u8,
}

/// A board plus two arbitrary positions, which may be equal, far apart or
/// slightly off the board.
#[derive(Clone, Debug)]
pub struct SwapInput {
    pub board: Board,
    pub a: Position,
    pub b: Position,
}

/// A board plus a pair of adjacent positions on it.
#[derive(Clone, Debug)]
pub struct AdjacentSwapInput {
    pub board: Board,
    pub a: Position,
    pub b: Position,
}

fn arbitrary_board(g: &mut Gen, empty_ratio: u8) -> (Board, u8) {
    let size = 3 + usize::from(u8::arbitrary(g) % 6);
    // Few kinds make matches likely, many kinds make them rare
    let kind_count = 2 + u8::arbitrary(g) % 5;
    let mut rows = Vec::with_capacity(size);
    for _ in 0..size {
        let row = (0..size)
            .map(|_| {
                if u8::arbitrary(g) % 100 < empty_ratio {
                    None
                } else {
                    TileKind::new(u8::arbitrary(g) % kind_count)
                }
            })
            .collect();
        rows.push(row);
    }
    (Board::from_rows(rows).unwrap(), kind_count)
}

fn arbitrary_position(g: &mut Gen, bound: usize) -> Position {
    Position::new(
        usize::from(u8::arbitrary(g)) % bound,
        usize::from(u8::arbitrary(g)) % bound,
    )
}

impl Arbitrary for BoardInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let (board, kind_count) = arbitrary_board(g, 0);
        Self { board, kind_count }
    }
}

impl Arbitrary for SparseBoardInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let (board, kind_count) = arbitrary_board(g, 33);
        Self { board, kind_count }
    }
}

impl Arbitrary for SwapInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let (board, _) = arbitrary_board(g, 0);
        let bound = board.size() + 1;
        let a = arbitrary_position(g, bound);
        let b = if bool::arbitrary(g) {
            a
        } else {
            arbitrary_position(g, bound)
        };
        Self { board, a, b }
    }
}

impl Arbitrary for AdjacentSwapInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let (board, _) = arbitrary_board(g, 0);
        loop {
            let a = arbitrary_position(g, board.size());
            if let Some(b) = a.neighbor(Direction::arbitrary(g), board.size()) {
                return Self { board, a, b };
            }
        }
    }
}

impl Arbitrary for Direction {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Direction::ALL).unwrap()
    }
}
