use crate::{Direction, Position};

/// Minimum pointer travel, in pointer units, for a drag to count as a swipe.
pub const DEFAULT_MIN_SWIPE_DISTANCE: f32 = 10.0;

/// Turns raw player gestures into swap candidates for the engine.
///
/// Adapters only translate input. Whether the pair is actually swapped is up
/// to [`BoardEngine::try_swap()`](crate::BoardEngine::try_swap), so an adapter
/// may hand out pairs that the engine then rejects.
pub trait GestureAdapter {
    type Gesture;

    fn resolve(&mut self, gesture: Self::Gesture, board_size: usize) -> Option<(Position, Position)>;
}

/// Click one tile, then a neighbor of it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectAdapter {
    selected: Option<Position>,
}

impl SelectAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

impl GestureAdapter for SelectAdapter {
    /// The square that was clicked.
    type Gesture = Position;

    fn resolve(&mut self, clicked: Position, board_size: usize) -> Option<(Position, Position)> {
        if !clicked.is_within(board_size) {
            return None;
        }
        match self.selected {
            Some(selected) if selected == clicked => {
                self.selected = None;
                None
            }
            Some(selected) if selected.is_adjacent(clicked) => {
                self.selected = None;
                Some((selected, clicked))
            }
            _ => {
                self.selected = Some(clicked);
                None
            }
        }
    }
}

/// A pointer drag that started on the tile at `origin`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Swipe {
    pub origin: Position,
    pub start: (f32, f32),
    pub end: (f32, f32),
}

/// Drag a tile onto one of its neighbors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeAdapter {
    pub min_distance: f32,
}

impl Default for SwipeAdapter {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_SWIPE_DISTANCE,
        }
    }
}

/// The direction of a pointer movement, going by its longer axis.
///
/// Pointer coordinates grow downwards. If both axes moved equally far, the
/// movement counts as vertical.
pub fn swipe_direction(dx: f32, dy: f32) -> Direction {
    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

impl GestureAdapter for SwipeAdapter {
    type Gesture = Swipe;

    fn resolve(&mut self, swipe: Swipe, board_size: usize) -> Option<(Position, Position)> {
        if !swipe.origin.is_within(board_size) {
            return None;
        }
        let dx = swipe.end.0 - swipe.start.0;
        let dy = swipe.end.1 - swipe.start.1;
        if dx.abs().max(dy.abs()) < self.min_distance {
            // Too short, that was a click
            return None;
        }
        let target = swipe
            .origin
            .neighbor(swipe_direction(dx, dy), board_size)?;
        Some((swipe.origin, target))
    }
}
