use match3::{Board, Direction, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Something that picks the next swap to try.
pub trait Player {
    fn name(&self) -> &str;

    /// Returns `None` if there is no pair of neighbors on the board at all.
    fn choose_swap(&mut self, board: &Board) -> Option<(Position, Position)>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Random,
    Greedy,
}

impl Strategy {
    pub fn into_player(self, rng: StdRng) -> Box<dyn Player> {
        match self {
            Strategy::Random => Box::new(RandomPlayer::new(rng)),
            Strategy::Greedy => Box::new(GreedyPlayer::new(rng)),
        }
    }
}

/// All pairs of neighbors on a board of this size, each pair once.
pub fn adjacent_pairs(board_size: usize) -> Vec<(Position, Position)> {
    let mut pairs = Vec::new();
    for row in 0..board_size {
        for col in 0..board_size {
            let pos = Position::new(row, col);
            for direction in [Direction::Right, Direction::Down] {
                if let Some(neighbor) = pos.neighbor(direction, board_size) {
                    pairs.push((pos, neighbor));
                }
            }
        }
    }
    pairs
}

/// Swaps a random tile with a random neighbor, matching or not.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_swap(&mut self, board: &Board) -> Option<(Position, Position)> {
        let size = board.size();
        if size < 2 {
            return None;
        }
        loop {
            let pos = Position::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            let direction = *Direction::ALL.choose(&mut self.rng)?;
            if let Some(neighbor) = pos.neighbor(direction, size) {
                return Some((pos, neighbor));
            }
        }
    }
}

/// Picks the swap that removes the most tiles right away, ignoring cascades.
///
/// Falls back to a random pair if no swap matches.
pub struct GreedyPlayer {
    rng: StdRng,
}

impl GreedyPlayer {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Player for GreedyPlayer {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose_swap(&mut self, board: &Board) -> Option<(Position, Position)> {
        let pairs = adjacent_pairs(board.size());
        let mut top_choices = Vec::new();
        let mut top_score = 0;
        for &(a, b) in &pairs {
            let outcome = board.try_swap(a, b);
            let score = outcome.matches.len();
            match score.cmp(&top_score) {
                std::cmp::Ordering::Less => {}
                std::cmp::Ordering::Equal => {
                    top_choices.push((a, b));
                }
                std::cmp::Ordering::Greater => {
                    top_choices = vec![(a, b)];
                    top_score = score;
                }
            }
        }
        top_choices.choose(&mut self.rng).copied()
    }
}
