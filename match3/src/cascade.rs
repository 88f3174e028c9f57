use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{error, trace};

use crate::{Board, EngineError, MatchSet};

/// One round of removing matches and letting new tiles fall in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeStep {
    /// Zero-based index of this round within its resolution.
    pub step: usize,
    /// The tiles that were removed.
    pub matches: MatchSet,
    pub points: u32,
    /// How many new tiles were generated to refill the board.
    pub refilled: usize,
}

/// Everything that happened while bringing a board to a state without matches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub steps: Vec<CascadeStep>,
    pub points: u64,
}

impl Resolution {
    pub fn num_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn tiles_removed(&self) -> usize {
        self.steps.iter().map(|step| step.matches.len()).sum()
    }

    pub(crate) fn push(&mut self, step: CascadeStep) {
        self.points += u64::from(step.points);
        self.steps.push(step);
    }
}

/// Removes the given matches, applies gravity and refills the board.
pub fn apply_cascade_step<R: Rng + ?Sized>(
    board: &mut Board,
    matches: MatchSet,
    kind_count: u8,
    rng: &mut R,
    step: usize,
) -> CascadeStep {
    let points = board.remove_matches(&matches);
    let refilled = board.drop_and_refill(kind_count, rng);
    trace!(step, removed = matches.len(), points, refilled, "Cascade step");
    CascadeStep {
        step,
        matches,
        points,
        refilled,
    }
}

/// Fails once `step` cascade steps have been applied and matches remain.
pub(crate) fn check_cascade_limit(step: usize, limit: usize) -> Result<(), EngineError> {
    if step >= limit {
        error!(limit, "Board did not settle within the cascade limit");
        return Err(EngineError::CascadeLimitExceeded { limit });
    }
    Ok(())
}

/// Repeats find, remove and refill until the board has no matches left.
///
/// New tiles falling into place can form new matches, so one resolution can
/// take several steps. It is bounded by `limit` steps; if the board still has
/// matches after that, [`EngineError::CascadeLimitExceeded`] is returned and
/// the board is left as it was after the last step.
///
/// This is the engine-free form of [`BoardEngine::resolve()`](crate::BoardEngine::resolve),
/// which applies the same steps and limit but also keeps score and emits events.
pub fn resolve<R: Rng + ?Sized>(
    board: &mut Board,
    kind_count: u8,
    rng: &mut R,
    limit: usize,
) -> Result<Resolution, EngineError> {
    let mut resolution = Resolution::default();
    loop {
        let matches = board.find_matches();
        if matches.is_empty() {
            return Ok(resolution);
        }
        let step = resolution.num_steps();
        check_cascade_limit(step, limit)?;
        resolution.push(apply_cascade_step(board, matches, kind_count, rng, step));
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::{board, Position, TileKind};

    quickcheck! {
        fn default_boards_settle_within_size_squared(seed: u64) -> bool {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut board = Board::random(8, 6, &mut rng);
            match resolve(&mut board, 6, &mut rng, 64) {
                Ok(resolution) => {
                    board.find_matches().is_empty()
                        && board.is_full()
                        && resolution.points == 10 * resolution.tiles_removed() as u64
                }
                Err(_) => false,
            }
        }
    }

    quickcheck! {
        fn same_seed_same_result(seed: u64) -> bool {
            let run = || {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut board = Board::random(8, 6, &mut rng);
                let resolution = resolve(&mut board, 6, &mut rng, 64);
                (board, resolution)
            };
            run() == run()
        }
    }

    #[test]
    fn settled_board_is_left_alone() {
        let mut board = board!("ABC", "BCA", "CAB");
        let before = board.clone();
        let mut rng = StdRng::seed_from_u64(0);
        let resolution = resolve(&mut board, 3, &mut rng, 9).unwrap();
        assert_eq!(resolution, Resolution::default());
        assert_eq!(board, before);
    }

    #[test]
    fn step_removes_drops_and_refills() {
        let mut board = board!("BAC", "AAA", "CBC");
        let matches = board.find_matches();
        let mut rng = StdRng::seed_from_u64(3);
        let step = apply_cascade_step(&mut board, matches, 4, &mut rng, 0);
        assert_eq!(step.points, 30);
        assert_eq!(step.refilled, 3);
        assert!(board.is_full());
        // The top row fell into the middle row
        assert_eq!(board.get(Position::new(1, 0)), Some(Some(TileKind::STAR)));
        assert_eq!(board.get(Position::new(1, 1)), Some(Some(TileKind::GEM)));
        assert_eq!(board.get(Position::new(1, 2)), Some(Some(TileKind::HEART)));
        assert_eq!(board.get(Position::new(2, 1)), Some(Some(TileKind::STAR)));
    }

    #[test]
    fn limit_allows_exactly_limit_steps() {
        assert_eq!(check_cascade_limit(0, 1), Ok(()));
        assert_eq!(check_cascade_limit(15, 16), Ok(()));
        assert_eq!(
            check_cascade_limit(16, 16),
            Err(EngineError::CascadeLimitExceeded { limit: 16 })
        );
    }

    #[test]
    fn a_single_kind_never_settles() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = Board::random(4, 1, &mut rng);
        assert_eq!(
            resolve(&mut board, 1, &mut rng, 16),
            Err(EngineError::CascadeLimitExceeded { limit: 16 })
        );
    }
}
