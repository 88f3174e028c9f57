use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    apply_cascade_step, check_cascade_limit, Board, CascadeStep, EngineError, GameConfig,
    MatchSet, Position, Resolution, Snapshot, SwapRejection, SwapStatus,
};

/// Where the engine is within a player move.
///
/// ```text
/// Idle -> SwapPending -> Idle                                  (reverted)
/// Idle -> SwapPending -> Committed -> ResolvingCascade* -> Idle
/// ```
///
/// New swaps are only accepted in [`Phase::Idle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    SwapPending { a: Position, b: Position },
    /// The swap matched and was kept, its matches are still on the board.
    Committed { a: Position, b: Position },
    /// `step` cascade steps have been applied so far.
    ResolvingCascade { step: usize },
}

/// Emitted on every phase transition, for presentation layers to animate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PhaseEvent {
    NewGame,
    SwapStarted {
        a: Position,
        b: Position,
    },
    SwapReverted {
        a: Position,
        b: Position,
    },
    SwapCommitted {
        a: Position,
        b: Position,
        matches: MatchSet,
    },
    MatchesCleared {
        step: usize,
        matches: MatchSet,
        points: u32,
    },
    TilesDropped {
        step: usize,
        refilled: usize,
    },
    /// The board has no matches left and the engine is idle again.
    CascadeSettled {
        steps: usize,
        points: u64,
    },
}

/// The result of [`BoardEngine::play()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub status: SwapStatus,
    pub resolution: Resolution,
}

impl MoveReport {
    pub fn points(&self) -> u64 {
        self.resolution.points
    }
}

/// Owns the board and the score, and is the only thing that changes them.
///
/// The engine has no notion of time. A presentation layer may wait between
/// [`Self::try_swap()`] and [`Self::resolve_step()`] to animate, and the
/// engine keeps rejecting new swaps until the cascade has settled.
#[derive(Clone, Debug)]
pub struct BoardEngine {
    config: GameConfig,
    rng: StdRng,
    board: Board,
    score: u64,
    phase: Phase,
    // Points of the cascade in progress, reported when it settles
    cascade_points: u64,
    events: Vec<PhaseEvent>,
}

impl BoardEngine {
    /// Starts a new game with a board generated from `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, EngineError> {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn from_rng(config: GameConfig, rng: StdRng) -> Result<Self, EngineError> {
        config.validate()?;
        let mut engine = Self {
            config,
            rng,
            board: Board::empty(config.size),
            score: 0,
            phase: Phase::Idle,
            cascade_points: 0,
            events: Vec::new(),
        };
        engine.new_game()?;
        Ok(engine)
    }

    /// Uses the given board as is, without resolving matches that may be on it.
    ///
    /// Call [`Self::resolve()`] before handing such a board to a player.
    pub fn with_board(config: GameConfig, board: Board, rng: StdRng) -> Result<Self, EngineError> {
        config.validate()?;
        if board.size() != config.size {
            return Err(EngineError::BoardSizeMismatch {
                expected: config.size,
                actual: board.size(),
            });
        }
        for (idx, cell) in board.cells().iter().enumerate() {
            if cell.is_some_and(|kind| kind.index() >= config.kind_count) {
                return Err(EngineError::KindOutOfRange {
                    position: Position::new(idx / config.size, idx % config.size),
                    kind_count: config.kind_count,
                });
            }
        }
        Ok(Self {
            config,
            rng,
            board,
            score: 0,
            phase: Phase::Idle,
            cascade_points: 0,
            events: Vec::new(),
        })
    }

    /// Replaces the board with a fresh random one and resets the score.
    ///
    /// Matches on the fresh board are resolved right away; their points count,
    /// so a new game does not always start at zero.
    pub fn new_game(&mut self) -> Result<Resolution, EngineError> {
        self.board = Board::random(self.config.size, self.config.kind_count, &mut self.rng);
        self.score = 0;
        self.cascade_points = 0;
        self.events.clear();
        self.events.push(PhaseEvent::NewGame);
        self.phase = Phase::ResolvingCascade { step: 0 };
        let resolution = self.resolve()?;
        debug!(
            steps = resolution.num_steps(),
            score = self.score,
            "New game ready"
        );
        Ok(resolution)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a swap or its cascade is in flight.
    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Drains the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<PhaseEvent> {
        std::mem::take(&mut self.events)
    }

    /// Swaps two neighboring tiles if that produces a match.
    ///
    /// A committed swap leaves its matches on the board; call
    /// [`Self::resolve()`] or [`Self::resolve_step()`] to clear them. Until
    /// then, further swaps are rejected as [`SwapRejection::Busy`].
    pub fn try_swap(&mut self, a: Position, b: Position) -> SwapStatus {
        if self.is_busy() {
            debug!(%a, %b, phase = ?self.phase, "Swap rejected, engine is busy");
            return SwapStatus::Rejected(SwapRejection::Busy);
        }

        self.phase = Phase::SwapPending { a, b };
        let outcome = self.board.try_swap(a, b);
        match outcome.status {
            SwapStatus::Committed => {
                self.events.push(PhaseEvent::SwapStarted { a, b });
                self.events.push(PhaseEvent::SwapCommitted {
                    a,
                    b,
                    matches: outcome.matches,
                });
                self.board = outcome.board;
                self.phase = Phase::Committed { a, b };
            }
            SwapStatus::Reverted => {
                self.events.push(PhaseEvent::SwapStarted { a, b });
                self.events.push(PhaseEvent::SwapReverted { a, b });
                self.phase = Phase::Idle;
            }
            SwapStatus::Rejected(_) => {
                self.phase = Phase::Idle;
            }
        }
        debug!(%a, %b, status = ?outcome.status, "Swap");
        outcome.status
    }

    /// Applies a single round of removal, gravity and refill.
    ///
    /// Returns `Ok(None)` once the board has no matches, at which point the
    /// engine is idle again. Exceeding the configured cascade limit is an
    /// error that keeps the engine busy until the next [`Self::new_game()`].
    pub fn resolve_step(&mut self) -> Result<Option<CascadeStep>, EngineError> {
        let step = match self.phase {
            Phase::ResolvingCascade { step } => step,
            _ => 0,
        };

        let matches = self.board.find_matches();
        if matches.is_empty() {
            self.settle(step);
            return Ok(None);
        }

        if let Err(err) = check_cascade_limit(step, self.config.effective_cascade_limit()) {
            self.phase = Phase::ResolvingCascade { step };
            return Err(err);
        }

        let cascade_step = apply_cascade_step(
            &mut self.board,
            matches,
            self.config.kind_count,
            &mut self.rng,
            step,
        );
        self.score += u64::from(cascade_step.points);
        self.cascade_points += u64::from(cascade_step.points);
        self.events.push(PhaseEvent::MatchesCleared {
            step,
            matches: cascade_step.matches.clone(),
            points: cascade_step.points,
        });
        self.events.push(PhaseEvent::TilesDropped {
            step,
            refilled: cascade_step.refilled,
        });
        self.phase = Phase::ResolvingCascade { step: step + 1 };
        Ok(Some(cascade_step))
    }

    /// Runs [`Self::resolve_step()`] until the board has settled.
    pub fn resolve(&mut self) -> Result<Resolution, EngineError> {
        let mut resolution = Resolution::default();
        while let Some(step) = self.resolve_step()? {
            resolution.push(step);
        }
        Ok(resolution)
    }

    /// Tries the swap and, if it is committed, resolves the resulting cascade.
    pub fn play(&mut self, a: Position, b: Position) -> Result<MoveReport, EngineError> {
        let status = self.try_swap(a, b);
        let resolution = if status.committed() {
            self.resolve()?
        } else {
            Resolution::default()
        };
        Ok(MoveReport { status, resolution })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            size: self.config.size,
            kind_count: self.config.kind_count,
            score: self.score,
            phase: self.phase,
            rows: self.board.to_rows(),
        }
    }

    fn settle(&mut self, steps: usize) {
        if self.phase == Phase::Idle {
            return;
        }
        self.events.push(PhaseEvent::CascadeSettled {
            steps,
            points: self.cascade_points,
        });
        self.cascade_points = 0;
        self.phase = Phase::Idle;
    }
}
