use match3::{BoardEngine, SwapStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{MoveRecord, Player, RecordEntry, Recorder};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub player: String,
    pub moves: usize,
    pub committed: usize,
    pub reverted: usize,
    pub rejected: usize,
    pub cascade_steps: usize,
    pub longest_cascade: usize,
    pub score: u64,
}

/// Lets `player` make up to `num_moves` moves on the engine's board.
///
/// Returns an error only if the engine fails or the recording cannot be
/// written, not when the player picks a swap that is rejected.
pub fn run_session(
    engine: &mut BoardEngine,
    player: &mut dyn Player,
    num_moves: usize,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<SessionSummary> {
    let mut summary = SessionSummary {
        player: String::from(player.name()),
        ..SessionSummary::default()
    };

    for move_idx in 0..num_moves {
        let Some((a, b)) = player.choose_swap(engine.board()) else {
            info!(move_idx, "No swap left to try");
            break;
        };
        let report = engine.play(a, b)?;
        summary.moves += 1;
        match report.status {
            SwapStatus::Committed => {
                summary.committed += 1;
                summary.cascade_steps += report.resolution.num_steps();
                summary.longest_cascade = summary
                    .longest_cascade
                    .max(report.resolution.num_steps());
            }
            SwapStatus::Reverted => summary.reverted += 1,
            SwapStatus::Rejected(reason) => {
                debug!(move_idx, %reason, "Swap rejected");
                summary.rejected += 1;
            }
        }
        debug!(
            move_idx,
            %a,
            %b,
            points = report.points(),
            score = engine.score(),
            "Move"
        );
        // Nothing to animate
        engine.take_events();

        if let Some(recorder) = recorder {
            recorder.record(&RecordEntry::Move(MoveRecord {
                move_idx,
                a,
                b,
                status: report.status,
                resolution: report.resolution,
                score: engine.score(),
            }))?;
        }
    }

    summary.score = engine.score();
    if let Some(recorder) = recorder {
        recorder.record(&RecordEntry::End(summary.clone()))?;
    }
    Ok(summary)
}
