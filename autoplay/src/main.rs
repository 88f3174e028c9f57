use std::path::PathBuf;

use autoplay::{load_config, run_session, ConfigOverrides, RecordEntry, Recorder, Strategy};
use clap::Parser;
use match3::{BoardEngine, GameConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Width and height of the board, overrides the config file
    #[arg(long)]
    size: Option<usize>,

    /// Number of tile kinds, overrides the config file
    #[arg(short, long)]
    kinds: Option<u8>,

    /// Maximum number of cascade steps per move, overrides the config file
    #[arg(long)]
    cascade_limit: Option<usize>,

    /// How many moves to play
    #[arg(short, long, default_value_t = 100)]
    moves: usize,

    /// How the moves are picked
    #[arg(long, value_enum, default_value_t = Strategy::Greedy)]
    strategy: Strategy,

    /// Path to a game config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Record the session as JSON lines into this file
    #[arg(short, long)]
    record: Option<PathBuf>,

    /// Print the board before and after the session
    #[arg(long, default_value_t = false)]
    show: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    let config = ConfigOverrides {
        size: args.size,
        kind_count: args.kinds,
        cascade_limit: args.cascade_limit,
    }
    .apply(config)?;

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut engine = BoardEngine::from_rng(config, StdRng::from_rng(&mut rng)?)?;
    let mut player = args.strategy.into_player(StdRng::from_rng(&mut rng)?);
    info!(score = engine.score(), "Opening board resolved");
    if args.show {
        println!("{}", engine.board());
    }

    let mut recorder = if let Some(path) = &args.record {
        let mut recorder = Recorder::new(path)?;
        recorder.record(&RecordEntry::Start {
            seed,
            config,
            snapshot: engine.snapshot(),
        })?;
        Some(recorder)
    } else {
        None
    };

    let summary = run_session(&mut engine, player.as_mut(), args.moves, &mut recorder)?;

    if let Some(recorder) = recorder {
        recorder.finish()?;
    }
    if args.show {
        println!("{}", engine.board());
    }

    eprintln!(
        "End result for {} after {} moves:\n- {} committed, {} reverted, {} rejected\n- {} cascade steps, longest {}\n- score {}",
        summary.player,
        summary.moves,
        summary.committed,
        summary.reverted,
        summary.rejected,
        summary.cascade_steps,
        summary.longest_cascade,
        summary.score
    );

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
