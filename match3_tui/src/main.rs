use std::io::stdout;
use std::time::{Duration, Instant};

use clap::Parser;
use match3::{BoardEngine, GameConfig, DEFAULT_BOARD_SIZE, DEFAULT_KIND_COUNT};
use ratatui::{
    crossterm::{
        event::{self, DisableMouseCapture, EnableMouseCapture},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::app::App;

mod app;
mod widgets;

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Width and height of the board
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Number of tile kinds
    #[arg(short, long, default_value_t = DEFAULT_KIND_COUNT)]
    kinds: u8,

    /// A log level among "off", "error", "warn", "info", "debug", "trace".
    /// Logs go to stderr, so redirect it when turning this on.
    #[arg(short, long, default_value = "off")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let config = GameConfig {
        size: args.size,
        kind_count: args.kinds,
        cascade_limit: None,
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut app = App::new(BoardEngine::new(config, seed)?);

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let result = run(&mut app);
    stdout().execute(DisableMouseCapture)?;
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;

    result?;
    println!("Final score: {}", app.engine().score());
    Ok(())
}

fn run(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    while !app.should_quit {
        terminal.draw(|frame| app.ui(frame))?;
        if event::poll(Duration::from_millis(16))? {
            let event = event::read()?;
            app.handle_event(event, Instant::now());
        }
        app.tick(Instant::now());
    }
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
