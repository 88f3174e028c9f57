use std::time::{Duration, Instant};

use match3::{
    BoardEngine, Direction, GestureAdapter, MatchSet, PhaseEvent, Position, SelectAdapter, Swipe,
    SwipeAdapter,
};
use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{prelude::*, widgets::*};
use tracing::{debug, error};

use crate::widgets::{board_widget_size, position_at, BoardWidget, TILE_HEIGHT, TILE_WIDTH};

/// How long two tiles take to trade places.
pub const SWAP_DURATION: Duration = Duration::from_millis(300);

/// How long matched tiles stay highlighted before they are removed.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(200);

/// How long the board rests after tiles have dropped.
pub const DROP_DURATION: Duration = Duration::from_millis(300);

/// Mouse positions are converted to these virtual units per terminal cell,
/// so that swipes are measured the same way in both directions.
const PIXELS_PER_COLUMN: f32 = 8.0;
const PIXELS_PER_ROW: f32 = 16.0;

struct Drag {
    origin: Position,
    start: (f32, f32),
}

pub struct App {
    engine: BoardEngine,
    cursor: Position,
    select: SelectAdapter,
    swipe: SwipeAdapter,
    drag: Option<Drag>,
    /// When the next cascade step is due, while the engine is busy.
    next_step_at: Option<Instant>,
    /// A reverted swap and when to stop showing it.
    flashing: Option<(Position, Position, Instant)>,
    /// Tiles waiting to be removed.
    highlighted: MatchSet,
    message: String,
    /// Where the tiles were last drawn, for mapping mouse positions.
    tiles_area: Rect,
    pub should_quit: bool,
}

impl App {
    pub fn new(engine: BoardEngine) -> Self {
        let mut app = Self {
            engine,
            cursor: Position::new(0, 0),
            select: SelectAdapter::new(),
            swipe: SwipeAdapter::default(),
            drag: None,
            next_step_at: None,
            flashing: None,
            highlighted: MatchSet::new(),
            message: String::new(),
            tiles_area: Rect::default(),
            should_quit: false,
        };
        app.process_events(Instant::now());
        app
    }

    pub fn engine(&self) -> &BoardEngine {
        &self.engine
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let size = self.engine.board().size();
        let direction = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('n') => {
                self.new_game(now);
                None
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.click(self.cursor, now);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => Some(Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Direction::Down),
            KeyCode::Left | KeyCode::Char('h') => Some(Direction::Left),
            KeyCode::Right | KeyCode::Char('l') => Some(Direction::Right),
            _ => None,
        };
        if let Some(neighbor) = direction.and_then(|dir| self.cursor.neighbor(dir, size)) {
            self.cursor = neighbor;
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let point = (
            f32::from(mouse.column) * PIXELS_PER_COLUMN,
            f32::from(mouse.row) * PIXELS_PER_ROW,
        );
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag = position_at(self.tiles_area, mouse.column, mouse.row)
                    .map(|origin| Drag { origin, start: point });
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(drag) = self.drag.take() else {
                    return;
                };
                self.cursor = drag.origin;
                let swipe = Swipe {
                    origin: drag.origin,
                    start: drag.start,
                    end: point,
                };
                match self.swipe.resolve(swipe, self.engine.board().size()) {
                    Some((a, b)) => {
                        self.select.clear();
                        self.swap(a, b, now);
                    }
                    None => self.click(drag.origin, now),
                }
            }
            _ => {}
        }
    }

    fn click(&mut self, pos: Position, now: Instant) {
        if let Some((a, b)) = self.select.resolve(pos, self.engine.board().size()) {
            self.swap(a, b, now);
        }
    }

    fn swap(&mut self, a: Position, b: Position, now: Instant) {
        // Rejections are not shown to the player
        if self.engine.try_swap(a, b).committed() {
            self.cursor = b;
            self.next_step_at = Some(now + SWAP_DURATION + HIGHLIGHT_DURATION);
        }
        self.process_events(now);
    }

    fn new_game(&mut self, now: Instant) {
        self.select.clear();
        self.drag = None;
        self.next_step_at = None;
        self.flashing = None;
        self.highlighted = MatchSet::new();
        if let Err(err) = self.engine.new_game() {
            error!(%err, "Could not start a new game");
        }
        self.process_events(now);
    }

    /// Advances the cascade once its next step is due.
    pub fn tick(&mut self, now: Instant) {
        if self.flashing.is_some_and(|(_, _, until)| now >= until) {
            self.flashing = None;
        }
        let Some(due) = self.next_step_at else {
            return;
        };
        if now < due {
            return;
        }
        match self.engine.resolve_step() {
            Ok(Some(_)) => {
                self.next_step_at = Some(now + DROP_DURATION + HIGHLIGHT_DURATION);
            }
            Ok(None) => self.next_step_at = None,
            Err(err) => {
                error!(%err, "Cascade did not settle");
                self.next_step_at = None;
                self.message = String::from("The board is stuck, press n for a new game");
            }
        }
        self.process_events(now);
    }

    fn process_events(&mut self, now: Instant) {
        for event in self.engine.take_events() {
            debug!(?event);
            match event {
                PhaseEvent::NewGame => {
                    self.message = String::from("New game");
                }
                PhaseEvent::SwapReverted { a, b } => {
                    self.flashing = Some((a, b, now + SWAP_DURATION));
                }
                PhaseEvent::SwapCommitted { matches, .. } => {
                    self.highlighted = matches;
                }
                PhaseEvent::TilesDropped { .. } => {
                    self.highlighted = self.engine.board().find_matches();
                }
                PhaseEvent::CascadeSettled { steps, points } => {
                    self.highlighted = MatchSet::new();
                    if points > 0 && steps > 1 {
                        self.message = format!("+{} ({} cascades)", points, steps);
                    } else if points > 0 {
                        self.message = format!("+{}", points);
                    }
                }
                PhaseEvent::SwapStarted { .. } | PhaseEvent::MatchesCleared { .. } => {}
            }
        }
    }

    pub fn ui(&mut self, frame: &mut Frame) {
        let (width, height) = board_widget_size(self.engine.board().size());
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(height),
            Constraint::Length(1),
        ])
        .areas(frame.size());

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Score ", Style::new().bold()),
                Span::raw(self.engine.score().to_string()),
                Span::raw("   "),
                Span::raw(self.message.as_str()),
            ]))
            .alignment(Alignment::Center),
            header,
        );

        let [_, board_area, _] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .areas(body);
        let board_area = Rect {
            height: height.min(board_area.height),
            ..board_area
        };
        self.tiles_area = Rect {
            x: board_area.x + 1,
            y: board_area.y + 1,
            width: board_area.width.saturating_sub(2) / TILE_WIDTH * TILE_WIDTH,
            height: board_area.height.saturating_sub(2) / TILE_HEIGHT * TILE_HEIGHT,
        };
        frame.render_widget(
            BoardWidget {
                board: self.engine.board(),
                cursor: self.cursor,
                selected: self.select.selected(),
                highlighted: &self.highlighted,
                flashing: self.flashing.map(|(a, b, _)| (a, b)),
            },
            board_area,
        );

        frame.render_widget(
            Paragraph::new("arrows/hjkl move · space select · drag to swap · n new game · q quit")
                .alignment(Alignment::Center)
                .style(Style::new().dark_gray()),
            footer,
        );
    }
}
