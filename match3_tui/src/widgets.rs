use match3::{Board, MatchSet, Position, TileKind};
use ratatui::{prelude::*, widgets::*};

/// Terminal columns taken up by one tile.
pub const TILE_WIDTH: u16 = 3;

/// Terminal rows taken up by one tile.
pub const TILE_HEIGHT: u16 = 1;

const TILE_COLORS: [Color; 6] = [
    Color::LightGreen,
    Color::Yellow,
    Color::LightRed,
    Color::LightBlue,
    Color::LightCyan,
    Color::LightMagenta,
];

fn tile_color(kind: TileKind) -> Color {
    TILE_COLORS
        .get(usize::from(kind.index()))
        .copied()
        .unwrap_or(Color::Indexed(16 + kind.index()))
}

/// Size of the bordered board widget for a board of the given size.
pub fn board_widget_size(board_size: usize) -> (u16, u16) {
    let size = board_size as u16;
    (size * TILE_WIDTH + 2, size * TILE_HEIGHT + 2)
}

/// The board square under the terminal cell at (`column`, `row`), given the
/// area the board's tiles were drawn into.
pub fn position_at(tiles_area: Rect, column: u16, row: u16) -> Option<Position> {
    if column < tiles_area.x
        || row < tiles_area.y
        || column >= tiles_area.right()
        || row >= tiles_area.bottom()
    {
        return None;
    }
    Some(Position::new(
        usize::from((row - tiles_area.y) / TILE_HEIGHT),
        usize::from((column - tiles_area.x) / TILE_WIDTH),
    ))
}

pub struct BoardWidget<'a> {
    pub board: &'a Board,
    pub cursor: Position,
    pub selected: Option<Position>,
    /// Tiles that are about to be removed.
    pub highlighted: &'a MatchSet,
    /// Tiles of a swap that was just undone.
    pub flashing: Option<(Position, Position)>,
}

impl BoardWidget<'_> {
    fn tile_style(&self, pos: Position, kind: TileKind) -> Style {
        let mut style = Style::new().fg(tile_color(kind)).add_modifier(Modifier::BOLD);
        if self.highlighted.contains(pos) {
            style = style.add_modifier(Modifier::REVERSED | Modifier::SLOW_BLINK);
        }
        if self
            .flashing
            .is_some_and(|(a, b)| a == pos || b == pos)
        {
            style = style.bg(Color::Red);
        }
        if self.selected == Some(pos) {
            style = style.bg(Color::DarkGray);
        }
        style
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::new()
            .border_type(BorderType::Rounded)
            .borders(Borders::all());
        let inner = block.inner(area);
        block.render(area, buf);

        for (i, row) in self.board.rows().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                let x = inner.x + j as u16 * TILE_WIDTH;
                let y = inner.y + i as u16 * TILE_HEIGHT;
                if x + TILE_WIDTH > inner.right() || y + TILE_HEIGHT > inner.bottom() {
                    continue;
                }
                let pos = Position::new(i, j);
                let (left, right) = if pos == self.cursor {
                    ("[", "]")
                } else {
                    (" ", " ")
                };
                match cell {
                    Some(kind) => {
                        let style = self.tile_style(pos, *kind);
                        buf.set_string(x, y, left, Style::new());
                        buf.set_string(x + 1, y, kind.symbol().to_string(), style);
                        buf.set_string(x + 2, y, right, Style::new());
                    }
                    None => {
                        buf.set_string(x, y, format!("{}·{}", left, right), Style::new());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use match3::board;

    use super::*;

    #[test]
    fn screen_cells_map_to_squares() {
        let tiles = Rect::new(10, 5, 8 * TILE_WIDTH, 8 * TILE_HEIGHT);
        assert_eq!(position_at(tiles, 10, 5), Some(Position::new(0, 0)));
        assert_eq!(position_at(tiles, 12, 5), Some(Position::new(0, 0)));
        assert_eq!(position_at(tiles, 13, 6), Some(Position::new(1, 1)));
        assert_eq!(position_at(tiles, 33, 12), Some(Position::new(7, 7)));
        assert_eq!(position_at(tiles, 34, 12), None);
        assert_eq!(position_at(tiles, 9, 5), None);
        assert_eq!(position_at(tiles, 10, 13), None);
    }

    #[test]
    fn renders_cursor_and_tiles() {
        let board = board!("AB", "C.");
        let (width, height) = board_widget_size(2);
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        let highlighted = MatchSet::new();
        BoardWidget {
            board: &board,
            cursor: Position::new(0, 1),
            selected: None,
            highlighted: &highlighted,
            flashing: None,
        }
        .render(area, &mut buf);
        let line = |y: u16| -> String {
            (0..width)
                .map(|x| buf.get(x, y).symbol().to_string())
                .collect()
        };
        assert_eq!(line(1), "│ A [B]│");
        assert_eq!(line(2), "│ C  · │");
    }
}
