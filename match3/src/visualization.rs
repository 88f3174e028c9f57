use crate::Board;

/// Draws the board in a box, with row and column indices.
///
/// Tiles are shown by their symbol and empty squares by a `·`.
///
/// ```
/// # use match3::{visualize, board};
/// let text = visualize(&board!("AB", "B."));
/// assert_eq!(text, "     0 1\n    ╭────╮\n  0 │A B │\n  1 │B · │\n    ╰────╯");
/// ```
pub fn visualize(board: &Board) -> String {
    let mut result = String::from("    ");
    for col in 0..board.size() {
        result += &format!("{:>2}", col);
    }
    result += "\n    ╭";
    for _ in 0..board.size() {
        result += "──";
    }
    result += "╮";

    for (i, row) in board.rows().enumerate() {
        result += &format!("\n{:>3} │", i);
        for cell in row {
            match cell {
                Some(kind) => result += &format!("{} ", kind.symbol()),
                None => result += "· ",
            }
        }
        result += "│";
    }

    result += "\n    ╰";
    for _ in 0..board.size() {
        result += "──";
    }
    result += "╯";
    result
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", visualize(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board;

    #[test]
    fn every_row_is_drawn() {
        let board = board!("ABC", "BCA", "CAB");
        let text = board.to_string();
        assert_eq!(text.lines().count(), board.size() + 3);
        assert_eq!(
            text,
            "     0 1 2\n    ╭──────╮\n  0 │A B C │\n  1 │B C A │\n  2 │C A B │\n    ╰──────╯"
        );
    }
}
