//! Text rendering of the board.

use generals_rules::{Board, COLUMNS, Coord, ROWS};

const SEPARATOR: &str = "   +---+---+---+---+---+---+---+---+---+";

/// Formats the board with row 8 at the top and column A on the left.
///
/// Occupied squares show the piece's rank code; empty squares are blank.
pub fn render_board(board: &Board) -> String {
    let mut result = String::new();

    result.push_str("     A   B   C   D   E   F   G   H   I\n");
    result.push_str(SEPARATOR);
    result.push('\n');

    for row in (0..ROWS).rev() {
        result.push_str(&format!("{:>2} |", row + 1));
        for column in 0..COLUMNS {
            let cell = Coord::new(column, row)
                .and_then(|coord| board.piece_at(coord))
                .map(|piece| piece.rank().code())
                .unwrap_or_else(|| "   ".to_string());
            result.push_str(&cell);
            result.push('|');
        }
        result.push('\n');
        result.push_str(SEPARATOR);
        result.push('\n');
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use generals_rules::{Piece, Player, Rank, coord::decode};

    #[test]
    fn test_empty_board_layout() {
        let text = render_board(&Board::new());
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 2 + ROWS * 2);
        assert_eq!(lines[0], "     A   B   C   D   E   F   G   H   I");
        assert_eq!(lines[2], " 8 |   |   |   |   |   |   |   |   |   |");
        assert_eq!(lines[16], " 1 |   |   |   |   |   |   |   |   |   |");
    }

    #[test]
    fn test_pieces_show_rank_codes() {
        let mut board = Board::new();
        board.place(decode("A1").unwrap(), Piece::new(Player::White, Rank::Flag));
        board.place(decode("I8").unwrap(), Piece::new(Player::Black, Rank::FiveStarGeneral));

        let text = render_board(&board);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[2], " 8 |   |   |   |   |   |   |   |   |5SG|");
        assert_eq!(lines[16], " 1 |FLG|   |   |   |   |   |   |   |   |");
    }
}
