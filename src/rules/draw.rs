//! Draw detection logic for 4D tic-tac-toe.

use crate::board::Board;
use tracing::instrument;

/// Checks if the board is full (all 81 cells occupied).
///
/// A full board with no winner indicates a draw.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, Symbol};

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        board.try_place(
            Symbol::new("X").expect("valid symbol"),
            Coord::new(1, 1, 1, 1).expect("valid coord"),
        );
        assert!(!is_full(&board));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        let x = Symbol::new("X").expect("valid symbol");
        for c in Coord::all() {
            board.try_place(x, c);
        }
        assert!(is_full(&board));
    }
}
