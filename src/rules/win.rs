//! Win detection logic for 4D tic-tac-toe.

use crate::board::{Board, Coord, Symbol};
use crate::lines::LineIndex;
use tracing::instrument;

/// Checks whether the cell just played completed a winning line.
///
/// This is the fast path used after every accepted move: only the lines
/// passing through `last_move` are examined. Returns the owning symbol
/// of the completed line, `None` otherwise (including when `last_move`
/// is still empty).
#[instrument(skip(board))]
pub fn check_win(board: &Board, last_move: Coord) -> Option<Symbol> {
    // Every line examined contains `last_move`, so a completed one is
    // necessarily owned by the symbol just played.
    board.get(last_move)?;
    let index = LineIndex::global();
    index
        .lines_through(last_move)
        .find_map(|line| index.line_owner(board, line))
}

/// Checks every winning line for a completed one.
///
/// Used when the last move is unknown, such as inside search on a
/// hypothetical board. Returns the first completed line's symbol. For
/// any board reachable through sequential play the answer matches
/// [`check_win`]; two different symbols each completing a line cannot
/// arise under the engine's own move-acceptance rules.
#[instrument(skip(board))]
pub fn check_win_exhaustive(board: &Board) -> Option<Symbol> {
    let index = LineIndex::global();
    index
        .lines()
        .iter()
        .find_map(|line| index.line_owner(board, line))
}

/// The specific three cells forming `symbol`'s completed line, if any.
///
/// Scans all lines; used for highlighting the winning line once a game
/// finishes.
#[instrument(skip(board))]
pub fn winning_line(board: &Board, symbol: Symbol) -> Option<[Coord; 3]> {
    let index = LineIndex::global();
    index
        .lines()
        .iter()
        .find(|line| index.line_owner(board, line) == Some(symbol))
        .copied()
}
