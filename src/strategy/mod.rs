//! Pluggable move-selection strategies.
//!
//! Every automated player satisfies one capability: given a board copy
//! and the acting symbol, produce a legal empty-cell move. The engine
//! never calls a strategy itself; orchestration hands a
//! [`Board`](crate::Board) snapshot to the strategy and feeds the chosen
//! coordinate back through [`Game::make_move`](crate::Game::make_move).

mod heuristic;
mod learned;
mod minimax;

pub use heuristic::Heuristic;
pub use learned::Learned;
pub use minimax::Minimax;

use crate::board::{Board, Coord, Symbol};
use crate::rules;
use once_cell::sync::Lazy;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// A move-selection policy.
///
/// `choose` takes `&mut self` only for internal RNG state; strategies
/// never mutate the board they are given.
pub trait Strategy {
    /// Short name for logs and statistics.
    fn name(&self) -> &str;

    /// Picks an empty cell for `symbol` on `board`.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::BoardFull`] when no empty cell exists.
    /// Callers must not invoke a strategy on a terminal board, so this
    /// signals a caller bug rather than a game condition.
    fn choose(&mut self, board: &Board, symbol: Symbol) -> Result<Coord, StrategyError>;
}

/// Error selecting a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StrategyError {
    /// The board has no empty cell to choose from.
    #[display("no empty cells to choose from")]
    BoardFull,
}

/// Cells whose axes lean toward the middle index, preferred when no
/// tactical move exists. Order matters only for readability; selection
/// among the available ones is random.
static CENTER_CELLS: Lazy<Vec<Coord>> = Lazy::new(|| {
    [
        [1, 1, 1, 1],
        [1, 1, 1, 0],
        [1, 1, 0, 1],
        [1, 0, 1, 1],
        [0, 1, 1, 1],
        [1, 1, 1, 2],
        [1, 1, 2, 1],
        [1, 2, 1, 1],
        [2, 1, 1, 1],
        [1, 1, 0, 0],
        [1, 0, 1, 0],
        [0, 1, 1, 0],
        [1, 0, 0, 1],
        [0, 1, 0, 1],
        [0, 0, 1, 1],
    ]
    .into_iter()
    .filter_map(|a| Coord::try_from(a).ok())
    .collect()
});

/// A cell that would complete a line for `symbol`, if one exists.
///
/// Candidates are tried in lattice order, so ties resolve to the first
/// match deterministically.
pub fn find_winning_move(board: &Board, symbol: Symbol) -> Option<Coord> {
    board.empty_cells().into_iter().find(|&cell| {
        let mut probe = board.clone();
        probe.try_place(symbol, cell);
        rules::check_win(&probe, cell) == Some(symbol)
    })
}

/// A cell that would complete a line for some opponent of `me`, if one
/// exists.
///
/// Opponents are considered in first-appearance board order and cells in
/// lattice order, keeping tie-breaks deterministic.
pub fn find_blocking_move(board: &Board, me: Symbol) -> Option<Coord> {
    let empty = board.empty_cells();
    for opponent in opponent_symbols(board, me) {
        for &cell in &empty {
            let mut probe = board.clone();
            probe.try_place(opponent, cell);
            if rules::check_win(&probe, cell) == Some(opponent) {
                return Some(cell);
            }
        }
    }
    None
}

/// Distinct symbols other than `me` currently on the board, in
/// first-appearance lattice order.
pub fn opponent_symbols(board: &Board, me: Symbol) -> Vec<Symbol> {
    let mut symbols = Vec::new();
    for cell in Coord::all() {
        if let Some(s) = board.get(cell)
            && s != me
            && !symbols.contains(&s)
        {
            symbols.push(s);
        }
    }
    symbols
}

/// Positional fallback shared by [`Heuristic`] and [`Learned`]: a random
/// available center cell, else a random empty cell.
///
/// Sharing this tail (including its RNG draw pattern) keeps an
/// empty-score [`Learned`] move-for-move identical to [`Heuristic`]
/// under equal seeds.
pub(crate) fn choose_positional(empty: &[Coord], rng: &mut SmallRng) -> Option<Coord> {
    let centers: Vec<Coord> = CENTER_CELLS
        .iter()
        .copied()
        .filter(|c| empty.contains(c))
        .collect();
    if let Some(&cell) = centers.choose(rng) {
        return Some(cell);
    }
    empty.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn coord(w: u8, x: u8, y: u8, z: u8) -> Coord {
        Coord::new(w, x, y, z).expect("valid coord")
    }

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).expect("valid symbol")
    }

    #[test]
    fn test_find_winning_move_completes_line() {
        let mut board = Board::new();
        board.try_place(sym("X"), coord(0, 1, 1, 1));
        board.try_place(sym("X"), coord(1, 1, 1, 1));
        assert_eq!(find_winning_move(&board, sym("X")), Some(coord(2, 1, 1, 1)));
        assert_eq!(find_winning_move(&board, sym("O")), None);
    }

    #[test]
    fn test_find_blocking_move_targets_opponent_threat() {
        let mut board = Board::new();
        board.try_place(sym("O"), coord(0, 0, 0, 0));
        board.try_place(sym("O"), coord(0, 0, 0, 1));
        assert_eq!(
            find_blocking_move(&board, sym("X")),
            Some(coord(0, 0, 0, 2))
        );
        // O itself has nothing to block.
        assert_eq!(find_blocking_move(&board, sym("O")), None);
    }

    #[test]
    fn test_opponent_symbols_first_seen_order() {
        let mut board = Board::new();
        board.try_place(sym("B"), coord(0, 0, 0, 2));
        board.try_place(sym("A"), coord(1, 0, 0, 0));
        board.try_place(sym("X"), coord(0, 0, 0, 0));
        board.try_place(sym("A"), coord(2, 0, 0, 0));
        assert_eq!(
            opponent_symbols(&board, sym("X")),
            vec![sym("B"), sym("A")]
        );
    }

    #[test]
    fn test_choose_positional_prefers_centers() {
        let board = Board::new();
        let empty = board.empty_cells();
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..16 {
            let cell = choose_positional(&empty, &mut rng).expect("cell available");
            assert!(CENTER_CELLS.contains(&cell));
        }
    }

    #[test]
    fn test_choose_positional_falls_back_to_any_empty() {
        let mut board = Board::new();
        let filler = sym("F");
        for &c in CENTER_CELLS.iter() {
            board.try_place(filler, c);
        }
        let empty = board.empty_cells();
        let mut rng = SmallRng::seed_from_u64(3);
        let cell = choose_positional(&empty, &mut rng).expect("cell available");
        assert!(!CENTER_CELLS.contains(&cell));
        assert!(empty.contains(&cell));
    }
}
