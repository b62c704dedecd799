//! Baseline heuristic strategy: win, block, center, random.

use super::{Strategy, StrategyError, choose_positional, find_blocking_move, find_winning_move};
use crate::board::{Board, Coord, Symbol};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, instrument};

/// Heuristic automated player.
///
/// In order: take an immediate win, block any opponent's immediate win,
/// take a random available center cell, otherwise a random empty cell.
#[derive(Debug, Clone)]
pub struct Heuristic {
    rng: SmallRng,
}

impl Heuristic {
    /// Creates a heuristic strategy with an entropy-seeded RNG.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates a heuristic strategy with a fixed seed, for reproducible
    /// play.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for Heuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Heuristic {
    fn name(&self) -> &str {
        "heuristic"
    }

    #[instrument(skip(self, board), fields(symbol = %symbol))]
    fn choose(&mut self, board: &Board, symbol: Symbol) -> Result<Coord, StrategyError> {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return Err(StrategyError::BoardFull);
        }
        if let Some(cell) = find_winning_move(board, symbol) {
            debug!(cell = %cell, "Taking winning move");
            return Ok(cell);
        }
        if let Some(cell) = find_blocking_move(board, symbol) {
            debug!(cell = %cell, "Blocking opponent");
            return Ok(cell);
        }
        choose_positional(&empty, &mut self.rng).ok_or(StrategyError::BoardFull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(w: u8, x: u8, y: u8, z: u8) -> Coord {
        Coord::new(w, x, y, z).expect("valid coord")
    }

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).expect("valid symbol")
    }

    #[test]
    fn test_takes_winning_move_over_everything() {
        let mut board = Board::new();
        // X can win at (2,2,2,0); O also threatens elsewhere.
        board.try_place(sym("X"), coord(2, 2, 2, 1));
        board.try_place(sym("X"), coord(2, 2, 2, 2));
        board.try_place(sym("O"), coord(0, 0, 0, 0));
        board.try_place(sym("O"), coord(0, 0, 0, 1));
        let mut strategy = Heuristic::seeded(0);
        assert_eq!(
            strategy.choose(&board, sym("X")).expect("move"),
            coord(2, 2, 2, 0)
        );
    }

    #[test]
    fn test_blocks_when_no_win_available() {
        let mut board = Board::new();
        board.try_place(sym("O"), coord(1, 0, 0, 0));
        board.try_place(sym("O"), coord(1, 0, 0, 1));
        let mut strategy = Heuristic::seeded(0);
        assert_eq!(
            strategy.choose(&board, sym("X")).expect("move"),
            coord(1, 0, 0, 2)
        );
    }

    #[test]
    fn test_errors_on_full_board() {
        let mut board = Board::new();
        // Fill with alternating symbols.
        for (i, c) in Coord::all().enumerate() {
            let s = if i % 2 == 0 { sym("X") } else { sym("O") };
            board.set(c, Some(s));
        }
        let mut strategy = Heuristic::seeded(0);
        assert_eq!(
            strategy.choose(&board, sym("X")),
            Err(StrategyError::BoardFull)
        );
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let board = Board::new();
        let mut a = Heuristic::seeded(42);
        let mut b = Heuristic::seeded(42);
        for _ in 0..8 {
            assert_eq!(
                a.choose(&board, sym("X")).expect("move"),
                b.choose(&board, sym("X")).expect("move")
            );
        }
    }
}
