//! Depth-limited minimax strategy with alpha-beta pruning.
//!
//! True N-player search is intractable on an 81-cell board, so all
//! opponents are folded into one adversarial block: at a minimizing
//! node every distinct opposing symbol on the board is tried at every
//! empty cell. A deliberate worst-case simplification of sequential
//! N-player turn order, not a bug.

use super::{Strategy, StrategyError, find_blocking_move, find_winning_move, opponent_symbols};
use crate::board::{Board, Coord, Symbol};
use crate::lines::LineIndex;
use crate::rules;
use tracing::{debug, instrument};

/// Value of a won (or lost, negated) position.
const WIN_SCORE: i32 = 1_000;

/// Per-symbol weight of an uncontested line in the static evaluation.
const LINE_WEIGHT: i32 = 10;

/// Default search depth in plies. The branching factor (up to 81 cells
/// crossed with every opponent symbol at minimizing nodes) makes deeper
/// defaults impractical.
pub const DEFAULT_DEPTH: u32 = 2;

/// Adversarial-search automated player.
#[derive(Debug, Clone)]
pub struct Minimax {
    depth: u32,
}

impl Minimax {
    /// Creates a minimax strategy at [`DEFAULT_DEPTH`].
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }

    /// Creates a minimax strategy searching `depth` plies (minimum 1).
    pub fn with_depth(depth: u32) -> Self {
        Self {
            depth: depth.max(1),
        }
    }

    /// The configured search depth.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    fn search(
        &self,
        board: &Board,
        depth: u32,
        maximizing: bool,
        me: Symbol,
        opponents: &[Symbol],
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        if depth == 0 {
            return evaluate(board, me);
        }
        // The last move is unknown inside the tree, so the win check is
        // exhaustive here.
        if let Some(winner) = rules::check_win_exhaustive(board) {
            return if winner == me { WIN_SCORE } else { -WIN_SCORE };
        }
        let empty = board.empty_cells();
        if empty.is_empty() {
            return 0;
        }

        if maximizing {
            let mut best = i32::MIN;
            for cell in empty {
                let mut next = board.clone();
                next.try_place(me, cell);
                if rules::check_win(&next, cell) == Some(me) {
                    return WIN_SCORE;
                }
                let score = self.search(&next, depth - 1, false, me, opponents, alpha, beta);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            if opponents.is_empty() {
                // No opposing symbol has appeared yet; nothing to
                // minimize over.
                return evaluate(board, me);
            }
            let mut worst = i32::MAX;
            'cells: for cell in empty {
                for &opponent in opponents {
                    let mut next = board.clone();
                    next.try_place(opponent, cell);
                    if rules::check_win(&next, cell) == Some(opponent) {
                        return -WIN_SCORE;
                    }
                    let score = self.search(&next, depth - 1, true, me, opponents, alpha, beta);
                    worst = worst.min(score);
                    beta = beta.min(score);
                    if beta <= alpha {
                        break 'cells;
                    }
                }
            }
            worst
        }
    }
}

impl Default for Minimax {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Minimax {
    fn name(&self) -> &str {
        "minimax"
    }

    #[instrument(skip(self, board), fields(symbol = %symbol, depth = self.depth))]
    fn choose(&mut self, board: &Board, symbol: Symbol) -> Result<Coord, StrategyError> {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return Err(StrategyError::BoardFull);
        }

        // Fast paths identical to the heuristic's, before any recursion.
        if let Some(cell) = find_winning_move(board, symbol) {
            debug!(cell = %cell, "Taking winning move");
            return Ok(cell);
        }
        if let Some(cell) = find_blocking_move(board, symbol) {
            debug!(cell = %cell, "Blocking opponent");
            return Ok(cell);
        }

        let opponents = opponent_symbols(board, symbol);
        let mut best: Option<(Coord, i32)> = None;
        for &cell in &empty {
            let mut next = board.clone();
            next.try_place(symbol, cell);
            let score = self.search(
                &next,
                self.depth - 1,
                false,
                symbol,
                &opponents,
                i32::MIN,
                i32::MAX,
            );
            // Strict improvement keeps the first-found cell on ties.
            if best.is_none_or(|(_, b)| score > b) {
                best = Some((cell, score));
            }
        }
        let (cell, score) = best.ok_or(StrategyError::BoardFull)?;
        debug!(cell = %cell, score, "Search complete");
        Ok(cell)
    }
}

/// Static evaluation at the depth cutoff.
///
/// Each line with only the acting symbol on it scores
/// `+LINE_WEIGHT x count`; each line with only opposing symbols scores
/// `-LINE_WEIGHT x count` (opponents counted as one block); contested
/// lines score 0.
fn evaluate(board: &Board, me: Symbol) -> i32 {
    let mut score = 0;
    for line in LineIndex::global().lines() {
        let mut mine = 0;
        let mut theirs = 0;
        for &cell in line {
            match board.get(cell) {
                Some(s) if s == me => mine += 1,
                Some(_) => theirs += 1,
                None => {}
            }
        }
        if mine > 0 && theirs == 0 {
            score += LINE_WEIGHT * mine;
        } else if theirs > 0 && mine == 0 {
            score -= LINE_WEIGHT * theirs;
        }
    }
    score
}
