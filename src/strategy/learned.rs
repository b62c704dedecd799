//! Statistics-driven strategy informed by past games.

use super::{Strategy, StrategyError, choose_positional, find_blocking_move, find_winning_move};
use crate::board::{Board, Coord, Symbol};
use crate::training::MoveScores;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Candidates within this distance of the best score share the top spot.
const SCORE_TOLERANCE: f64 = 0.1;

/// Cells scoring below this are avoided when alternatives exist.
const AVOID_THRESHOLD: f64 = -0.3;

/// History-informed automated player.
///
/// Tactical moves (win, block) come first, exactly as in
/// [`Heuristic`](super::Heuristic). After that, empty cells are ranked
/// by their aggregated [`MoveScores`] value; with no usable score table
/// the strategy behaves exactly like the heuristic.
#[derive(Debug, Clone)]
pub struct Learned {
    scores: MoveScores,
    rng: SmallRng,
}

impl Learned {
    /// Creates a learned strategy over an aggregated score table.
    pub fn new(scores: MoveScores) -> Self {
        Self {
            scores,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates a learned strategy with a fixed RNG seed.
    pub fn seeded(scores: MoveScores, seed: u64) -> Self {
        Self {
            scores,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Creates a learned strategy from a JSON training log.
    ///
    /// A missing or malformed log is not an error: the strategy logs a
    /// warning and degrades to pure heuristic behavior.
    pub fn from_log(path: &Path) -> Self {
        let scores = match MoveScores::load(path) {
            Ok(scores) => scores,
            Err(err) => {
                warn!(%err, "Training log unavailable, falling back to heuristic behavior");
                MoveScores::default()
            }
        };
        Self::new(scores)
    }

    /// The aggregated score table.
    pub fn scores(&self) -> &MoveScores {
        &self.scores
    }

    /// Picks among the statistically best cells, or avoids the worst.
    ///
    /// Returns `None` when the score table offers no guidance, deferring
    /// to the positional fallback.
    fn choose_scored(&mut self, empty: &[Coord]) -> Option<Coord> {
        let mut scored: Vec<(Coord, f64)> =
            empty.iter().map(|&c| (c, self.scores.get(c))).collect();
        // Stable sort keeps lattice order among equal scores.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        let (_, best) = *scored.first()?;

        if best > 0.0 {
            let top: Vec<Coord> = scored
                .iter()
                .take_while(|(_, s)| *s >= best - SCORE_TOLERANCE)
                .map(|&(c, _)| c)
                .collect();
            return top.choose(&mut self.rng).copied();
        }

        let keep: Vec<Coord> = scored
            .iter()
            .filter(|(_, s)| *s >= AVOID_THRESHOLD)
            .map(|&(c, _)| c)
            .collect();
        if !keep.is_empty() && keep.len() < empty.len() {
            // Everything left is mediocre; stay within the top third.
            let cut = keep.len().div_ceil(3);
            return keep[..cut].choose(&mut self.rng).copied();
        }
        None
    }
}

impl Strategy for Learned {
    fn name(&self) -> &str {
        "learned"
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
        if !self.scores.is_empty()
            && let Some(cell) = self.choose_scored(&empty)
        {
            debug!(cell = %cell, score = self.scores.get(cell), "Taking scored move");
            return Ok(cell);
        }
        choose_positional(&empty, &mut self.rng).ok_or(StrategyError::BoardFull)
    }
}
