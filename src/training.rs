//! Training-log records and move-score aggregation.
//!
//! A training log is a finite collection of past games, each recording
//! per-move the coordinate played, the acting symbol, and a signed
//! reward reflecting that side's eventual outcome (win +1.0, loss -0.5,
//! draw or unfinished 0.0). [`MoveScores`] reduces a log to a score per
//! coordinate in `[-1, 1]` for the [`Learned`](crate::strategy::Learned)
//! strategy.

use crate::board::{Coord, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// One move within a recorded game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMove {
    /// The coordinate played.
    #[serde(rename = "move")]
    pub coord: Coord,
    /// The symbol that played it.
    pub symbol: Symbol,
    /// Signed outcome attribution for this move's side.
    #[serde(default)]
    pub reward: f64,
}

/// One recorded game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingGame {
    /// ID of the winning player, when there was one.
    #[serde(default)]
    pub winner: Option<String>,
    /// True when the game ended with a full board and no winner.
    #[serde(default)]
    pub is_draw: bool,
    /// The game's moves, in play order.
    pub moves: Vec<TrainingMove>,
}

/// Error loading a training log.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TrainingError {
    /// The log file could not be read.
    #[display("failed to read training log {}: {source}", path.display())]
    Io {
        /// Path that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The log file was not valid JSON of the expected shape.
    #[display("malformed training log {}: {source}", path.display())]
    Parse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Per-coordinate statistics aggregated from a training log.
///
/// For every coordinate ever played,
/// `score = (wins - losses) / occurrences`, in `[-1, 1]`. Coordinates
/// never observed score 0.
#[derive(Debug, Clone, Default)]
pub struct MoveScores {
    scores: HashMap<Coord, f64>,
    games: usize,
    moves: usize,
}

impl MoveScores {
    /// Aggregates scores from recorded games.
    #[instrument(skip(games))]
    pub fn from_games(games: &[TrainingGame]) -> Self {
        let mut wins: HashMap<Coord, u32> = HashMap::new();
        let mut losses: HashMap<Coord, u32> = HashMap::new();
        let mut totals: HashMap<Coord, u32> = HashMap::new();
        let mut moves = 0usize;

        for game in games {
            for mv in &game.moves {
                moves += 1;
                *totals.entry(mv.coord).or_default() += 1;
                if mv.reward > 0.0 {
                    *wins.entry(mv.coord).or_default() += 1;
                } else if mv.reward < 0.0 {
                    *losses.entry(mv.coord).or_default() += 1;
                }
            }
        }

        let scores = totals
            .iter()
            .map(|(&coord, &total)| {
                let w = wins.get(&coord).copied().unwrap_or(0) as f64;
                let l = losses.get(&coord).copied().unwrap_or(0) as f64;
                (coord, (w - l) / total as f64)
            })
            .collect();

        debug!(
            games = games.len(),
            moves,
            positions = totals.len(),
            "Aggregated move scores"
        );
        Self {
            scores,
            games: games.len(),
            moves,
        }
    }

    /// Loads and aggregates a JSON training log.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError`] when the file cannot be read or parsed.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, TrainingError> {
        let file = File::open(path).map_err(|source| TrainingError::Io {
            path: path.to_owned(),
            source,
        })?;
        let games: Vec<TrainingGame> =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                TrainingError::Parse {
                    path: path.to_owned(),
                    source,
                }
            })?;
        Ok(Self::from_games(&games))
    }

    /// The score for `coord`; 0 when never observed.
    pub fn get(&self, coord: Coord) -> f64 {
        self.scores.get(&coord).copied().unwrap_or(0.0)
    }

    /// Number of distinct coordinates with a score.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// True when no moves were observed.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Number of games aggregated.
    pub fn game_count(&self) -> usize {
        self.games
    }

    /// Number of moves aggregated.
    pub fn move_count(&self) -> usize {
        self.moves
    }
}
