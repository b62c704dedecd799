//! 4D tic-tac-toe engine - turn-based multiplayer strategy on a hypercube
//!
//! This library implements the game engine and decision-making subsystem
//! for tic-tac-toe on a 3×3×3×3 board (81 cells), shared by 4-5
//! simultaneous players.
//!
//! # Architecture
//!
//! - **Board**: 81-cell container addressed by 4-axis [`Coord`]inates
//! - **LineIndex**: the 272 winning lines, built once per process with a
//!   reverse index from cell to lines
//! - **Rules**: fast-path and exhaustive win detection, draw detection
//! - **Game**: the Waiting → Playing → Finished state machine with a
//!   4-5 player round-robin roster
//! - **Strategy**: pluggable automated players ([`Heuristic`],
//!   [`Minimax`], [`Learned`]) behind one trait
//!
//! Network transport, persistence and rendering are external concerns;
//! orchestration layers consume [`GameSnapshot`] and drive strategies
//! from [`Game::board_snapshot`].
//!
//! # Example
//!
//! ```
//! use tesseract_toe::{Coord, Game, Heuristic, Strategy, Symbol};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut game = Game::new();
//! for (id, mark) in [("p1", "X"), ("p2", "O"), ("p3", "A"), ("p4", "B")] {
//!     game.add_player(id, id, Symbol::new(mark)?, true)?;
//! }
//! game.start()?;
//!
//! let mut bot = Heuristic::new();
//! while !game.is_over() {
//!     let current = game.current_player().expect("game is playing").clone();
//!     let cell = bot.choose(&game.board_snapshot(), current.symbol)?;
//!     game.make_move(&current.id, cell)?;
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod game;
mod lines;
pub mod rules;
pub mod strategy;
pub mod training;

// Crate-level exports - board types
pub use board::{Board, CELL_COUNT, Coord, CoordError, SIZE, Symbol, SymbolError};

// Crate-level exports - winning-line table
pub use lines::{LINE_COUNT, LineIndex};

// Crate-level exports - game state machine
pub use game::{
    Game, GameSnapshot, JoinError, MAX_PLAYERS, MIN_PLAYERS, MoveError, MoveRecord, Phase, Player,
    PlayerId, StartError,
};

// Crate-level exports - strategies
pub use strategy::{Heuristic, Learned, Minimax, Strategy, StrategyError};

// Crate-level exports - training data
pub use training::{MoveScores, TrainingError, TrainingGame, TrainingMove};
