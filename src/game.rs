//! Turn-based game state machine for 4D tic-tac-toe.
//!
//! A [`Game`] owns the board, the ordered 4-5 player roster, the turn
//! pointer and the move log. Lifecycle: players join while `Waiting`,
//! [`Game::start`] locks the roster and moves to `Playing`, and play
//! proceeds round-robin until a line completes or the board fills.

use crate::board::{Board, Coord, Symbol};
use crate::rules;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Minimum roster size for a playable game.
pub const MIN_PLAYERS: usize = 4;

/// Maximum roster size.
pub const MAX_PLAYERS: usize = 5;

/// Unique identifier for a player.
pub type PlayerId = String;

/// Phase of the game state machine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    /// Waiting for players to join.
    Waiting,
    /// Game in progress.
    Playing,
    /// Game completed (win or draw).
    Finished,
}

/// A player in the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player's unique ID.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Mark this player places on the board.
    pub symbol: Symbol,
    /// Whether moves come from a strategy rather than an external actor.
    pub is_bot: bool,
}

/// One accepted move, appended to the game's log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Who moved.
    pub player_id: PlayerId,
    /// The mark they placed.
    pub symbol: Symbol,
    /// Where they placed it.
    pub coord: Coord,
    /// Zero-based sequence number within the game.
    pub seq: usize,
}

/// Error joining a game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum JoinError {
    /// Players can only join before the game starts.
    #[display("players can only join while the game is waiting")]
    NotWaiting,
    /// The roster is already at the maximum size.
    #[display("roster is full ({MAX_PLAYERS} players)")]
    RosterFull,
    /// Another player already uses this symbol.
    #[display("symbol {_0} is already taken")]
    DuplicateSymbol(#[error(not(source))] Symbol),
}

/// Error starting a game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StartError {
    /// The game has already started or finished.
    #[display("game has already started")]
    NotWaiting,
    /// Fewer than [`MIN_PLAYERS`] players have joined.
    #[display("need at least {MIN_PLAYERS} players, have {_0}")]
    NotEnoughPlayers(#[error(not(source))] usize),
}

/// Error making a move.
///
/// Every variant leaves the game unchanged; the caller may retry with
/// different input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The game is not in the playing phase.
    #[display("game is not in progress")]
    NotPlaying,
    /// It is another player's turn.
    #[display("not {_0}'s turn")]
    NotYourTurn(#[error(not(source))] PlayerId),
    /// The cell is already occupied.
    #[display("cell {_0} is already occupied")]
    Occupied(#[error(not(source))] Coord),
}

/// Snapshot of game state for orchestration layers.
///
/// Carries everything an external layer needs to persist or render the
/// game without reaching into engine internals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Current phase.
    pub phase: Phase,
    /// All 81 cells in lattice order.
    pub board: Vec<Option<Symbol>>,
    /// The roster.
    pub players: Vec<Player>,
    /// Whose turn it is, when playing.
    pub current_player: Option<PlayerId>,
    /// Number of accepted moves.
    pub move_count: usize,
    /// Winner's ID, when finished with a win.
    pub winner: Option<PlayerId>,
    /// True when finished with no winner.
    pub is_draw: bool,
    /// The completed line, when finished with a win.
    pub winning_line: Option<[Coord; 3]>,
}

/// The turn-based game engine.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    phase: Phase,
    players: Vec<Player>,
    current: usize,
    history: Vec<MoveRecord>,
    winner: Option<usize>,
    winning_line: Option<[Coord; 3]>,
}

impl Game {
    /// Creates a new game waiting for players.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            phase: Phase::Waiting,
            players: Vec::new(),
            current: 0,
            history: Vec::new(),
            winner: None,
            winning_line: None,
        }
    }

    /// Adds a player to the roster.
    ///
    /// # Errors
    ///
    /// Fails when the game has started, the roster is full, or the
    /// symbol is already taken. Symbol length is validated by
    /// [`Symbol::new`].
    #[instrument(skip_all)]
    pub fn add_player(
        &mut self,
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        symbol: Symbol,
        is_bot: bool,
    ) -> Result<(), JoinError> {
        if self.phase != Phase::Waiting {
            return Err(JoinError::NotWaiting);
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(JoinError::RosterFull);
        }
        if self.players.iter().any(|p| p.symbol == symbol) {
            return Err(JoinError::DuplicateSymbol(symbol));
        }
        let player = Player {
            id: id.into(),
            name: name.into(),
            symbol,
            is_bot,
        };
        info!(player_id = %player.id, symbol = %player.symbol, "Player joined");
        self.players.push(player);
        Ok(())
    }

    /// Starts the game, locking the roster.
    ///
    /// Resets the board, move log and outcome, and gives the turn to the
    /// first player that joined.
    ///
    /// # Errors
    ///
    /// Fails when already started or when fewer than [`MIN_PLAYERS`]
    /// players have joined.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<(), StartError> {
        if self.phase != Phase::Waiting {
            return Err(StartError::NotWaiting);
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(StartError::NotEnoughPlayers(self.players.len()));
        }
        self.board = Board::new();
        self.history.clear();
        self.winner = None;
        self.winning_line = None;
        self.current = 0;
        self.phase = Phase::Playing;
        info!(players = self.players.len(), "Game started");
        Ok(())
    }

    /// Makes a move for `player_id` at `coord`.
    ///
    /// On success the move is logged, the win check runs on the placed
    /// cell, and the game either finishes (win or full-board draw) or
    /// the turn advances to the next player in join order.
    ///
    /// # Errors
    ///
    /// Rejects the move without changing state when the game is not
    /// playing, it is another player's turn, or the cell is occupied.
    #[instrument(skip(self), fields(coord = %coord))]
    pub fn make_move(&mut self, player_id: &str, coord: Coord) -> Result<(), MoveError> {
        if self.phase != Phase::Playing {
            return Err(MoveError::NotPlaying);
        }
        let mover = &self.players[self.current];
        if mover.id != player_id {
            return Err(MoveError::NotYourTurn(player_id.to_owned()));
        }
        let symbol = mover.symbol;
        if !self.board.try_place(symbol, coord) {
            return Err(MoveError::Occupied(coord));
        }
        self.history.push(MoveRecord {
            player_id: player_id.to_owned(),
            symbol,
            coord,
            seq: self.history.len(),
        });
        debug!(symbol = %symbol, "Move accepted");

        if let Some(winner_symbol) = rules::check_win(&self.board, coord) {
            self.winner = self.players.iter().position(|p| p.symbol == winner_symbol);
            self.winning_line = rules::winning_line(&self.board, winner_symbol);
            self.phase = Phase::Finished;
            info!(winner = %winner_symbol, moves = self.history.len(), "Game won");
        } else if rules::is_full(&self.board) {
            self.phase = Phase::Finished;
            info!(moves = self.history.len(), "Game drawn");
        } else {
            self.current = (self.current + 1) % self.players.len();
        }
        Ok(())
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The roster, in join (turn) order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The player whose turn it is, when playing.
    pub fn current_player(&self) -> Option<&Player> {
        (self.phase == Phase::Playing).then(|| &self.players[self.current])
    }

    /// Whether the game has finished.
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// The winning player, when finished with a win.
    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|idx| &self.players[idx])
    }

    /// True when the game finished with no winner.
    pub fn is_draw(&self) -> bool {
        self.phase == Phase::Finished && self.winner.is_none()
    }

    /// The completed line, when finished with a win.
    pub fn winning_line(&self) -> Option<&[Coord; 3]> {
        self.winning_line.as_ref()
    }

    /// The accepted-move log.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Read-only view of the live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// An independent copy of the board, for handing to strategies.
    pub fn board_snapshot(&self) -> Board {
        self.board.clone()
    }

    /// Full state snapshot for persistence or rendering.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            board: self.board.cells().to_vec(),
            players: self.players.clone(),
            current_player: self.current_player().map(|p| p.id.clone()),
            move_count: self.history.len(),
            winner: self.winner().map(|p| p.id.clone()),
            is_draw: self.is_draw(),
            winning_line: self.winning_line,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
