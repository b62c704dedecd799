//! Integration tests for the game engine: board, line table, win
//! detection and the full game lifecycle.

use tesseract_toe::{
    Board, CELL_COUNT, Coord, Game, JoinError, LINE_COUNT, LineIndex, MoveError, Phase, StartError,
    Symbol, rules,
};

fn coord(w: u8, x: u8, y: u8, z: u8) -> Coord {
    Coord::new(w, x, y, z).expect("valid coord")
}

fn sym(s: &str) -> Symbol {
    Symbol::new(s).expect("valid symbol")
}

/// Adds `count` players with ids p1.. and symbols X, O, A, B, C.
fn game_with_players(count: usize) -> Game {
    let mut game = Game::new();
    for (i, s) in ["X", "O", "A", "B", "C"].iter().take(count).enumerate() {
        game.add_player(format!("p{}", i + 1), format!("Player {}", i + 1), sym(s), false)
            .expect("join");
    }
    game
}

#[test]
fn test_line_index_is_fixed_and_deterministic() {
    assert_eq!(LineIndex::global().len(), LINE_COUNT);
    assert_eq!(LineIndex::build().len(), LINE_COUNT);
    assert_eq!(LineIndex::build().lines(), LineIndex::global().lines());
}

#[test]
fn test_board_copy_never_leaks_into_original() {
    let mut original = Board::new();
    original.try_place(sym("X"), coord(1, 1, 1, 1));
    let mut copy = original.clone();
    for c in copy.empty_cells() {
        copy.try_place(sym("O"), c);
    }
    assert_eq!(original.occupied_count(), 1);
    assert_eq!(copy.occupied_count(), CELL_COUNT);
}

#[test]
fn test_fast_and_exhaustive_checks_agree_over_a_played_game() {
    let mut game = game_with_players(4);
    game.start().expect("start");
    // Replay a few plies, comparing the fast path against the
    // exhaustive scan after every accepted move.
    let script = [
        coord(0, 1, 1, 1),
        coord(0, 0, 0, 0),
        coord(2, 0, 0, 0),
        coord(0, 2, 0, 2),
        coord(1, 1, 1, 1),
        coord(0, 0, 1, 0),
        coord(2, 2, 0, 0),
        coord(2, 0, 2, 0),
        coord(2, 1, 1, 1),
    ];
    for cell in script {
        let mover = game.current_player().expect("playing").id.clone();
        game.make_move(&mover, cell).expect("scripted move");
        let board = game.board_snapshot();
        assert_eq!(
            rules::check_win(&board, cell),
            rules::check_win_exhaustive(&board)
        );
    }
}

#[test]
fn test_start_boundaries() {
    let mut too_few = game_with_players(3);
    assert_eq!(too_few.start(), Err(StartError::NotEnoughPlayers(3)));

    let mut four = game_with_players(4);
    four.start().expect("start with 4");
    assert_eq!(four.phase(), Phase::Playing);

    let mut five = game_with_players(5);
    five.start().expect("start with 5");
    assert_eq!(five.phase(), Phase::Playing);
}

#[test]
fn test_duplicate_symbol_rejected_at_admission() {
    let mut game = game_with_players(4);
    assert_eq!(
        game.add_player("p9", "Imposter", sym("X"), false),
        Err(JoinError::DuplicateSymbol(sym("X")))
    );
}

#[test]
fn test_x_wins_along_w_axis() {
    let mut game = game_with_players(4);
    game.start().expect("start");

    let moves = [
        ("p1", coord(0, 1, 1, 1)),
        ("p2", coord(0, 0, 0, 0)),
        ("p3", coord(2, 0, 0, 0)),
        ("p4", coord(0, 2, 0, 2)),
        ("p1", coord(1, 1, 1, 1)),
        ("p2", coord(0, 0, 1, 0)),
        ("p3", coord(2, 2, 0, 0)),
        ("p4", coord(2, 0, 2, 0)),
        ("p1", coord(2, 1, 1, 1)),
    ];
    for (id, cell) in moves {
        game.make_move(id, cell).expect("scripted move");
    }

    assert_eq!(game.phase(), Phase::Finished);
    let winner = game.winner().expect("X won");
    assert_eq!(winner.id, "p1");
    assert_eq!(winner.symbol, sym("X"));
    let mut line = *game.winning_line().expect("winning line recorded");
    line.sort_unstable_by_key(Coord::index);
    assert_eq!(
        line,
        [coord(0, 1, 1, 1), coord(1, 1, 1, 1), coord(2, 1, 1, 1)]
    );

    // Terminal games accept no further moves.
    assert_eq!(
        game.make_move("p2", coord(2, 2, 2, 2)),
        Err(MoveError::NotPlaying)
    );

    let snap = game.snapshot();
    assert_eq!(snap.phase, Phase::Finished);
    assert_eq!(snap.winner.as_deref(), Some("p1"));
    assert!(!snap.is_draw);
    assert_eq!(snap.move_count, 9);
}

/// An 81-move ordering whose round-robin 4-coloring completes no line:
/// playing it out must fill the board and end in a draw.
const DRAW_ORDER: [[u8; 4]; 81] = [
    [0, 0, 1, 1], [0, 0, 0, 0], [0, 0, 0, 1], [0, 0, 1, 0],
    [0, 0, 2, 0], [0, 0, 1, 2], [0, 0, 0, 2], [0, 0, 2, 1],
    [0, 1, 1, 1], [0, 0, 2, 2], [0, 1, 0, 0], [0, 1, 0, 1],
    [1, 0, 0, 1], [0, 1, 0, 2], [0, 1, 2, 2], [0, 1, 1, 2],
    [1, 0, 1, 1], [0, 1, 1, 0], [0, 2, 0, 1], [0, 1, 2, 0],
    [1, 0, 1, 2], [0, 2, 1, 1], [0, 2, 0, 2], [0, 1, 2, 1],
    [1, 1, 0, 1], [0, 2, 2, 1], [0, 2, 1, 0], [0, 2, 0, 0],
    [1, 1, 0, 2], [1, 0, 1, 0], [0, 2, 2, 2], [0, 2, 1, 2],
    [1, 1, 1, 2], [1, 0, 2, 0], [1, 0, 0, 0], [0, 2, 2, 0],
    [1, 2, 1, 1], [1, 0, 2, 1], [1, 0, 0, 2], [1, 0, 2, 2],
    [1, 2, 2, 1], [1, 1, 1, 1], [1, 1, 0, 0], [1, 1, 1, 0],
    [2, 0, 0, 0], [1, 1, 2, 0], [1, 1, 2, 2], [1, 1, 2, 1],
    [2, 0, 1, 2], [2, 0, 2, 1], [1, 2, 0, 2], [1, 2, 0, 0],
    [2, 0, 2, 0], [2, 0, 2, 2], [1, 2, 1, 0], [1, 2, 0, 1],
    [2, 1, 0, 0], [2, 1, 0, 1], [1, 2, 2, 0], [1, 2, 1, 2],
    [2, 1, 0, 2], [2, 1, 1, 1], [1, 2, 2, 2], [2, 0, 0, 1],
    [2, 1, 1, 2], [2, 1, 2, 2], [2, 1, 1, 0], [2, 0, 0, 2],
    [2, 1, 2, 0], [2, 2, 0, 2], [2, 1, 2, 1], [2, 0, 1, 0],
    [2, 2, 0, 1], [2, 2, 2, 0], [2, 2, 0, 0], [2, 0, 1, 1],
    [2, 2, 1, 0], [2, 2, 2, 1], [2, 2, 1, 2], [2, 2, 2, 2],
    [2, 2, 1, 1],
];

#[test]
fn test_full_board_with_no_line_is_a_draw() {
    let mut game = game_with_players(4);
    game.start().expect("start");

    for (seq, axes) in DRAW_ORDER.iter().enumerate() {
        let cell = Coord::try_from(*axes).expect("valid coord");
        let mover = game.current_player().expect("still playing").id.clone();
        game.make_move(&mover, cell).expect("draw-script move");
        if seq < DRAW_ORDER.len() - 1 {
            assert_eq!(game.phase(), Phase::Playing, "premature finish at move {seq}");
        }
    }

    assert_eq!(game.phase(), Phase::Finished);
    assert!(game.winner().is_none());
    assert!(game.is_draw());
    assert_eq!(game.history().len(), CELL_COUNT);
    assert!(game.board().is_full());

    let snap = game.snapshot();
    assert!(snap.is_draw);
    assert!(snap.winner.is_none());
    assert!(snap.winning_line.is_none());
}

#[test]
fn test_history_replays_to_identical_board() {
    let mut game = game_with_players(4);
    game.start().expect("start");
    for axes in DRAW_ORDER.iter().take(20) {
        let cell = Coord::try_from(*axes).expect("valid coord");
        let mover = game.current_player().expect("playing").id.clone();
        game.make_move(&mover, cell).expect("move");
    }

    let mut replay = Board::new();
    for record in game.history() {
        assert!(replay.try_place(record.symbol, record.coord));
    }
    assert_eq!(&replay, game.board());
}
