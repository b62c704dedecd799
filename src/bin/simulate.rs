//! Bot-vs-bot simulation and training-log collection.
//!
//! Runs batches of automated games, reports per-player results, and can
//! write a training log consumable by the learned strategy.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tesseract_toe::{
    Coord, Game, Heuristic, Learned, MAX_PLAYERS, MIN_PLAYERS, Minimax, MoveScores, Strategy,
    Symbol, TrainingGame, TrainingMove,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Reward assigned to each of the winner's moves.
const WIN_REWARD: f64 = 1.0;

/// Reward assigned to each losing player's moves.
const LOSS_REWARD: f64 = -0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
enum StrategyKind {
    /// Win-block-center-random heuristic.
    Heuristic,
    /// Depth-limited minimax with pruning.
    Minimax,
    /// Statistics-driven (requires --training-data for real scores).
    Learned,
}

#[derive(Debug, Parser)]
#[command(about = "Run bot-vs-bot 4D tic-tac-toe games")]
struct Args {
    /// Number of games to simulate.
    #[arg(long, default_value_t = 100)]
    games: usize,

    /// Strategy lineup, one per player (4-5 entries).
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "heuristic,heuristic,minimax,heuristic"
    )]
    players: Vec<StrategyKind>,

    /// Search depth for minimax players.
    #[arg(long, default_value_t = 2)]
    depth: u32,

    /// RNG seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Existing training log to feed learned players.
    #[arg(long)]
    training_data: Option<PathBuf>,

    /// Write the simulated games as a training log to this path.
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Symbols assigned to the lineup in join order.
const SYMBOLS: [&str; MAX_PLAYERS] = ["X", "O", "A", "B", "C"];

fn build_strategy(kind: StrategyKind, args: &Args, seed: u64) -> Box<dyn Strategy> {
    match kind {
        StrategyKind::Heuristic => Box::new(Heuristic::seeded(seed)),
        StrategyKind::Minimax => Box::new(Minimax::with_depth(args.depth)),
        StrategyKind::Learned => {
            let scores = match &args.training_data {
                Some(path) => Learned::from_log(path).scores().clone(),
                None => MoveScores::default(),
            };
            Box::new(Learned::seeded(scores, seed))
        }
    }
}

fn play_one_game(args: &Args, rng: &mut SmallRng) -> Result<(Option<usize>, TrainingGame)> {
    let mut game = Game::new();
    let mut bots: HashMap<String, Box<dyn Strategy>> = HashMap::new();
    for (i, &kind) in args.players.iter().enumerate() {
        let id = format!("bot-{}", i + 1);
        let symbol = Symbol::new(SYMBOLS[i]).context("lineup symbol")?;
        game.add_player(id.clone(), format!("{kind}-{}", i + 1), symbol, true)?;
        bots.insert(id, build_strategy(kind, args, rng.r#gen()));
    }
    game.start()?;

    let mut moves: Vec<(String, Coord, Symbol)> = Vec::new();
    while !game.is_over() {
        let current = game.current_player().context("game is playing")?.clone();
        let bot = bots.get_mut(&current.id).context("bot for current player")?;
        let cell = bot.choose(&game.board_snapshot(), current.symbol)?;
        game.make_move(&current.id, cell)?;
        moves.push((current.id, cell, current.symbol));
    }

    let winner_id = game.winner().map(|p| p.id.clone());
    let winner_index = game
        .winner()
        .and_then(|w| game.players().iter().position(|p| p.id == w.id));
    let record = TrainingGame {
        winner: winner_id.clone(),
        is_draw: game.is_draw(),
        moves: moves
            .into_iter()
            .map(|(player_id, coord, symbol)| TrainingMove {
                coord,
                symbol,
                reward: match &winner_id {
                    Some(w) if *w == player_id => WIN_REWARD,
                    Some(_) => LOSS_REWARD,
                    None => 0.0,
                },
            })
            .collect(),
    };
    debug!(
        winner = ?winner_id,
        moves = record.moves.len(),
        "Game finished"
    );
    Ok((winner_index, record))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&args.players.len()) {
        bail!(
            "lineup must have {MIN_PLAYERS}-{MAX_PLAYERS} players, got {}",
            args.players.len()
        );
    }

    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    info!(games = args.games, lineup = ?args.players, "Starting simulation");
    let mut wins = vec![0usize; args.players.len()];
    let mut draws = 0usize;
    let mut total_moves = 0usize;
    let mut log: Vec<TrainingGame> = Vec::with_capacity(args.games);

    for n in 0..args.games {
        let (winner_index, record) = play_one_game(&args, &mut rng)
            .with_context(|| format!("simulating game {}", n + 1))?;
        match winner_index {
            Some(i) => wins[i] += 1,
            None => draws += 1,
        }
        total_moves += record.moves.len();
        log.push(record);
        if (n + 1) % 50 == 0 {
            info!(completed = n + 1, "Progress");
        }
    }

    println!("Simulated {} games:", args.games);
    for (i, kind) in args.players.iter().enumerate() {
        println!(
            "  bot-{} ({kind}, {}): {} wins",
            i + 1,
            SYMBOLS[i],
            wins[i]
        );
    }
    println!("  draws: {draws}");
    if args.games > 0 {
        println!("  average game length: {:.1} moves", total_moves as f64 / args.games as f64);
    }

    if let Some(path) = &args.out {
        let file = File::create(path)
            .with_context(|| format!("creating training log {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &log)
            .context("writing training log")?;
        info!(path = %path.display(), games = log.len(), "Wrote training log");
    }

    Ok(())
}
