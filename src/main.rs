//! Engine-vs-engine demo on the terminal

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use bounceline::{Board, Difficulty, Engine, EngineConfig, GameStatus, Player, RuleConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    /// Five in a row, optionally with bounce and missing teeth
    Line,
    /// Connect two opposite edges
    Path,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Watch two engines play each other", long_about = None)]
struct Args {
    /// Board size
    #[arg(long, default_value_t = bounceline::DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Difficulty for player X
    #[arg(long, default_value = "advanced")]
    first: String,

    /// Difficulty for player O
    #[arg(long, default_value = "extra")]
    second: String,

    #[arg(long, value_enum, default_value_t = Variant::Line)]
    variant: Variant,

    /// Let diagonal lines bounce off the edges
    #[arg(long)]
    bounce: bool,

    /// Reject lines with missing teeth
    #[arg(long)]
    missing_teeth: bool,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: usize,

    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with engine settings
    #[arg(long)]
    config: Option<PathBuf>,
}

struct Match {
    size: usize,
    players: [(Player, Difficulty); 2],
    variant: Variant,
    rules: RuleConfig,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let first: Difficulty = args.first.parse()?;
    let second: Difficulty = args.second.parse()?;
    let game = Match {
        size: args.size,
        players: [(Player::A, first), (Player::B, second)],
        variant: args.variant,
        rules: RuleConfig::new(args.bounce, args.missing_teeth),
    };

    match args.seed {
        Some(seed) => {
            let mut engine = Engine::with_rng(config, SmallRng::seed_from_u64(seed));
            play_series(&mut engine, &game, args.games)
        }
        None => {
            let mut engine = Engine::with_config(config);
            play_series(&mut engine, &game, args.games)
        }
    }
}

fn play_series<R: Rng>(engine: &mut Engine<R>, game: &Match, games: usize) -> Result<()> {
    let mut wins = [0usize; 2];
    let mut draws = 0;

    for n in 1..=games {
        let status = play_game(engine, game)?;
        match status.winner {
            Some(Player::A) => wins[0] += 1,
            Some(Player::B) => wins[1] += 1,
            None => draws += 1,
        }
        info!("game {n}: {}", describe(&status));
    }

    println!(
        "\n{} ({}) {} - {} {} ({}), {} drawn",
        Player::A.symbol(),
        game.players[0].1,
        wins[0],
        wins[1],
        Player::B.symbol(),
        game.players[1].1,
        draws
    );
    Ok(())
}

fn play_game<R: Rng>(engine: &mut Engine<R>, game: &Match) -> Result<GameStatus> {
    let mut board = Board::new(game.size)?;

    for turn in 0.. {
        let (player, difficulty) = game.players[turn % 2];
        let status = status_of(engine, &board, game);
        if status.is_over {
            println!("{board}");
            return Ok(status);
        }

        let result = engine.get_move_with_stats(&board, difficulty, player, game.rules);
        let pos = result
            .best_move
            .context("engine returned no move on a board with empty cells")?;
        board.place_at(pos, player);
        info!(
            "{} ({difficulty}) plays {pos} via {:?} in {}ms",
            player.symbol(),
            result.search_type,
            result.time_ms
        );
    }

    unreachable!("turn counter is unbounded")
}

fn status_of<R: Rng>(engine: &Engine<R>, board: &Board, game: &Match) -> GameStatus {
    match game.variant {
        Variant::Line => engine.check_game_status(board, game.rules),
        Variant::Path => engine.check_path_status(board),
    }
}

fn describe(status: &GameStatus) -> String {
    match status.winner {
        Some(player) => {
            let cells: Vec<String> = status.winning_cells.iter().map(ToString::to_string).collect();
            let bounces = match (status.bounce_index, status.second_bounce_index) {
                (Some(a), Some(b)) => format!(", bounces at {a} and {b}"),
                (Some(a), None) => format!(", bounce at {a}"),
                _ => String::new(),
            };
            format!("{} wins with {}{bounces}", player.symbol(), cells.join(" "))
        }
        None => "draw".to_string(),
    }
}
