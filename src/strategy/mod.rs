//! Difficulty tiers and the strategies behind them
//!
//! - Easy: a random empty cell
//! - Medium: a depth-1 heuristic move some of the time, otherwise random
//! - Hard: a depth-2 heuristic move
//! - Extra: fixed-depth minimax
//! - Advanced: opening book, tactics, then iterative deepening under a
//!   time budget

pub mod heuristic;
pub mod opening;
pub mod random;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Player};
use crate::config::{EngineConfig, SearchConfig};
use crate::engine::{MoveResult, SearchType};
use crate::error::ConfigError;
use crate::eval::find_advanced_threat_move;
use crate::rules::{find_winning_move, RuleConfig};
use crate::search::{minimax_decision, phase_depth, SearchLimits, Searcher, WIN_SCORE};

pub use heuristic::heuristic_move;
pub use opening::opening_move;
pub use random::random_move;

/// Difficulty tag chosen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extra,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Extra,
        Difficulty::Advanced,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Extra => "extra",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| ConfigError::UnknownDifficulty(s.to_string()))
    }
}

/// Move-selection strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    Random,
    /// Heuristic move with the given probability, random otherwise
    Mixed { probability: f64 },
    Heuristic { depth: u8 },
    Minimax,
    Advanced,
}

impl Strategy {
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty, search: &SearchConfig) -> Self {
        match difficulty {
            Difficulty::Easy => Strategy::Random,
            Difficulty::Medium => Strategy::Mixed {
                probability: search.heuristic_probability,
            },
            Difficulty::Hard => Strategy::Heuristic { depth: 2 },
            Difficulty::Extra => Strategy::Minimax,
            Difficulty::Advanced => Strategy::Advanced,
        }
    }

    /// Pick a move for `player`. `best_move` is `None` only when no empty
    /// cell remains.
    pub fn select_move<R: Rng + ?Sized>(
        &self,
        board: &Board,
        player: Player,
        rules: RuleConfig,
        config: &EngineConfig,
        rng: &mut R,
    ) -> MoveResult {
        match *self {
            Strategy::Random => random_result(board, rng),
            Strategy::Mixed { probability } => {
                // NaN counts as never
                let probability = if probability.is_nan() {
                    0.0
                } else {
                    probability.clamp(0.0, 1.0)
                };
                if rng.gen_bool(probability) {
                    shallow(board, player, rules, config, 1)
                } else {
                    random_result(board, rng)
                }
            }
            Strategy::Heuristic { depth } => shallow(board, player, rules, config, depth),
            Strategy::Minimax => minimax_decision(board, player, rules, config),
            Strategy::Advanced => advanced(board, player, rules, config, rng),
        }
    }
}

fn random_result<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> MoveResult {
    random_move(board, rng).map_or_else(MoveResult::no_move, |pos| {
        MoveResult::found(pos, 0, SearchType::Random)
    })
}

/// Immediate win, then immediate block
fn tactical(
    board: &Board,
    player: Player,
    rules: RuleConfig,
    win_length: usize,
) -> Option<MoveResult> {
    if let Some(pos) = find_winning_move(board, player, rules, win_length) {
        return Some(MoveResult::found(pos, WIN_SCORE, SearchType::ImmediateWin));
    }
    find_winning_move(board, player.opponent(), rules, win_length)
        .map(|pos| MoveResult::found(pos, 0, SearchType::Block))
}

fn shallow(
    board: &Board,
    player: Player,
    rules: RuleConfig,
    config: &EngineConfig,
    depth: u8,
) -> MoveResult {
    if let Some(result) = tactical(board, player, rules, config.win_length) {
        return result;
    }
    heuristic_move(board, player, rules, config, depth).map_or_else(
        MoveResult::no_move,
        |(pos, score)| MoveResult {
            depth,
            ..MoveResult::found(pos, score, SearchType::Heuristic)
        },
    )
}

fn advanced<R: Rng + ?Sized>(
    board: &Board,
    player: Player,
    rules: RuleConfig,
    config: &EngineConfig,
    rng: &mut R,
) -> MoveResult {
    let win_length = config.win_length;

    if board.stone_count() < config.search.opening_plies {
        if let Some(pos) = opening_move(board, player, rng) {
            return MoveResult::found(pos, 0, SearchType::Opening);
        }
    }
    if let Some(result) = tactical(board, player, rules, win_length) {
        return result;
    }
    if let Some(pos) = find_advanced_threat_move(board, player, win_length) {
        return MoveResult::found(pos, 0, SearchType::ThreatAttack);
    }
    if let Some(pos) = find_advanced_threat_move(board, player.opponent(), win_length) {
        return MoveResult::found(pos, 0, SearchType::ThreatBlock);
    }

    let depth = phase_depth(board, rules, &config.search);
    let limits = SearchLimits::depth(depth)
        .with_time_limit(config.search.time_limit_ms.map(Duration::from_millis));
    debug!("advanced: searching to depth {depth}, limit {:?}", limits.time_limit);

    let result = Searcher::new(config, rules, player).search_iterative(board, limits);
    MoveResult::from_search(result)
}
