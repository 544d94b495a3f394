//! Engine facade tying rules, strategies and search together
//!
//! The host hands the engine a board, a difficulty, the side to move and
//! the active rule flags. The engine picks the strategy for that
//! difficulty and reports which stage of it produced the move.
//!
//! # Example
//!
//! ```
//! use bounceline::{Board, Difficulty, Engine, Player, Pos, RuleConfig};
//!
//! let mut engine = Engine::with_seed(7);
//! let board = Board::standard();
//!
//! let mv = engine.get_move(&board, Difficulty::Extra, Player::A, RuleConfig::STRAIGHT);
//! assert_eq!(mv, Some(Pos::new(3, 3)));
//! ```

use std::time::Instant;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Player, Pos};
use crate::config::EngineConfig;
use crate::rules::{self, GameStatus, RuleConfig};
use crate::search::SearchResult;
use crate::strategy::{random_move, Difficulty, Strategy};

/// Stage of a strategy that produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Uniformly random empty cell
    Random,
    /// Opening book
    Opening,
    /// Move completes a winning line
    ImmediateWin,
    /// Move takes the opponent's winning cell
    Block,
    /// Move creates two or more threats at once
    ThreatAttack,
    /// Move takes the opponent's double-threat cell
    ThreatBlock,
    /// Empty center taken before searching
    Center,
    /// Shallow heuristic scoring
    Heuristic,
    /// Alpha-beta search result
    AlphaBeta,
    /// The board is full
    NoMove,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Best move found; `None` only on a full board
    pub best_move: Option<Pos>,
    /// Score reported by the stage that chose the move
    pub score: i32,
    /// Stage that found this move
    pub search_type: SearchType,
    /// Deepest completed search, 0 when no search ran
    pub depth: u8,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    /// Result for a move that needed no search
    #[inline]
    pub(crate) fn found(pos: Pos, score: i32, search_type: SearchType) -> Self {
        Self {
            best_move: Some(pos),
            score,
            search_type,
            depth: 0,
            time_ms: 0,
            nodes: 0,
        }
    }

    #[inline]
    pub(crate) fn no_move() -> Self {
        Self {
            best_move: None,
            score: 0,
            search_type: SearchType::NoMove,
            depth: 0,
            time_ms: 0,
            nodes: 0,
        }
    }

    /// Create a result from alpha-beta search
    #[inline]
    pub(crate) fn from_search(result: SearchResult) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type: SearchType::AlphaBeta,
            depth: result.depth,
            time_ms: 0,
            nodes: result.nodes,
        }
    }
}

/// Move-selection engine.
///
/// Holds the configuration and the random source; `R` defaults to
/// `StdRng`, and `with_seed` makes every tier deterministic.
#[derive(Debug, Clone)]
pub struct Engine<R = StdRng> {
    config: EngineConfig,
    rng: R,
}

impl Engine<StdRng> {
    /// Default configuration, entropy-seeded
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Default configuration with a fixed seed
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(EngineConfig::default(), StdRng::seed_from_u64(seed))
    }
}

impl Default for Engine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        Self { config, rng }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Choose a move for `player`.
    ///
    /// Returns `None` only when the board is full.
    pub fn get_move(
        &mut self,
        board: &Board,
        difficulty: Difficulty,
        player: Player,
        rules: RuleConfig,
    ) -> Option<Pos> {
        self.get_move_with_stats(board, difficulty, player, rules).best_move
    }

    /// Choose a move for `player` and report how it was found.
    pub fn get_move_with_stats(
        &mut self,
        board: &Board,
        difficulty: Difficulty,
        player: Player,
        rules: RuleConfig,
    ) -> MoveResult {
        if board.is_full() {
            return MoveResult::no_move();
        }

        let start = Instant::now();
        let strategy = Strategy::for_difficulty(difficulty, &self.config.search);
        let mut result = strategy.select_move(board, player, rules, &self.config, &mut self.rng);

        if result.best_move.is_none() {
            // Every tier must answer on a non-full board
            result = random_move(board, &mut self.rng)
                .map_or_else(MoveResult::no_move, |pos| {
                    MoveResult::found(pos, 0, SearchType::Random)
                });
        }
        result.time_ms = start.elapsed().as_millis() as u64;

        debug!(
            "{difficulty} {player:?}: {:?} via {:?} (depth {}, {} nodes, {}ms)",
            result.best_move, result.search_type, result.depth, result.nodes, result.time_ms
        );
        result
    }

    /// Status of a line-variant game under this engine's win length.
    #[must_use]
    pub fn check_game_status(&self, board: &Board, rules: RuleConfig) -> GameStatus {
        rules::check_game_status(board, rules, self.config.win_length)
    }

    /// Status of a path-variant game.
    #[must_use]
    pub fn check_path_status(&self, board: &Board) -> GameStatus {
        rules::check_path_status(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(diagram: &str) -> Board {
        Board::parse(diagram).unwrap()
    }

    #[test]
    fn test_engine_empty_board_extra() {
        let mut engine = Engine::with_seed(1);
        let result = engine.get_move_with_stats(
            &Board::standard(),
            Difficulty::Extra,
            Player::A,
            RuleConfig::STRAIGHT,
        );
        assert_eq!(result.best_move, Some(Pos::new(3, 3)));
        assert_eq!(result.search_type, SearchType::Center);
    }

    #[test]
    fn test_engine_full_board_has_no_move() {
        let full = board(
            "XXOOXX
             OOXXOO
             XXOOXX
             OOXXOO
             XXOOXX
             OOXXOO",
        );
        let mut engine = Engine::with_seed(1);
        for difficulty in Difficulty::ALL {
            let result =
                engine.get_move_with_stats(&full, difficulty, Player::A, RuleConfig::STRAIGHT);
            assert_eq!(result.best_move, None);
            assert_eq!(result.search_type, SearchType::NoMove);
        }
    }

    #[test]
    fn test_engine_every_tier_answers() {
        let b = board(
            "X.O...
             .X....
             ..O...
             ......
             ......
             ......",
        );
        let mut engine = Engine::with_seed(3);
        for difficulty in Difficulty::ALL {
            let mv = engine.get_move(&b, difficulty, Player::A, RuleConfig::new(true, true));
            let mv = mv.unwrap();
            assert!(b.is_empty(mv), "{difficulty} played on {mv}");
        }
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        let b = board(
            "......
             ......
             OXXXX.
             OO....
             O.....
             ......",
        );
        let mut engine = Engine::with_seed(5);
        for difficulty in [Difficulty::Hard, Difficulty::Extra, Difficulty::Advanced] {
            let result =
                engine.get_move_with_stats(&b, difficulty, Player::A, RuleConfig::STRAIGHT);
            assert_eq!(result.best_move, Some(Pos::new(2, 5)), "{difficulty}");
            assert_eq!(result.search_type, SearchType::ImmediateWin);
        }
    }

    #[test]
    fn test_engine_blocks_opponent_win() {
        let b = board(
            "......
             ......
             .OOOOX
             ...X..
             ..X...
             ......",
        );
        let mut engine = Engine::with_seed(5);
        for difficulty in [Difficulty::Hard, Difficulty::Extra, Difficulty::Advanced] {
            let result =
                engine.get_move_with_stats(&b, difficulty, Player::A, RuleConfig::STRAIGHT);
            assert_eq!(result.best_move, Some(Pos::new(2, 0)), "{difficulty}");
            assert_eq!(result.search_type, SearchType::Block);
        }
    }

    #[test]
    fn test_engine_seeded_is_deterministic() {
        let b = board(
            "......
             ..X...
             ...O..
             ......
             ......
             ......",
        );
        let mut first = Engine::with_seed(42);
        let mut second = Engine::with_seed(42);
        for difficulty in [Difficulty::Easy, Difficulty::Medium] {
            for _ in 0..5 {
                assert_eq!(
                    first.get_move(&b, difficulty, Player::B, RuleConfig::STRAIGHT),
                    second.get_move(&b, difficulty, Player::B, RuleConfig::STRAIGHT)
                );
            }
        }
    }

    #[test]
    fn test_engine_status_uses_win_length() {
        let engine = Engine::with_config(EngineConfig {
            win_length: 4,
            ..EngineConfig::default()
        });
        let b = board(
            "XXXX..
             ......
             ......
             ......
             ......
             ......",
        );
        let status = engine.check_game_status(&b, RuleConfig::STRAIGHT);
        assert_eq!(status.winner, Some(Player::A));
        assert!(!engine.check_path_status(&b).is_over);
    }
}
