//! Minimax search with alpha-beta pruning
//!
//! The root works on a private copy of the host's board; interior nodes
//! place and undo stones in place through the `Placed` guard.
//!
//! # Example
//!
//! ```
//! use bounceline::board::{Board, Player, Pos};
//! use bounceline::config::EngineConfig;
//! use bounceline::rules::RuleConfig;
//! use bounceline::search::find_minimax_move;
//!
//! let board = Board::standard();
//! let config = EngineConfig::default();
//! let mv = find_minimax_move(&board, Player::A, RuleConfig::STRAIGHT, &config);
//! assert_eq!(mv, Some(Pos::new(3, 3)));
//! ```

use std::cmp::Reverse;
use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::board::{Board, Player, Pos};
use crate::config::EngineConfig;
use crate::engine::{MoveResult, SearchType};
use crate::eval::{evaluate_board, move_priority};
use crate::rules::{check_game_winner, find_winning_move, RuleConfig};

/// Base score of a completed line; the remaining depth is added on top
pub const WIN_SCORE: i32 = 1000;

/// Infinity score for alpha-beta bounds
const INF: i32 = i32::MAX / 2;

/// Depth and time budget for one search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_depth: u8,
    /// Checked between root candidates only
    pub time_limit: Option<Duration>,
}

impl SearchLimits {
    /// Fixed depth, no time limit
    #[must_use]
    pub fn depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            time_limit: None,
        }
    }

    #[must_use]
    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Minimax score of the best move
    pub score: i32,
    /// Depth of the last completed pass
    pub depth: u8,
    /// Total nodes searched
    pub nodes: u64,
    /// Whether the deadline cut a pass short
    pub timed_out: bool,
}

/// Empty cells 8-adjacent to any stone, in row-major order.
///
/// On an empty board every cell is a candidate.
#[must_use]
pub fn candidate_moves(board: &Board) -> Vec<Pos> {
    if board.is_board_empty() {
        return board.empty_positions();
    }

    let size = board.size();
    board
        .positions()
        .filter(|&pos| board.is_empty(pos))
        .filter(|&pos| {
            (-1..=1).any(|dr| {
                (-1..=1).any(|dc| {
                    (dr, dc) != (0, 0)
                        && pos
                            .offset(dr, dc, size)
                            .is_some_and(|n| !board.is_empty(n))
                })
            })
        })
        .collect()
}

/// Depth used by `find_minimax_move`
#[must_use]
pub fn root_depth(rules: RuleConfig, config: &EngineConfig) -> u8 {
    if rules.is_expensive() {
        config.search.reduced_depth
    } else {
        config.search.default_depth
    }
}

/// Pick a move for `player` with fixed-depth minimax.
///
/// Tries, in order: an immediate win, blocking the opponent's immediate
/// win, the center, then a search over at most `root_candidate_cap`
/// adjacent candidates.
#[must_use]
pub fn find_minimax_move(
    board: &Board,
    player: Player,
    rules: RuleConfig,
    config: &EngineConfig,
) -> Option<Pos> {
    minimax_decision(board, player, rules, config).best_move
}

/// `find_minimax_move` with the deciding stage and search statistics.
#[must_use]
pub fn minimax_decision(
    board: &Board,
    player: Player,
    rules: RuleConfig,
    config: &EngineConfig,
) -> MoveResult {
    let win_length = config.win_length;

    if let Some(pos) = find_winning_move(board, player, rules, win_length) {
        debug!("minimax: immediate win at {pos}");
        return MoveResult::found(pos, WIN_SCORE, SearchType::ImmediateWin);
    }
    if let Some(pos) = find_winning_move(board, player.opponent(), rules, win_length) {
        debug!("minimax: blocking at {pos}");
        return MoveResult::found(pos, 0, SearchType::Block);
    }
    let center = board.center();
    if board.is_empty(center) {
        return MoveResult::found(center, 0, SearchType::Center);
    }

    let limits = SearchLimits::depth(root_depth(rules, config));
    MoveResult::from_search(Searcher::new(config, rules, player).search(board, limits))
}

/// Alpha-beta searcher for one side.
///
/// Scores are always from `player`'s point of view; `maximizing` says
/// whose turn it is.
pub struct Searcher<'a> {
    config: &'a EngineConfig,
    rules: RuleConfig,
    player: Player,
    nodes: u64,
    deadline: Option<Instant>,
}

impl<'a> Searcher<'a> {
    #[must_use]
    pub fn new(config: &'a EngineConfig, rules: RuleConfig, player: Player) -> Self {
        Self {
            config,
            rules,
            player,
            nodes: 0,
            deadline: None,
        }
    }

    /// Nodes visited since the searcher was created
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Single pass at `limits.max_depth`.
    pub fn search(&mut self, board: &Board, limits: SearchLimits) -> SearchResult {
        self.deadline = limits.time_limit.map(|limit| Instant::now() + limit);
        let mut work = board.snapshot();
        self.search_root(&mut work, limits.max_depth.max(1))
    }

    /// Iterative deepening from depth 1 to `limits.max_depth`.
    ///
    /// A pass cut short by the deadline is discarded in favour of the last
    /// completed one, unless it is the first pass.
    pub fn search_iterative(&mut self, board: &Board, limits: SearchLimits) -> SearchResult {
        self.deadline = limits.time_limit.map(|limit| Instant::now() + limit);
        let mut work = board.snapshot();
        let mut best = SearchResult::default();

        for depth in 1..=limits.max_depth.max(1) {
            let result = self.search_root(&mut work, depth);

            if result.timed_out {
                debug!("depth {depth} timed out after {} nodes", self.nodes);
                if best.best_move.is_none() {
                    best = result;
                }
                best.timed_out = true;
                break;
            }

            debug!(
                "depth {depth}: best {:?} score {} nodes {}",
                result.best_move, result.score, result.nodes
            );
            let decided = result.score.abs() >= WIN_SCORE;
            best = result;
            if decided || self.time_up() {
                break;
            }
        }

        best.nodes = self.nodes;
        best
    }

    fn search_root(&mut self, board: &mut Board, depth: u8) -> SearchResult {
        let mut moves = candidate_moves(board);
        moves.truncate(self.config.search.root_candidate_cap);

        let mut best_move = None;
        let mut best_score = -INF;
        let mut timed_out = false;

        for (i, &mov) in moves.iter().enumerate() {
            if i > 0 && self.time_up() {
                timed_out = true;
                break;
            }

            let score = {
                let Some(mut placed) = board.play(mov, self.player) else {
                    continue;
                };
                self.minimax(&mut placed, depth, best_score, INF, false)
            };
            trace!("root {mov}: {score}");

            if score > best_score {
                best_score = score;
                best_move = Some(mov);
            }
        }

        SearchResult {
            best_move,
            score: if best_move.is_some() { best_score } else { 0 },
            depth,
            nodes: self.nodes,
            timed_out,
        }
    }

    /// Alpha-beta minimax.
    ///
    /// A completed line scores `±(WIN_SCORE + depth)`, so nearer wins and
    /// later losses rank higher. Static scores are clamped below
    /// `WIN_SCORE` so they never outrank a real result.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;
        let win_length = self.config.win_length;

        if let Some(winner) = check_game_winner(board, self.rules, win_length) {
            let score = WIN_SCORE + i32::from(depth);
            return if winner == self.player { score } else { -score };
        }
        if depth == 0 || board.is_full() {
            let opponent = self.player.opponent();
            return evaluate_board(board, self.player, opponent, win_length, &self.config.eval)
                .clamp(-WIN_SCORE + 1, WIN_SCORE - 1);
        }

        let to_move = if maximizing {
            self.player
        } else {
            self.player.opponent()
        };
        let moves = self.ordered_moves(board, to_move);

        if maximizing {
            let mut best = -INF;
            for mov in moves {
                let score = {
                    let Some(mut placed) = board.play(mov, to_move) else {
                        continue;
                    };
                    self.minimax(&mut placed, depth - 1, alpha, beta, false)
                };
                best = best.max(score);
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = INF;
            for mov in moves {
                let score = {
                    let Some(mut placed) = board.play(mov, to_move) else {
                        continue;
                    };
                    self.minimax(&mut placed, depth - 1, alpha, beta, true)
                };
                best = best.min(score);
                beta = beta.min(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Adjacent candidates, strongest threat first. Equal priorities keep
    /// row-major order.
    fn ordered_moves(&self, board: &Board, to_move: Player) -> Vec<Pos> {
        let win_length = self.config.win_length;
        let priorities = &self.config.threats;
        let mut moves = candidate_moves(board);
        moves.sort_by_cached_key(|&pos| {
            Reverse(move_priority(board, pos, to_move, win_length, priorities))
        });
        moves
    }

    #[inline]
    fn time_up(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(diagram: &str) -> Board {
        Board::parse(diagram).unwrap()
    }

    #[test]
    fn test_candidates_empty_board_is_full_scan() {
        let b = Board::standard();
        let moves = candidate_moves(&b);
        assert_eq!(moves.len(), 36);
        assert_eq!(moves[0], Pos::new(0, 0));
    }

    #[test]
    fn test_candidates_adjacent_row_major() {
        let mut b = Board::standard();
        b.place(0, 0, Player::A);
        assert_eq!(
            candidate_moves(&b),
            vec![Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)]
        );
    }

    #[test]
    fn test_root_depth_reduced_when_expensive() {
        let config = EngineConfig::default();
        assert_eq!(root_depth(RuleConfig::STRAIGHT, &config), 3);
        assert_eq!(root_depth(RuleConfig::new(true, false), &config), 3);
        assert_eq!(root_depth(RuleConfig::new(true, true), &config), 2);
    }

    #[test]
    fn test_minimax_move_takes_center() {
        let b = Board::standard();
        let config = EngineConfig::default();
        let mv = find_minimax_move(&b, Player::A, RuleConfig::STRAIGHT, &config);
        assert_eq!(mv, Some(Pos::new(3, 3)));
    }

    #[test]
    fn test_minimax_move_wins_before_blocking() {
        let b = board(
            "XXXX..
             OOOO..
             ......
             ......
             ......
             ......",
        );
        let config = EngineConfig::default();
        let mv = find_minimax_move(&b, Player::A, RuleConfig::STRAIGHT, &config);
        assert_eq!(mv, Some(Pos::new(0, 4)));
        let mv = find_minimax_move(&b, Player::B, RuleConfig::STRAIGHT, &config);
        assert_eq!(mv, Some(Pos::new(1, 4)));
    }

    #[test]
    fn test_minimax_move_blocks() {
        let b = board(
            "......
             .OOOO.
             ......
             ...X..
             ......
             ......",
        );
        let config = EngineConfig::default();
        let mv = find_minimax_move(&b, Player::A, RuleConfig::STRAIGHT, &config);
        assert!(mv == Some(Pos::new(1, 0)) || mv == Some(Pos::new(1, 5)));
    }

    #[test]
    fn test_search_sees_win_in_one() {
        // Bypass the shortcut checks and let the tree find the win
        let b = board(
            "......
             ......
             .XXXX.
             ......
             ......
             ......",
        );
        let config = EngineConfig::default();
        let mut searcher = Searcher::new(&config, RuleConfig::STRAIGHT, Player::A);
        let result = searcher.search(&b, SearchLimits::depth(2));
        assert_eq!(result.best_move, Some(Pos::new(2, 0)));
        assert_eq!(result.score, WIN_SCORE + 2);
        assert!(!result.timed_out);
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_depth_one_searches_the_reply() {
        // Every root move except (1,5) lets O complete the row
        let b = board(
            "......
             XOOOO.
             ......
             ..X...
             ......
             ......",
        );
        let config = EngineConfig::default();
        let mut searcher = Searcher::new(&config, RuleConfig::STRAIGHT, Player::A);
        let result = searcher.search(&b, SearchLimits::depth(1));
        assert_eq!(result.best_move, Some(Pos::new(1, 5)));
        assert!(result.score > -WIN_SCORE);
        assert_eq!(result.depth, 1);
    }

    #[test]
    fn test_minimax_terminal_scores() {
        let b = board(
            "XXXXX.
             ......
             ......
             ......
             ......
             ......",
        );
        let config = EngineConfig::default();
        let mut work = b.clone();
        let mut mine = Searcher::new(&config, RuleConfig::STRAIGHT, Player::A);
        assert_eq!(mine.minimax(&mut work, 2, -INF, INF, true), WIN_SCORE + 2);
        let mut theirs = Searcher::new(&config, RuleConfig::STRAIGHT, Player::B);
        assert_eq!(theirs.minimax(&mut work, 2, -INF, INF, true), -(WIN_SCORE + 2));
        assert_eq!(work, b);
    }

    #[test]
    fn test_leaf_scores_stay_below_win() {
        let b = board(
            "XXXX..
             XXX...
             XX....
             ......
             ......
             ......",
        );
        let config = EngineConfig::default();
        let mut work = b.clone();
        let mut searcher = Searcher::new(&config, RuleConfig::STRAIGHT, Player::A);
        let score = searcher.minimax(&mut work, 0, -INF, INF, true);
        assert!(score < WIN_SCORE);
    }

    #[test]
    fn test_search_restores_board() {
        let b = board(
            "......
             ..XO..
             ..OX..
             ......
             ......
             ......",
        );
        let config = EngineConfig::default();
        let mut work = b.clone();
        let mut searcher = Searcher::new(&config, RuleConfig::new(true, true), Player::A);
        searcher.minimax(&mut work, 2, -INF, INF, true);
        assert_eq!(work, b);
    }

    #[test]
    fn test_zero_time_limit_still_evaluates_one_candidate() {
        let b = board(
            "......
             ..X...
             ...O..
             ......
             ......
             ......",
        );
        let config = EngineConfig::default();
        let mut searcher = Searcher::new(&config, RuleConfig::STRAIGHT, Player::A);
        let limits = SearchLimits::depth(2).with_time_limit(Some(Duration::ZERO));
        let result = searcher.search(&b, limits);
        assert!(result.timed_out);
        assert_eq!(result.best_move, candidate_moves(&b).first().copied());
    }

    #[test]
    fn test_iterative_keeps_first_pass_on_timeout() {
        let b = board(
            "......
             ..X...
             ...O..
             ......
             ......
             ......",
        );
        let config = EngineConfig::default();
        let mut searcher = Searcher::new(&config, RuleConfig::STRAIGHT, Player::A);
        let limits = SearchLimits::depth(3).with_time_limit(Some(Duration::ZERO));
        let result = searcher.search_iterative(&b, limits);
        assert!(result.timed_out);
        assert_eq!(result.depth, 1);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_iterative_completes_without_deadline() {
        let b = board(
            "......
             ..X...
             ...O..
             ......
             ......
             ......",
        );
        let config = EngineConfig::default();
        let mut searcher = Searcher::new(&config, RuleConfig::STRAIGHT, Player::A);
        let result = searcher.search_iterative(&b, SearchLimits::depth(2));
        assert!(!result.timed_out);
        assert_eq!(result.depth, 2);
        assert_eq!(result.nodes, searcher.nodes());
    }
}
