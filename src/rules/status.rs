//! Game status summaries for the host

use crate::board::{Board, Player, Pos};

use super::line::find_winning_line;
use super::path::check_win_for_player;
use super::RuleConfig;

/// Outcome of a status query.
///
/// For the path variant the bounce indices are always `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameStatus {
    pub is_over: bool,
    pub winner: Option<Player>,
    /// Cells of the winning line or chain, in trace order
    pub winning_cells: Vec<Pos>,
    pub is_draw: bool,
    pub bounce_index: Option<usize>,
    pub second_bounce_index: Option<usize>,
}

impl GameStatus {
    fn ongoing_or_draw(board: &Board) -> Self {
        let full = board.is_full();
        Self {
            is_over: full,
            is_draw: full,
            ..Self::default()
        }
    }
}

/// Status of a line-variant game.
pub fn check_game_status(board: &Board, rules: RuleConfig, win_length: usize) -> GameStatus {
    match find_winning_line(board, rules, win_length) {
        Some(line) => GameStatus {
            is_over: true,
            winner: Some(line.winner),
            winning_cells: line.path,
            is_draw: false,
            bounce_index: line.bounce_index,
            second_bounce_index: line.second_bounce_index,
        },
        None => GameStatus::ongoing_or_draw(board),
    }
}

/// Status of a path-variant game, checking player A then B.
pub fn check_path_status(board: &Board) -> GameStatus {
    let win = [Player::A, Player::B]
        .into_iter()
        .find_map(|p| check_win_for_player(board, p));
    match win {
        Some(win) => GameStatus {
            is_over: true,
            winner: Some(win.winner),
            winning_cells: win.path,
            ..GameStatus::default()
        },
        None => GameStatus::ongoing_or_draw(board),
    }
}
