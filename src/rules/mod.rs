//! Game rules for both bounceline variants
//!
//! This module implements:
//! - Line wins with optional bounce and missing-teeth modifiers
//! - Edge-to-edge path wins with a single diagonal run
//! - Game status summaries for the host

pub mod line;
pub mod path;
pub mod status;

use serde::{Deserialize, Serialize};

// Re-exports for convenient access
pub use line::{
    check_game_winner, find_line_through, find_winning_line, find_winning_move,
    has_missing_teeth, is_major_axis, WinLine,
};
pub use path::{check_edge_pair, check_win_for_player, EdgePair, PathWin};
pub use status::{check_game_status, check_path_status, GameStatus};

/// Modifiers for the line variant. Passed by value into every detection call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Diagonal lines may reflect off the board edge (at most twice)
    pub bounce: bool,
    /// Lines whose cells are not all step-adjacent do not count
    pub missing_teeth: bool,
}

impl RuleConfig {
    pub const STRAIGHT: RuleConfig = RuleConfig {
        bounce: false,
        missing_teeth: false,
    };

    #[inline]
    pub fn new(bounce: bool, missing_teeth: bool) -> Self {
        Self {
            bounce,
            missing_teeth,
        }
    }

    /// Both modifiers on; these positions are the expensive ones to search
    #[inline]
    pub fn is_expensive(self) -> bool {
        self.bounce && self.missing_teeth
    }
}
