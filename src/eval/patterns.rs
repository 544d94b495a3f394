//! Threat priorities and evaluation weights
//!
//! The associated constants are the reference values; the structs carry
//! them as configurable fields so tests and hosts can vary weights without
//! touching global state.

use serde::{Deserialize, Serialize};

/// Move-ordering priorities for a hypothetical move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatPriorities {
    pub immediate_win: i32,
    pub forced_win: i32,
    pub critical_block_threshold: i32,
    pub critical_threat_threshold: i32,
    pub developing_threat: i32,
    pub potential_threat: i32,
    pub early_threat: i32,
}

impl ThreatPriorities {
    /// Four in a row with one open end
    pub const IMMEDIATE_WIN: i32 = 100;
    /// Move creating two threats at once
    pub const FORCED_WIN: i32 = 90;
    /// Opponent would win immediately here
    pub const CRITICAL_BLOCK_THRESHOLD: i32 = 95;
    /// Opponent threat strong enough to interrupt our own plan
    pub const CRITICAL_THREAT_THRESHOLD: i32 = 85;
    /// Three in a row with one open end
    pub const DEVELOPING_THREAT: i32 = 85;
    /// Two in a row with both ends open
    pub const POTENTIAL_THREAT: i32 = 50;
    /// Two in a row with one open end
    pub const EARLY_THREAT: i32 = 30;
}

impl Default for ThreatPriorities {
    fn default() -> Self {
        Self {
            immediate_win: Self::IMMEDIATE_WIN,
            forced_win: Self::FORCED_WIN,
            critical_block_threshold: Self::CRITICAL_BLOCK_THRESHOLD,
            critical_threat_threshold: Self::CRITICAL_THREAT_THRESHOLD,
            developing_threat: Self::DEVELOPING_THREAT,
            potential_threat: Self::POTENTIAL_THREAT,
            early_threat: Self::EARLY_THREAT,
        }
    }
}

/// Static evaluation weights used at search leaves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub win: i32,
    pub four_in_line: i32,
    pub three_open: i32,
    pub three_half_open: i32,
    pub two_open: i32,
    pub two_half_open: i32,
    /// Multiplier applied to the opponent's total
    pub opponent_discount: f64,
    /// Per step closer to the center, per stone
    pub center_weight: i32,
    /// Per friendly neighbour, per stone
    pub adjacency_weight: i32,
}

impl EvalWeights {
    /// Completed line
    pub const WIN: i32 = 10_000;
    /// One stone short of a win
    pub const FOUR_IN_LINE: i32 = 1_000;
    pub const THREE_OPEN: i32 = 500;
    pub const THREE_HALF_OPEN: i32 = 100;
    pub const TWO_OPEN: i32 = 50;
    pub const TWO_HALF_OPEN: i32 = 10;
    pub const OPPONENT_DISCOUNT: f64 = 0.8;
    pub const CENTER_WEIGHT: i32 = 2;
    pub const ADJACENCY_WEIGHT: i32 = 1;

    /// Weight of one run given how many stones it still lacks and how many
    /// of its ends are open. Runs with both ends closed are worthless.
    pub fn line_weight(&self, missing: usize, open_ends: u8) -> i32 {
        if missing == 0 {
            return self.win;
        }
        match (missing, open_ends) {
            (_, 0) => 0,
            (1, _) => self.four_in_line,
            (2, 2) => self.three_open,
            (2, _) => self.three_half_open,
            (3, 2) => self.two_open,
            (3, _) => self.two_half_open,
            _ => 0,
        }
    }
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            win: Self::WIN,
            four_in_line: Self::FOUR_IN_LINE,
            three_open: Self::THREE_OPEN,
            three_half_open: Self::THREE_HALF_OPEN,
            two_open: Self::TWO_OPEN,
            two_half_open: Self::TWO_HALF_OPEN,
            opponent_discount: Self::OPPONENT_DISCOUNT,
            center_weight: Self::CENTER_WEIGHT,
            adjacency_weight: Self::ADJACENCY_WEIGHT,
        }
    }
}
