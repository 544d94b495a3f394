//! Evaluation module for bounceline
//!
//! Contains:
//! - Threat priorities and static evaluation weights
//! - Heuristic board evaluation used at search leaves
//! - Threat heuristics used for move ordering and the shallow strategies

pub mod heuristic;
pub mod patterns;
pub mod threat;

pub use heuristic::evaluate_board;
pub use patterns::{EvalWeights, ThreatPriorities};
pub use threat::{
    count_threats, creates_open_four, find_advanced_threat_move, move_priority,
    score_threat_potential,
};
