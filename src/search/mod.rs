//! Search module for bounceline
//!
//! Contains:
//! - Candidate generation limited to cells next to existing stones
//! - Alpha-beta minimax with an optional time budget
//! - Iterative deepening for the advanced tier
//! - Phase-dependent depth selection

pub mod alphabeta;
pub mod phase;

pub use alphabeta::{
    candidate_moves, find_minimax_move, minimax_decision, root_depth, SearchLimits, SearchResult,
    Searcher, WIN_SCORE,
};
pub use phase::{phase_depth, GamePhase};
