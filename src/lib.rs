//! Move selection and win detection for small five-in-a-row boards
//!
//! Two game variants share one board model:
//! - Line: five stones in a row (horizontal, vertical or diagonal) win.
//!   Optional modifiers let diagonal lines bounce off the board edge up to
//!   twice, and reject lines with missing teeth.
//! - Path: a chain of stones linking two opposite edges wins, with at most
//!   one run of diagonal steps.
//!
//! # Architecture
//!
//! - [`board`]: Board, positions and the guarded place/undo used in search
//! - [`rules`]: Line and path win detection, game status
//! - [`eval`]: Static evaluation and threat heuristics
//! - [`search`]: Alpha-beta minimax, time budget, iterative deepening
//! - [`strategy`]: Difficulty tiers, heuristic play and the opening book
//! - [`engine`]: Facade the host talks to
//! - [`config`]: TOML-loadable tunables
//!
//! # Quick Start
//!
//! ```
//! use bounceline::{Board, Difficulty, Engine, Player, RuleConfig};
//!
//! let mut board = Board::standard();
//! let mut engine = Engine::with_seed(1);
//! let rules = RuleConfig::new(true, false);
//!
//! if let Some(pos) = engine.get_move(&board, Difficulty::Hard, Player::A, rules) {
//!     board.place_at(pos, Player::A);
//! }
//! assert!(!engine.check_game_status(&board, rules).is_over);
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod strategy;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Player, Pos, DEFAULT_BOARD_SIZE};
pub use config::EngineConfig;
pub use engine::{Engine, MoveResult, SearchType};
pub use error::{BoardError, ConfigError};
pub use rules::{GameStatus, RuleConfig};
pub use strategy::Difficulty;
