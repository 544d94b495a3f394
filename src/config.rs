//! Engine configuration, loadable from TOML.
//!
//! Every tunable the search and heuristics read lives here and is passed
//! down by reference. Nothing is process-global, so two engines with
//! different weights can run side by side.

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::eval::{EvalWeights, ThreatPriorities};

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Stones in a line needed to win
    pub win_length: usize,
    pub search: SearchConfig,
    pub threats: ThreatPriorities,
    pub eval: EvalWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            win_length: 5,
            search: SearchConfig::default(),
            threats: ThreatPriorities::default(),
            eval: EvalWeights::default(),
        }
    }
}

/// Search depth, phase and time settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Minimax depth for the extra tier
    pub default_depth: u8,
    /// Depth used instead when bounce and missing-teeth are both on
    pub reduced_depth: u8,
    /// Root candidates kept, in discovery order
    pub root_candidate_cap: usize,
    /// Fill ratio below which the game is in its early phase
    pub early_phase_threshold: f64,
    /// Fill ratio at or above which the game is in its late phase
    pub late_phase_threshold: f64,
    pub early_depth: u8,
    pub mid_depth: u8,
    pub late_depth: u8,
    /// Wall-clock budget for the advanced tier; `None` searches to full depth
    pub time_limit_ms: Option<u64>,
    /// Stones on the board below which the opening book answers
    pub opening_plies: usize,
    /// Chance the medium tier plays a heuristic move instead of a random one
    pub heuristic_probability: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_depth: 3,
            reduced_depth: 2,
            root_candidate_cap: 10,
            early_phase_threshold: 0.2,
            late_phase_threshold: 0.7,
            early_depth: 3,
            mid_depth: 4,
            late_depth: 5,
            time_limit_ms: Some(2_000),
            opening_plies: 4,
            heuristic_probability: 0.5,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_length < 3 {
            return Err(ConfigError::Validation("win_length must be >= 3".into()));
        }
        let s = &self.search;
        if s.default_depth == 0 || s.reduced_depth == 0 {
            return Err(ConfigError::Validation(
                "search.default_depth and search.reduced_depth must be > 0".into(),
            ));
        }
        if s.early_depth == 0 || s.mid_depth == 0 || s.late_depth == 0 {
            return Err(ConfigError::Validation(
                "search phase depths must be > 0".into(),
            ));
        }
        if s.early_depth.min(s.mid_depth).min(s.late_depth) < s.default_depth {
            return Err(ConfigError::Validation(
                "search phase depths must be >= search.default_depth".into(),
            ));
        }
        if s.root_candidate_cap == 0 {
            return Err(ConfigError::Validation(
                "search.root_candidate_cap must be > 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&s.early_phase_threshold)
            || !(0.0..=1.0).contains(&s.late_phase_threshold)
            || s.early_phase_threshold > s.late_phase_threshold
        {
            return Err(ConfigError::Validation(
                "search phase thresholds must satisfy 0 <= early <= late <= 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&s.heuristic_probability) {
            return Err(ConfigError::Validation(
                "search.heuristic_probability must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.eval.opponent_discount) {
            return Err(ConfigError::Validation(
                "eval.opponent_discount must be in [0, 1]".into(),
            ));
        }
        Ok(())
    }
}
