use std::path::PathBuf;

/// Errors raised while building a board from a size or a host snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board size {size} is outside the supported range {min}..={max}")]
    InvalidSize { size: usize, min: usize, max: usize },

    #[error("expected {expected} cells for a square board, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("unknown cell marker {0:?}")]
    UnknownCell(char),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("unknown difficulty {0:?} (expected easy, medium, hard, extra or advanced)")]
    UnknownDifficulty(String),
}
