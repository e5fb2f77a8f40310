//! Configuration errors.

use super::error_code::{self, LloydErrorCode};

/// Errors raised while loading or validating configuration.
/// All of them fail fast, before any numeric work starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("k must be between 1 and the corpus size ({corpus_size}), got {k}")]
    InvalidK { k: usize, corpus_size: usize },

    #[error("k must be at least 1")]
    ZeroK,

    #[error("max_iterations must be at least 1, got {value}")]
    InvalidMaxIterations { value: usize },

    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Invalid value for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}

impl LloydErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidK { .. } | Self::ZeroK => error_code::INVALID_K,
            Self::InvalidMaxIterations { .. } => error_code::INVALID_MAX_ITERATIONS,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
