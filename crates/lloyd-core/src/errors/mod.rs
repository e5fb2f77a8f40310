//! Error handling for lloyd.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod clustering_error;
pub mod config_error;
pub mod corpus_error;
pub mod error_code;

pub use clustering_error::ClusteringError;
pub use config_error::ConfigError;
pub use corpus_error::CorpusError;
pub use error_code::LloydErrorCode;

/// Top-level error aggregating every subsystem error.
#[derive(Debug, thiserror::Error)]
pub enum LloydError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("Clustering error: {0}")]
    Clustering(#[from] ClusteringError),
}

impl LloydErrorCode for LloydError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Corpus(e) => e.error_code(),
            Self::Clustering(e) => e.error_code(),
        }
    }
}

/// Convenience alias used across the workspace.
pub type LloydResult<T> = Result<T, LloydError>;
