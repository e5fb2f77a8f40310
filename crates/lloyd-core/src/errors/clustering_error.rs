//! Clustering run errors.

use super::error_code::{self, LloydErrorCode};
use crate::models::ClusterId;

/// Errors that abort a training run.
///
/// Non-convergence is not an error: a run that hits its iteration cap
/// returns normally and reports it in its result.
#[derive(Debug, thiserror::Error)]
pub enum ClusteringError {
    #[error("cluster {cluster} has no members after round {iteration}")]
    EmptyCluster { cluster: ClusterId, iteration: usize },

    #[error("corpus has already been TF-IDF weighted")]
    AlreadyWeighted,
}

impl LloydErrorCode for ClusteringError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyCluster { .. } => error_code::EMPTY_CLUSTER,
            Self::AlreadyWeighted => error_code::ALREADY_WEIGHTED,
        }
    }
}
