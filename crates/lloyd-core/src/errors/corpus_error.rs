//! Corpus construction errors.

use super::error_code::{self, LloydErrorCode};
use crate::models::{ExampleId, FeatureIndex};

/// Errors raised when an ingested corpus breaks the data model.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("example {example} uses feature {feature} outside the global feature set")]
    UnknownFeature {
        example: ExampleId,
        feature: FeatureIndex,
    },

    #[error("example {example} has invalid count {value} for feature {feature}")]
    InvalidWeight {
        example: ExampleId,
        feature: FeatureIndex,
        value: f64,
    },
}

impl LloydErrorCode for CorpusError {
    fn error_code(&self) -> &'static str {
        error_code::CORPUS_ERROR
    }
}
