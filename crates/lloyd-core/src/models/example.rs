use serde::{Deserialize, Serialize};

use super::ids::{FeatureIndex, Label};
use super::sparse_vector::SparseVector;

/// One document: a sparse bag-of-words vector plus its ground-truth label.
///
/// Before weighting the values are raw term counts; after the TF-IDF pass
/// they are weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub label: Label,
    pub features: SparseVector,
}

impl Example {
    pub fn new(label: i64, features: SparseVector) -> Self {
        Self::labeled(Label(label), features)
    }

    pub fn labeled(label: Label, features: SparseVector) -> Self {
        Self { label, features }
    }

    pub fn feature(&self, feature: FeatureIndex) -> f64 {
        self.features.get(feature)
    }
}
