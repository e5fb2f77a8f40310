//! Ordered collection of examples plus the global feature set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::example::Example;
use super::ids::{ExampleId, FeatureIndex, Label};
use super::sparse_vector::SparseVector;
use crate::errors::{ClusteringError, CorpusError};

/// Every feature index occurring anywhere in a corpus.
pub type FeatureSet = BTreeSet<FeatureIndex>;

/// Labeled training corpus.
///
/// Read-only after construction except for the single TF-IDF pass applied
/// through [`Corpus::apply_weighting`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCorpus")]
pub struct Corpus {
    examples: Vec<Example>,
    features: FeatureSet,
    weighted: bool,
}

/// Wire shape accepted from an ingestion collaborator. `features` may be
/// omitted, in which case it is derived from the examples.
#[derive(Deserialize)]
struct RawCorpus {
    examples: Vec<Example>,
    #[serde(default)]
    features: Option<FeatureSet>,
    #[serde(default)]
    weighted: bool,
}

impl TryFrom<RawCorpus> for Corpus {
    type Error = CorpusError;

    fn try_from(raw: RawCorpus) -> Result<Self, Self::Error> {
        let features = raw
            .features
            .unwrap_or_else(|| union_of_features(&raw.examples));
        // TF-IDF weights may be negative; raw counts may not.
        check_examples(&raw.examples, &features, !raw.weighted)?;
        Ok(Self {
            examples: raw.examples,
            features,
            weighted: raw.weighted,
        })
    }
}

impl Corpus {
    /// Build a corpus over an explicit global feature set.
    ///
    /// The set may contain features no example uses; every feature an
    /// example uses must be in the set, and every count must be finite and
    /// non-negative.
    pub fn new(examples: Vec<Example>, features: FeatureSet) -> Result<Self, CorpusError> {
        check_examples(&examples, &features, true)?;
        Ok(Self {
            examples,
            features,
            weighted: false,
        })
    }

    /// Build a corpus whose global feature set is the union of the
    /// examples' features.
    pub fn from_examples(examples: Vec<Example>) -> Result<Self, CorpusError> {
        let features = union_of_features(&examples);
        Self::new(examples, features)
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn example(&self, id: ExampleId) -> Option<&Example> {
        self.examples.get(id.index())
    }

    /// Example ids in corpus order.
    pub fn ids(&self) -> impl Iterator<Item = ExampleId> {
        (0..self.examples.len()).map(ExampleId)
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn label(&self, id: ExampleId) -> Option<Label> {
        self.example(id).map(|e| e.label)
    }

    /// Whether the TF-IDF pass has already been applied.
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Rewrite every example's vector in place, exactly once per corpus.
    pub fn apply_weighting<F>(&mut self, mut weigh: F) -> Result<(), ClusteringError>
    where
        F: FnMut(&mut SparseVector),
    {
        if self.weighted {
            return Err(ClusteringError::AlreadyWeighted);
        }
        for example in &mut self.examples {
            weigh(&mut example.features);
        }
        self.weighted = true;
        Ok(())
    }
}

fn union_of_features(examples: &[Example]) -> FeatureSet {
    examples
        .iter()
        .flat_map(|e| e.features.features())
        .collect()
}

fn check_examples(
    examples: &[Example],
    features: &FeatureSet,
    raw_counts: bool,
) -> Result<(), CorpusError> {
    for (i, example) in examples.iter().enumerate() {
        for (feature, value) in example.features.iter() {
            if !features.contains(&feature) {
                return Err(CorpusError::UnknownFeature {
                    example: ExampleId(i),
                    feature,
                });
            }
            if !value.is_finite() || (raw_counts && value < 0.0) {
                return Err(CorpusError::InvalidWeight {
                    example: ExampleId(i),
                    feature,
                    value,
                });
            }
        }
    }
    Ok(())
}
