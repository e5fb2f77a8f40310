//! TF-IDF weighting.
//!
//! `idf(f) = ln(N / df(f))`. By default `df(f)` is the feature's total raw
//! count across the corpus and the weight is `tf / idf`; both choices are
//! configurable (`WeightingConfig`).
//!
//! A feature with `df == 0` has no IDF and weighs 0 everywhere. Any weight
//! that comes out non-finite (e.g. `tf / 0` when `df == N`) is stored as 0.

use std::collections::BTreeMap;

use lloyd_core::config::{DocumentFrequency, WeightingConfig, WeightingScheme};
use lloyd_core::errors::ClusteringError;
use lloyd_core::{Corpus, FeatureIndex, SparseVector};
use tracing::debug;

/// Per-feature inverse document frequency, computed once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct IdfTable {
    values: BTreeMap<FeatureIndex, f64>,
    undefined: usize,
    scheme: WeightingScheme,
}

impl IdfTable {
    /// Compute IDF for every feature of the corpus' global feature set.
    pub fn compute(corpus: &Corpus, config: &WeightingConfig) -> Self {
        let n_docs = corpus.len() as f64;
        let mut df: BTreeMap<FeatureIndex, f64> =
            corpus.features().iter().map(|&f| (f, 0.0)).collect();

        let document_frequency = config.effective_document_frequency();
        for example in corpus.examples() {
            for (feature, count) in example.features.iter() {
                if let Some(total) = df.get_mut(&feature) {
                    *total += match document_frequency {
                        DocumentFrequency::TermTotal => count,
                        DocumentFrequency::DocumentCount => 1.0,
                    };
                }
            }
        }

        let mut values = BTreeMap::new();
        let mut undefined = 0usize;
        for (feature, freq) in df {
            if freq > 0.0 {
                values.insert(feature, (n_docs / freq).ln());
            } else {
                undefined += 1;
            }
        }

        Self {
            values,
            undefined,
            scheme: config.effective_scheme(),
        }
    }

    /// IDF of `feature`; `None` when undefined or unknown to the corpus.
    pub fn get(&self, feature: FeatureIndex) -> Option<f64> {
        self.values.get(&feature).copied()
    }

    pub fn scheme(&self) -> WeightingScheme {
        self.scheme
    }

    /// Features of the global set with zero document frequency.
    pub fn undefined_count(&self) -> usize {
        self.undefined
    }

    /// Number of features with a defined IDF.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// TF-IDF weight of a raw count for `feature`.
    pub fn weight(&self, feature: FeatureIndex, tf: f64) -> f64 {
        let Some(idf) = self.get(feature) else {
            return 0.0;
        };
        let w = match self.scheme {
            WeightingScheme::Divide => tf / idf,
            WeightingScheme::Multiply => tf * idf,
        };
        if w.is_finite() {
            w
        } else {
            0.0
        }
    }

    /// Weighted copy of a raw-count vector. Features without an IDF,
    /// including ones never seen in the corpus, are dropped.
    pub fn weigh(&self, raw: &SparseVector) -> SparseVector {
        raw.iter()
            .map(|(feature, tf)| (feature, self.weight(feature, tf)))
            .collect()
    }
}

/// Compute the IDF table and rewrite every example of `corpus` to TF-IDF
/// weights, in place. Fails if the corpus was already weighted.
pub fn apply_tfidf(
    corpus: &mut Corpus,
    config: &WeightingConfig,
) -> Result<IdfTable, ClusteringError> {
    if corpus.is_weighted() {
        return Err(ClusteringError::AlreadyWeighted);
    }

    let table = IdfTable::compute(corpus, config);
    corpus.apply_weighting(|features| *features = table.weigh(features))?;

    let zero_idf = table.values.values().filter(|&&idf| idf == 0.0).count();
    debug!(
        features = corpus.features().len(),
        undefined_idf = table.undefined_count(),
        zero_idf,
        scheme = %table.scheme(),
        "applied TF-IDF weighting"
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lloyd_core::{Example, FeatureSet};

    fn f(i: u32) -> FeatureIndex {
        FeatureIndex(i)
    }

    fn corpus() -> Corpus {
        Corpus::from_examples(vec![
            Example::new(0, SparseVector::from([(0, 2.0)])),
            Example::new(0, SparseVector::from([(0, 1.0)])),
            Example::new(1, SparseVector::from([(1, 2.0)])),
            Example::new(1, SparseVector::from([(1, 1.0)])),
        ])
        .unwrap()
    }

    #[test]
    fn idf_uses_term_totals_by_default() {
        let table = IdfTable::compute(&corpus(), &WeightingConfig::default());
        let expected = (4.0f64 / 3.0).ln();
        assert!((table.get(f(0)).unwrap() - expected).abs() < 1e-12);
        assert!((table.get(f(1)).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn idf_with_document_counts() {
        let config = WeightingConfig {
            document_frequency: Some(DocumentFrequency::DocumentCount),
            ..Default::default()
        };
        let table = IdfTable::compute(&corpus(), &config);
        assert!((table.get(f(0)).unwrap() - 2.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn divide_and_multiply_schemes() {
        let mut config = WeightingConfig::default();
        let table = IdfTable::compute(&corpus(), &config);
        let idf = table.get(f(0)).unwrap();
        assert!((table.weight(f(0), 2.0) - 2.0 / idf).abs() < 1e-12);

        config.scheme = Some(WeightingScheme::Multiply);
        let table = IdfTable::compute(&corpus(), &config);
        assert!((table.weight(f(0), 2.0) - 2.0 * idf).abs() < 1e-12);
    }

    #[test]
    fn zero_document_frequency_weighs_zero() {
        let features: FeatureSet = [f(0), f(9)].into_iter().collect();
        let corpus = Corpus::new(
            vec![Example::new(0, SparseVector::from([(0, 1.0)]))],
            features,
        )
        .unwrap();
        let table = IdfTable::compute(&corpus, &WeightingConfig::default());
        assert_eq!(table.get(f(9)), None);
        assert_eq!(table.undefined_count(), 1);
        assert_eq!(table.weight(f(9), 5.0), 0.0);
    }

    #[test]
    fn zero_idf_under_division_weighs_zero() {
        // df == N gives idf == ln(1) == 0.
        let corpus = Corpus::from_examples(vec![
            Example::new(0, SparseVector::from([(0, 1.0), (1, 1.0)])),
            Example::new(1, SparseVector::from([(0, 1.0)])),
        ])
        .unwrap();
        let table = IdfTable::compute(&corpus, &WeightingConfig::default());
        assert_eq!(table.get(f(0)), Some(0.0));
        assert_eq!(table.weight(f(0), 1.0), 0.0);
        assert!(table.weigh(&corpus.examples()[0].features).get(f(1)).is_finite());
    }

    #[test]
    fn unseen_features_are_dropped() {
        let table = IdfTable::compute(&corpus(), &WeightingConfig::default());
        let weighted = table.weigh(&SparseVector::from([(0, 1.0), (42, 3.0)]));
        assert_eq!(weighted.len(), 1);
        assert_eq!(weighted.get(f(42)), 0.0);
    }

    #[test]
    fn apply_rewrites_in_place_once() {
        let mut corpus = corpus();
        let table = apply_tfidf(&mut corpus, &WeightingConfig::default()).unwrap();
        let idf = table.get(f(0)).unwrap();
        assert!((corpus.examples()[0].feature(f(0)) - 2.0 / idf).abs() < 1e-12);
        assert!(matches!(
            apply_tfidf(&mut corpus, &WeightingConfig::default()),
            Err(ClusteringError::AlreadyWeighted)
        ));
    }
}
