//! Sparse feature vector with zero-default semantics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ids::FeatureIndex;

/// Sparse mapping from feature index to weight.
///
/// A feature absent from the map has weight 0. Storing 0 removes the entry,
/// so `len()` is always the number of non-zero features. Entries iterate in
/// ascending feature order, which keeps every floating-point reduction over
/// a vector deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<FeatureIndex, f64>",
    into = "BTreeMap<FeatureIndex, f64>"
)]
pub struct SparseVector(BTreeMap<FeatureIndex, f64>);

impl SparseVector {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Weight of `feature`, 0.0 when absent.
    pub fn get(&self, feature: FeatureIndex) -> f64 {
        self.0.get(&feature).copied().unwrap_or(0.0)
    }

    /// Set the weight of `feature`. Zero removes the entry.
    pub fn set(&mut self, feature: FeatureIndex, value: f64) {
        if value == 0.0 {
            self.0.remove(&feature);
        } else {
            self.0.insert(feature, value);
        }
    }

    /// Add `value` to the current weight of `feature`.
    pub fn add(&mut self, feature: FeatureIndex, value: f64) {
        let current = self.get(feature);
        self.set(feature, current + value);
    }

    /// Component-wise `self += other`.
    pub fn add_vector(&mut self, other: &SparseVector) {
        for (feature, value) in other.iter() {
            self.add(feature, value);
        }
    }

    /// Multiply every weight by `factor`.
    pub fn scale(&mut self, factor: f64) {
        if factor == 0.0 {
            self.0.clear();
            return;
        }
        for value in self.0.values_mut() {
            *value *= factor;
        }
    }

    /// Number of non-zero features.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, feature: FeatureIndex) -> bool {
        self.0.contains_key(&feature)
    }

    /// Non-zero entries in ascending feature order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureIndex, f64)> + '_ {
        self.0.iter().map(|(&f, &v)| (f, v))
    }

    /// Features with a non-zero weight, ascending.
    pub fn features(&self) -> impl Iterator<Item = FeatureIndex> + '_ {
        self.0.keys().copied()
    }

    /// Dot product. Only features non-zero in both vectors contribute.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .0
            .iter()
            .filter_map(|(f, a)| large.0.get(f).map(|b| a * b))
            .sum()
    }

    /// Sum of squared weights.
    pub fn squared_norm(&self) -> f64 {
        self.0.values().map(|v| v * v).sum()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.squared_norm().sqrt()
    }
}

impl FromIterator<(FeatureIndex, f64)> for SparseVector {
    fn from_iter<I: IntoIterator<Item = (FeatureIndex, f64)>>(iter: I) -> Self {
        let mut v = SparseVector::new();
        for (feature, value) in iter {
            v.set(feature, value);
        }
        v
    }
}

impl From<BTreeMap<FeatureIndex, f64>> for SparseVector {
    fn from(map: BTreeMap<FeatureIndex, f64>) -> Self {
        map.into_iter().collect()
    }
}

impl From<SparseVector> for BTreeMap<FeatureIndex, f64> {
    fn from(v: SparseVector) -> Self {
        v.0
    }
}

impl<const N: usize> From<[(u32, f64); N]> for SparseVector {
    fn from(pairs: [(u32, f64); N]) -> Self {
        pairs
            .into_iter()
            .map(|(f, v)| (FeatureIndex(f), v))
            .collect()
    }
}
