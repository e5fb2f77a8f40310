//! Assignment step: every example goes to its most similar centroid.

use rayon::prelude::*;
use serde::Serialize;

use lloyd_core::{ClusterId, Corpus, ExampleId, SparseVector};

use super::Centroid;
use crate::algorithms::similarity::cosine_with_norms;

/// Example → cluster mapping, one entry per example in corpus order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterAssignment {
    clusters: Vec<ClusterId>,
    k: usize,
}

impl ClusterAssignment {
    pub fn new(clusters: Vec<ClusterId>, k: usize) -> Self {
        Self { clusters, k }
    }

    /// Cluster of `example`.
    pub fn cluster_of(&self, example: ExampleId) -> Option<ClusterId> {
        self.clusters.get(example.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of clusters this assignment ranges over.
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn as_slice(&self) -> &[ClusterId] {
        &self.clusters
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExampleId, ClusterId)> + '_ {
        self.clusters
            .iter()
            .enumerate()
            .map(|(i, &c)| (ExampleId(i), c))
    }

    /// Members of `cluster` in corpus order.
    pub fn members(&self, cluster: ClusterId) -> Vec<ExampleId> {
        self.iter()
            .filter(|&(_, c)| c == cluster)
            .map(|(e, _)| e)
            .collect()
    }

    /// Members of every cluster, indexed by cluster id.
    pub fn members_by_cluster(&self) -> Vec<Vec<ExampleId>> {
        let mut groups = vec![Vec::new(); self.k];
        for (example, cluster) in self.iter() {
            if let Some(group) = groups.get_mut(cluster.index()) {
                group.push(example);
            }
        }
        groups
    }

    /// Member count per cluster.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.k];
        for c in &self.clusters {
            if let Some(size) = sizes.get_mut(c.index()) {
                *size += 1;
            }
        }
        sizes
    }

    /// Number of examples whose cluster differs from `other`.
    pub fn diff_count(&self, other: &ClusterAssignment) -> usize {
        self.clusters
            .iter()
            .zip(&other.clusters)
            .filter(|(a, b)| a != b)
            .count()
    }
}

/// Outcome of one assignment step.
#[derive(Debug, Clone)]
pub struct AssignmentOutcome {
    pub assignment: ClusterAssignment,
    /// Examples whose cluster differs from the previous assignment. Every
    /// example counts as changed when there was none.
    pub changed: usize,
}

impl AssignmentOutcome {
    pub fn has_changes(&self) -> bool {
        self.changed > 0
    }
}

/// Index of the most similar centroid, ties to the lowest index.
///
/// A zero vector is equally (un)similar to everything and lands in cluster 0.
pub fn nearest_centroid(vector: &SparseVector, centroids: &[Centroid]) -> ClusterId {
    let norms: Vec<f64> = centroids.iter().map(SparseVector::norm).collect();
    nearest_with_norms(vector, centroids, &norms)
}

fn nearest_with_norms(vector: &SparseVector, centroids: &[Centroid], norms: &[f64]) -> ClusterId {
    let norm = vector.norm();
    let mut best = ClusterId(0);
    let mut best_sim = f64::NEG_INFINITY;
    for (i, (centroid, &c_norm)) in centroids.iter().zip(norms).enumerate() {
        let sim = cosine_with_norms(vector, norm, centroid, c_norm);
        if sim > best_sim {
            best_sim = sim;
            best = ClusterId(i);
        }
    }
    best
}

/// Assign every example of `corpus` to its nearest centroid.
///
/// Examples are independent, so with `parallel` the work is spread over the
/// rayon pool; results are collected in corpus order either way.
pub fn assign(
    corpus: &Corpus,
    centroids: &[Centroid],
    previous: Option<&ClusterAssignment>,
    parallel: bool,
) -> AssignmentOutcome {
    let norms: Vec<f64> = centroids.iter().map(SparseVector::norm).collect();
    let nearest = |example: &lloyd_core::Example| {
        nearest_with_norms(&example.features, centroids, &norms)
    };

    let clusters: Vec<ClusterId> = if parallel {
        corpus.examples().par_iter().map(nearest).collect()
    } else {
        corpus.examples().iter().map(nearest).collect()
    };
    let assignment = ClusterAssignment::new(clusters, centroids.len());

    let changed = match previous {
        Some(prev) => assignment.diff_count(prev),
        None => assignment.len(),
    };

    AssignmentOutcome {
        assignment,
        changed,
    }
}
