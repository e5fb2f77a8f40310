//! Update step: each centroid becomes the mean TF-IDF vector of its members.

use rayon::prelude::*;
use tracing::warn;

use lloyd_core::config::EmptyClusterPolicy;
use lloyd_core::errors::ClusteringError;
use lloyd_core::{ClusterId, Corpus, ExampleId, SparseVector};

use super::{Centroid, ClusterAssignment};
use crate::algorithms::similarity::cosine_with_norms;

/// Component-wise mean of the members' vectors. Features absent from every
/// member stay absent (zero). `None` for an empty member list.
pub fn mean_vector(corpus: &Corpus, members: &[ExampleId]) -> Option<Centroid> {
    if members.is_empty() {
        return None;
    }
    let mut sum = SparseVector::new();
    for id in members {
        if let Some(example) = corpus.example(*id) {
            sum.add_vector(&example.features);
        }
    }
    sum.scale(1.0 / members.len() as f64);
    Some(sum)
}

/// Recompute all centroids from `assignment`.
///
/// `previous` are the centroids the assignment was made against; `iteration`
/// is the 1-based update round, reported on failure. Empty clusters are
/// resolved by `policy`.
pub fn update_centroids(
    corpus: &Corpus,
    assignment: &ClusterAssignment,
    previous: &[Centroid],
    policy: EmptyClusterPolicy,
    iteration: usize,
    parallel: bool,
) -> Result<Vec<Centroid>, ClusteringError> {
    let groups = assignment.members_by_cluster();
    let means: Vec<Option<Centroid>> = if parallel {
        groups
            .par_iter()
            .map(|members| mean_vector(corpus, members))
            .collect()
    } else {
        groups
            .iter()
            .map(|members| mean_vector(corpus, members))
            .collect()
    };

    let empty: Vec<ClusterId> = means
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_none())
        .map(|(i, _)| ClusterId(i))
        .collect();

    if empty.is_empty() {
        return Ok(means.into_iter().flatten().collect());
    }

    if policy == EmptyClusterPolicy::Fail {
        return Err(ClusteringError::EmptyCluster {
            cluster: empty[0],
            iteration,
        });
    }

    let mut centroids: Vec<Option<Centroid>> = means;
    let mut taken: Vec<ExampleId> = Vec::new();
    for cluster in empty {
        warn!(cluster = %cluster, iteration, %policy, "empty cluster");
        let replacement = match policy {
            EmptyClusterPolicy::Reseed => farthest_example(corpus, &centroids, &taken)
                .map(|id| {
                    taken.push(id);
                    corpus.examples()[id.index()].features.clone()
                }),
            _ => None,
        };
        centroids[cluster.index()] = Some(
            replacement
                .or_else(|| previous.get(cluster.index()).cloned())
                .unwrap_or_default(),
        );
    }

    Ok(centroids.into_iter().map(Option::unwrap_or_default).collect())
}

/// The example least similar to its nearest defined centroid, skipping
/// examples already used for reseeding. Ties go to the earlier example.
fn farthest_example(
    corpus: &Corpus,
    centroids: &[Option<Centroid>],
    taken: &[ExampleId],
) -> Option<ExampleId> {
    let defined: Vec<(&Centroid, f64)> = centroids
        .iter()
        .flatten()
        .map(|c| (c, c.norm()))
        .collect();

    let mut farthest: Option<(ExampleId, f64)> = None;
    for (id, example) in corpus.ids().zip(corpus.examples()) {
        if taken.contains(&id) {
            continue;
        }
        let norm = example.features.norm();
        let nearest = defined
            .iter()
            .map(|(c, c_norm)| cosine_with_norms(&example.features, norm, c, *c_norm))
            .fold(f64::NEG_INFINITY, f64::max);
        match farthest {
            Some((_, min)) if nearest >= min => {}
            _ => farthest = Some((id, nearest)),
        }
    }
    farthest.map(|(id, _)| id)
}
