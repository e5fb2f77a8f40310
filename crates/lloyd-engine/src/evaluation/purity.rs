//! Majority-label purity.
//!
//! - cluster purity = majority-label count / cluster size (0 for an empty cluster)
//! - overall purity = Σ majority counts / corpus size

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use lloyd_core::{ClusterId, Corpus, Label};

use crate::pipeline::ClusterAssignment;

/// Per-cluster and overall purity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurityReport {
    pub per_cluster: BTreeMap<ClusterId, f64>,
    pub overall: f64,
}

/// Most frequent label among the members of `cluster` and its count.
///
/// Ties go to the label encountered first in corpus order. `None` for an
/// empty cluster.
pub fn majority_label(
    corpus: &Corpus,
    assignment: &ClusterAssignment,
    cluster: ClusterId,
) -> Option<(Label, usize)> {
    let mut counts: HashMap<Label, usize> = HashMap::new();
    let mut order: Vec<Label> = Vec::new();
    for (example, c) in assignment.iter() {
        if c != cluster {
            continue;
        }
        let Some(label) = corpus.label(example) else {
            continue;
        };
        let count = counts.entry(label).or_insert(0);
        if *count == 0 {
            order.push(label);
        }
        *count += 1;
    }

    let mut best: Option<(Label, usize)> = None;
    for label in order {
        let count = counts[&label];
        if best.map_or(true, |(_, max)| count > max) {
            best = Some((label, count));
        }
    }
    best
}

/// Share of `cluster`'s members carrying its majority label.
pub fn cluster_purity(corpus: &Corpus, assignment: &ClusterAssignment, cluster: ClusterId) -> f64 {
    let size = assignment.members(cluster).len();
    match majority_label(corpus, assignment, cluster) {
        Some((_, count)) if size > 0 => count as f64 / size as f64,
        _ => 0.0,
    }
}

/// Σ majority counts over all clusters / corpus size.
pub fn overall_purity(corpus: &Corpus, assignment: &ClusterAssignment) -> f64 {
    if corpus.is_empty() {
        return 0.0;
    }
    let majority_total: usize = (0..assignment.k())
        .filter_map(|i| majority_label(corpus, assignment, ClusterId(i)))
        .map(|(_, count)| count)
        .sum();
    majority_total as f64 / corpus.len() as f64
}

/// Full purity report for an assignment.
pub fn evaluate(corpus: &Corpus, assignment: &ClusterAssignment) -> PurityReport {
    let mut per_cluster = BTreeMap::new();
    for i in 0..assignment.k() {
        let cluster = ClusterId(i);
        let purity = cluster_purity(corpus, assignment, cluster);
        if let Some((label, count)) = majority_label(corpus, assignment, cluster) {
            debug!(cluster = %cluster, majority = %label, count, purity, "cluster purity");
        }
        per_cluster.insert(cluster, purity);
    }
    PurityReport {
        per_cluster,
        overall: overall_purity(corpus, assignment),
    }
}
