//! Cluster quality against held-out ground-truth labels.

pub mod purity;

pub use purity::{
    cluster_purity, evaluate, majority_label, overall_purity, PurityReport,
};
