//! Clustering run configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_K, DEFAULT_MAX_ITERATIONS};

/// How the first centroid is chosen. Later centroids always come from the
/// farthest-point heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedingMode {
    /// First example in corpus order.
    #[default]
    First,
    /// Uniformly random example.
    Random,
}

/// What the update step does with a cluster that lost all its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyClusterPolicy {
    /// Keep the previous centroid.
    #[default]
    Freeze,
    /// Move the centroid onto the example least similar to its nearest
    /// remaining centroid.
    Reseed,
    /// Abort the run.
    Fail,
}

/// Configuration for a clustering run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Number of clusters. Default: 20.
    pub k: Option<usize>,
    /// Cap on update rounds, inclusive. Default: 100.
    pub max_iterations: Option<usize>,
    /// First-centroid selection. Default: first.
    pub seeding: Option<SeedingMode>,
    /// RNG seed for random seeding. Unset means OS entropy.
    pub seed: Option<u64>,
    /// Empty-cluster handling. Default: freeze.
    pub empty_cluster: Option<EmptyClusterPolicy>,
    /// Run assignment and update steps on the rayon pool. Default: true.
    pub parallel: Option<bool>,
}

impl ClusteringConfig {
    /// Returns the effective k, defaulting to 20.
    pub fn effective_k(&self) -> usize {
        self.k.unwrap_or(DEFAULT_K)
    }

    /// Returns the effective iteration cap, defaulting to 100.
    pub fn effective_max_iterations(&self) -> usize {
        self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS)
    }

    pub fn effective_seeding(&self) -> SeedingMode {
        self.seeding.unwrap_or_default()
    }

    pub fn effective_empty_cluster(&self) -> EmptyClusterPolicy {
        self.empty_cluster.unwrap_or_default()
    }

    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}

impl fmt::Display for SeedingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("first"),
            Self::Random => f.write_str("random"),
        }
    }
}

impl FromStr for SeedingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(Self::First),
            "random" => Ok(Self::Random),
            other => Err(format!("unknown seeding mode '{other}'")),
        }
    }
}

impl fmt::Display for EmptyClusterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Freeze => f.write_str("freeze"),
            Self::Reseed => f.write_str("reseed"),
            Self::Fail => f.write_str("fail"),
        }
    }
}

impl FromStr for EmptyClusterPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "freeze" => Ok(Self::Freeze),
            "reseed" => Ok(Self::Reseed),
            "fail" => Ok(Self::Fail),
            other => Err(format!("unknown empty-cluster policy '{other}'")),
        }
    }
}
