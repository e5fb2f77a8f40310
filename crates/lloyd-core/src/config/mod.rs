//! Configuration system for lloyd.
//! TOML-based, layered resolution: overrides > env > project file > defaults.

pub mod clustering_config;
pub mod lloyd_config;
pub mod weighting_config;

pub use clustering_config::{ClusteringConfig, EmptyClusterPolicy, SeedingMode};
pub use lloyd_config::{ConfigOverrides, LloydConfig};
pub use weighting_config::{DocumentFrequency, WeightingConfig, WeightingScheme};
