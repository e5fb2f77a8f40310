//! Top-level lloyd configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    ClusteringConfig, DocumentFrequency, EmptyClusterPolicy, SeedingMode, WeightingConfig,
    WeightingScheme,
};
use crate::constants::{ENV_PREFIX, PROJECT_CONFIG_FILE};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (`ConfigOverrides`)
/// 2. Environment variables (`LLOYD_*`)
/// 3. Project config (`lloyd.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LloydConfig {
    pub clustering: ClusteringConfig,
    pub weighting: WeightingConfig,
}

/// Caller-supplied overrides, applied last.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub k: Option<usize>,
    pub max_iterations: Option<usize>,
    pub seeding: Option<SeedingMode>,
    pub seed: Option<u64>,
    pub empty_cluster: Option<EmptyClusterPolicy>,
}

impl LloydConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
            debug!(path = %project_config_path.display(), "merged project config");
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate values that do not depend on the corpus.
    /// `k <= |corpus|` is checked when training starts.
    pub fn validate(config: &LloydConfig) -> Result<(), ConfigError> {
        if config.clustering.k == Some(0) {
            return Err(ConfigError::ZeroK);
        }
        if let Some(value) = config.clustering.max_iterations {
            if value < 1 {
                return Err(ConfigError::InvalidMaxIterations { value });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut LloydConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: LloydConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut LloydConfig, other: &LloydConfig) {
        let (b, o) = (&mut base.clustering, &other.clustering);
        b.k = o.k.or(b.k);
        b.max_iterations = o.max_iterations.or(b.max_iterations);
        b.seeding = o.seeding.or(b.seeding);
        b.seed = o.seed.or(b.seed);
        b.empty_cluster = o.empty_cluster.or(b.empty_cluster);
        b.parallel = o.parallel.or(b.parallel);

        let (b, o) = (&mut base.weighting, &other.weighting);
        b.scheme = o.scheme.or(b.scheme);
        b.document_frequency = o.document_frequency.or(b.document_frequency);
    }

    /// Apply environment variable overrides.
    /// Pattern: `LLOYD_K`, `LLOYD_MAX_ITERATIONS`, `LLOYD_WEIGHTING_SCHEME`, etc.
    /// A variable that is set but unparseable is a validation error.
    fn apply_env_overrides(config: &mut LloydConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_parse::<usize>("K")? {
            config.clustering.k = Some(v);
        }
        if let Some(v) = env_parse::<usize>("MAX_ITERATIONS")? {
            config.clustering.max_iterations = Some(v);
        }
        if let Some(v) = env_parse::<SeedingMode>("SEEDING")? {
            config.clustering.seeding = Some(v);
        }
        if let Some(v) = env_parse::<u64>("SEED")? {
            config.clustering.seed = Some(v);
        }
        if let Some(v) = env_parse::<EmptyClusterPolicy>("EMPTY_CLUSTER")? {
            config.clustering.empty_cluster = Some(v);
        }
        if let Some(v) = env_parse::<bool>("PARALLEL")? {
            config.clustering.parallel = Some(v);
        }
        if let Some(v) = env_parse::<WeightingScheme>("WEIGHTING_SCHEME")? {
            config.weighting.scheme = Some(v);
        }
        if let Some(v) = env_parse::<DocumentFrequency>("DOCUMENT_FREQUENCY")? {
            config.weighting.document_frequency = Some(v);
        }
        Ok(())
    }

    /// Apply programmatic overrides (highest priority).
    fn apply_overrides(config: &mut LloydConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.k {
            config.clustering.k = Some(v);
        }
        if let Some(v) = overrides.max_iterations {
            config.clustering.max_iterations = Some(v);
        }
        if let Some(v) = overrides.seeding {
            config.clustering.seeding = Some(v);
        }
        if let Some(v) = overrides.seed {
            config.clustering.seed = Some(v);
        }
        if let Some(v) = overrides.empty_cluster {
            config.clustering.empty_cluster = Some(v);
        }
    }
}

/// Parse `LLOYD_<suffix>` if set.
fn env_parse<T>(suffix: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let key = format!("{ENV_PREFIX}{suffix}");
    match std::env::var(&key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::ValidationFailed {
                field: key.clone(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
