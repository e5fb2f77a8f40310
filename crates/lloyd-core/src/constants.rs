/// lloyd version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of clusters (one per newsgroup in the 20 Newsgroups corpus).
pub const DEFAULT_K: usize = 20;

/// Default cap on update rounds.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Prefix shared by every configuration environment variable.
pub const ENV_PREFIX: &str = "LLOYD_";

/// Project config file name looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "lloyd.toml";

/// Log filter environment variable.
pub const LOG_ENV_VAR: &str = "LLOYD_LOG";

/// Fallback log filter when `LLOYD_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "lloyd_core=info,lloyd_engine=info";
