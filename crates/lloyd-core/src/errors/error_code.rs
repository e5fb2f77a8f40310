//! Stable string codes for errors crossing a process or language boundary.

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INVALID_K: &str = "INVALID_K";
pub const INVALID_MAX_ITERATIONS: &str = "INVALID_MAX_ITERATIONS";
pub const CORPUS_ERROR: &str = "CORPUS_ERROR";
pub const EMPTY_CLUSTER: &str = "EMPTY_CLUSTER";
pub const ALREADY_WEIGHTED: &str = "ALREADY_WEIGHTED";

/// Maps an error to its stable code.
pub trait LloydErrorCode {
    fn error_code(&self) -> &'static str;
}
