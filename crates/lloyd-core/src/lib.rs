//! # lloyd-core
//!
//! Foundation crate for the lloyd document clustering engine.
//! Defines the corpus model, errors, config, constants, and tracing setup.
//! The engine crate depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod tracing_setup;

// Re-export the most commonly used types at the crate root.
pub use config::LloydConfig;
pub use errors::{LloydError, LloydResult};
pub use models::{
    ClusterId, Corpus, Example, ExampleId, FeatureIndex, FeatureSet, Label, SparseVector,
};
