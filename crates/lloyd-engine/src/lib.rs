//! # lloyd-engine
//!
//! Unsupervised clustering of bag-of-words corpora with a cosine-similarity
//! variant of Lloyd's algorithm:
//! TF-IDF weighting → farthest-point seeding → assign/update loop → purity.
//!
//! ```no_run
//! use lloyd_core::{Corpus, LloydConfig};
//! use lloyd_engine::ClusteringEngine;
//!
//! # fn run(mut corpus: Corpus) -> lloyd_core::LloydResult<()> {
//! let engine = ClusteringEngine::new(LloydConfig::default())?;
//! let result = engine.train(&mut corpus)?;
//! let report = result.purity(&corpus);
//! println!("overall purity {:.3}", report.overall);
//! # Ok(())
//! # }
//! ```

pub mod algorithms;
pub mod engine;
pub mod evaluation;
pub mod pipeline;

pub use engine::{purity, train, ClusteringEngine, ClusteringResult};
pub use evaluation::PurityReport;
pub use pipeline::{Centroid, ClusterAssignment, ClusteringState, Termination};
