//! Corpus data model: strong-typed identifiers, sparse vectors, examples.

pub mod corpus;
pub mod example;
pub mod ids;
pub mod sparse_vector;

pub use corpus::{Corpus, FeatureSet};
pub use example::Example;
pub use ids::{ClusterId, ExampleId, FeatureIndex, Label};
pub use sparse_vector::SparseVector;
