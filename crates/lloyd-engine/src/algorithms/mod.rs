//! Numeric building blocks: TF-IDF weighting and cosine similarity.

pub mod similarity;
pub mod weighting;
