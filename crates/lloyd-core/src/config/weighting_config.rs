//! TF-IDF weighting conventions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How term frequency and IDF are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingScheme {
    /// `tf / idf`. The engine's native convention.
    #[default]
    Divide,
    /// `tf * idf`, the textbook form.
    Multiply,
}

/// What "document frequency" counts when computing `idf = ln(N / df)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFrequency {
    /// Sum of the feature's raw counts over the corpus.
    #[default]
    TermTotal,
    /// Number of examples with a non-zero count for the feature.
    DocumentCount,
}

/// Weighting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WeightingConfig {
    /// Default: divide.
    pub scheme: Option<WeightingScheme>,
    /// Default: term_total.
    pub document_frequency: Option<DocumentFrequency>,
}

impl WeightingConfig {
    pub fn effective_scheme(&self) -> WeightingScheme {
        self.scheme.unwrap_or_default()
    }

    pub fn effective_document_frequency(&self) -> DocumentFrequency {
        self.document_frequency.unwrap_or_default()
    }
}

impl fmt::Display for WeightingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Divide => f.write_str("divide"),
            Self::Multiply => f.write_str("multiply"),
        }
    }
}

impl FromStr for WeightingScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "divide" => Ok(Self::Divide),
            "multiply" => Ok(Self::Multiply),
            other => Err(format!("unknown weighting scheme '{other}'")),
        }
    }
}

impl fmt::Display for DocumentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TermTotal => f.write_str("term_total"),
            Self::DocumentCount => f.write_str("document_count"),
        }
    }
}

impl FromStr for DocumentFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "term_total" => Ok(Self::TermTotal),
            "document_count" => Ok(Self::DocumentCount),
            other => Err(format!("unknown document frequency '{other}'")),
        }
    }
}
