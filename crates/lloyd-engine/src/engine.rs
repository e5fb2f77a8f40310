//! ClusteringEngine: validated configuration plus the train entry point.

use tracing::info;

use lloyd_core::config::{ClusteringConfig, LloydConfig, SeedingMode};
use lloyd_core::errors::ConfigError;
use lloyd_core::{ClusterId, Corpus, Example, ExampleId, Label, LloydResult, SparseVector};

use crate::algorithms::weighting::{apply_tfidf, IdfTable};
use crate::evaluation::{self, PurityReport};
use crate::pipeline::{
    self, nearest_centroid, seed_centroids, Centroid, ClusterAssignment, LoopSettings,
    Termination,
};

/// Clustering engine.
///
/// Holds a validated configuration; every run goes through [`train`](Self::train).
#[derive(Debug, Clone)]
pub struct ClusteringEngine {
    config: LloydConfig,
}

impl ClusteringEngine {
    /// Create an engine, rejecting invalid configuration up front.
    pub fn new(config: LloydConfig) -> Result<Self, ConfigError> {
        LloydConfig::validate(&config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LloydConfig {
        &self.config
    }

    /// Weight `corpus` in place, seed, and iterate to a fixed point or the cap.
    ///
    /// Fails before touching the corpus if `k` is 0 or exceeds its size.
    pub fn train(&self, corpus: &mut Corpus) -> LloydResult<ClusteringResult> {
        let clustering = &self.config.clustering;
        let k = clustering.effective_k();
        let max_iterations = clustering.effective_max_iterations();
        if k == 0 || k > corpus.len() {
            return Err(ConfigError::InvalidK {
                k,
                corpus_size: corpus.len(),
            }
            .into());
        }
        if max_iterations < 1 {
            return Err(ConfigError::InvalidMaxIterations {
                value: max_iterations,
            }
            .into());
        }

        info!(
            k,
            max_iterations,
            examples = corpus.len(),
            features = corpus.features().len(),
            "starting clustering run"
        );

        let idf = apply_tfidf(corpus, &self.config.weighting)?;
        let seeds = seed_centroids(
            corpus,
            k,
            clustering.effective_seeding(),
            clustering.seed,
        );
        let outcome = pipeline::run_lloyd(corpus, seeds.centroids, loop_settings(clustering))?;

        info!(
            iterations = outcome.state.iteration,
            converged = outcome.termination == Termination::Converged,
            sizes = ?outcome.state.assignment.sizes(),
            "clustering run complete"
        );

        Ok(ClusteringResult {
            centroids: outcome.state.centroids,
            assignment: outcome.state.assignment,
            idf,
            seeds: seeds.examples,
            iterations: outcome.state.iteration,
            termination: outcome.termination,
            changes_per_round: outcome.changes_per_round,
        })
    }
}

fn loop_settings(config: &ClusteringConfig) -> LoopSettings {
    LoopSettings {
        max_iterations: config.effective_max_iterations(),
        empty_cluster: config.effective_empty_cluster(),
        parallel: config.effective_parallel(),
    }
}

/// Train with the default weighting and empty-cluster policy.
pub fn train(
    corpus: &mut Corpus,
    k: usize,
    max_iterations: usize,
    seeding: SeedingMode,
) -> LloydResult<ClusteringResult> {
    let mut config = LloydConfig::default();
    config.clustering.k = Some(k);
    config.clustering.max_iterations = Some(max_iterations);
    config.clustering.seeding = Some(seeding);
    ClusteringEngine::new(config)?.train(corpus)
}

/// Outcome of a training run.
#[derive(Debug, Clone)]
pub struct ClusteringResult {
    /// Final centroids, indexed by cluster id.
    pub centroids: Vec<Centroid>,
    /// Final assignment, made against `centroids`.
    pub assignment: ClusterAssignment,
    /// IDF table the corpus was weighted with.
    pub idf: IdfTable,
    /// Examples chosen as initial centroids, in selection order.
    pub seeds: Vec<ExampleId>,
    /// Update rounds run.
    pub iterations: usize,
    pub termination: Termination,
    /// Examples moved per assignment round, initial assignment first.
    pub changes_per_round: Vec<usize>,
}

impl ClusteringResult {
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Cluster of an out-of-sample example given as raw counts. The example
    /// is weighted with the trained IDF table; unseen features are ignored.
    pub fn classify(&self, example: &Example) -> ClusterId {
        self.classify_weighted(&self.idf.weigh(&example.features))
    }

    /// Cluster of an already weighted vector.
    pub fn classify_weighted(&self, vector: &SparseVector) -> ClusterId {
        nearest_centroid(vector, &self.centroids)
    }

    /// Majority training label of the cluster `example` falls into.
    pub fn predict_label(&self, example: &Example, corpus: &Corpus) -> Option<Label> {
        let cluster = self.classify(example);
        evaluation::majority_label(corpus, &self.assignment, cluster).map(|(label, _)| label)
    }

    /// Members of `cluster` in corpus order.
    pub fn members(&self, cluster: ClusterId) -> Vec<ExampleId> {
        self.assignment.members(cluster)
    }

    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.assignment.sizes()
    }

    /// Purity of this clustering against `corpus`' labels.
    pub fn purity(&self, corpus: &Corpus) -> PurityReport {
        purity(self, corpus)
    }
}

/// Purity of `result` against the labels of the corpus it was trained on.
pub fn purity(result: &ClusteringResult, corpus: &Corpus) -> PurityReport {
    evaluation::evaluate(corpus, &result.assignment)
}
