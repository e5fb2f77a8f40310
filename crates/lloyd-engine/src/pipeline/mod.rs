//! Clustering pipeline: seeding → assignment ⇄ update until a fixed point.
//!
//! Round structure:
//! 1. initial assignment against the seeds
//! 2. update centroids, reassign; repeat until no example moves
//!    (`Converged`) or `max_iterations` updates have run (`Stopped`)
//!
//! Rounds are strictly sequential. Within a round the assignment is
//! parallel over examples and the update parallel over clusters; the
//! `collect` at the end of each step is the barrier between them.
//!
//! The number of examples changing cluster is not monotone across rounds;
//! termination is guaranteed by the iteration cap alone.

pub mod assignment;
pub mod seeding;
pub mod update;

use serde::Serialize;
use tracing::{debug, info};

use lloyd_core::config::EmptyClusterPolicy;
use lloyd_core::errors::ClusteringError;
use lloyd_core::{Corpus, SparseVector};

pub use assignment::{assign, nearest_centroid, AssignmentOutcome, ClusterAssignment};
pub use seeding::{seed_centroids, Seeds};
pub use update::update_centroids;

/// A cluster center over the global feature space. Has no label.
pub type Centroid = SparseVector;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// A round moved no example.
    Converged,
    /// The iteration cap was reached first. A normal outcome.
    Stopped,
}

/// Settings the loop needs, resolved from `ClusteringConfig`.
#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    pub max_iterations: usize,
    pub empty_cluster: EmptyClusterPolicy,
    pub parallel: bool,
}

/// All state carried from one round to the next.
#[derive(Debug, Clone)]
pub struct ClusteringState {
    pub centroids: Vec<Centroid>,
    pub assignment: ClusterAssignment,
    /// Completed update rounds.
    pub iteration: usize,
}

/// Final state of a loop run.
#[derive(Debug, Clone)]
pub struct LoopOutcome {
    pub state: ClusteringState,
    pub termination: Termination,
    /// Examples that changed cluster in each assignment, starting with the
    /// initial one (which counts every example).
    pub changes_per_round: Vec<usize>,
}

/// Run Lloyd rounds from `seeds` until convergence or the iteration cap.
///
/// At most `settings.max_iterations` update steps run. The final assignment
/// is always the one made against the final centroids.
pub fn run_lloyd(
    corpus: &Corpus,
    seeds: Vec<Centroid>,
    settings: LoopSettings,
) -> Result<LoopOutcome, ClusteringError> {
    let initial = assign(corpus, &seeds, None, settings.parallel);
    let mut changes_per_round = vec![initial.changed];
    let mut state = ClusteringState {
        centroids: seeds,
        assignment: initial.assignment,
        iteration: 0,
    };
    debug!(sizes = ?state.assignment.sizes(), "initial assignment");

    let termination = loop {
        if state.iteration >= settings.max_iterations {
            break Termination::Stopped;
        }

        let round = state.iteration + 1;
        state.centroids = update_centroids(
            corpus,
            &state.assignment,
            &state.centroids,
            settings.empty_cluster,
            round,
            settings.parallel,
        )?;
        state.iteration = round;

        let outcome = assign(
            corpus,
            &state.centroids,
            Some(&state.assignment),
            settings.parallel,
        );
        changes_per_round.push(outcome.changed);
        debug!(round, changed = outcome.changed, "assignment round");
        state.assignment = outcome.assignment;

        if outcome.changed == 0 {
            break Termination::Converged;
        }
    };

    info!(
        iterations = state.iteration,
        termination = ?termination,
        "Lloyd loop finished"
    );

    Ok(LoopOutcome {
        state,
        termination,
        changes_per_round,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lloyd_core::config::SeedingMode;
    use lloyd_core::{ClusterId, Example};

    fn polar(deg: f64, mag: f64) -> SparseVector {
        let r = deg.to_radians();
        SparseVector::from([(0, mag * r.cos()), (1, mag * r.sin())])
    }

    /// Seeds at 0° and 90°. The 40° example starts in cluster 0 and moves to
    /// cluster 1 after the first update, so convergence takes two rounds.
    fn two_round_corpus() -> Corpus {
        Corpus::from_examples(
            [
                polar(0.0, 1.0),
                polar(10.0, 1.0),
                polar(40.0, 1.0),
                polar(90.0, 1.0),
                polar(50.0, 10.0),
            ]
            .into_iter()
            .map(|v| Example::new(0, v))
            .collect(),
        )
        .unwrap()
    }

    fn settings(max_iterations: usize) -> LoopSettings {
        LoopSettings {
            max_iterations,
            empty_cluster: EmptyClusterPolicy::Freeze,
            parallel: true,
        }
    }

    fn run(max_iterations: usize) -> LoopOutcome {
        let corpus = two_round_corpus();
        let seeds = seed_centroids(&corpus, 2, SeedingMode::First, None);
        run_lloyd(&corpus, seeds.centroids, settings(max_iterations)).unwrap()
    }

    #[test]
    fn converges_after_second_round() {
        let outcome = run(10);
        assert_eq!(outcome.termination, Termination::Converged);
        assert_eq!(outcome.state.iteration, 2);
        assert_eq!(outcome.changes_per_round, vec![5, 1, 0]);
        let clusters: Vec<usize> = outcome
            .state
            .assignment
            .as_slice()
            .iter()
            .map(|c| c.index())
            .collect();
        assert_eq!(clusters, vec![0, 0, 1, 1, 1]);
    }

    #[test]
    fn cap_is_inclusive() {
        let stopped = run(1);
        assert_eq!(stopped.termination, Termination::Stopped);
        assert_eq!(stopped.state.iteration, 1);

        let converged = run(2);
        assert_eq!(converged.termination, Termination::Converged);
        assert_eq!(converged.state.iteration, 2);
    }

    #[test]
    fn duplicate_seed_leaves_empty_cluster_frozen() {
        let v = SparseVector::from([(0, 1.0)]);
        let corpus = Corpus::from_examples(vec![
            Example::new(0, v.clone()),
            Example::new(0, v.clone()),
        ])
        .unwrap();
        let seeds = seed_centroids(&corpus, 2, SeedingMode::First, None);
        let outcome = run_lloyd(&corpus, seeds.centroids, settings(5)).unwrap();
        assert_eq!(outcome.termination, Termination::Converged);
        assert_eq!(outcome.state.assignment.sizes(), vec![2, 0]);
        assert_eq!(outcome.state.centroids[1], v);
        assert_eq!(outcome.state.assignment.cluster_of(lloyd_core::ExampleId(1)), Some(ClusterId(0)));
    }

    #[test]
    fn empty_cluster_can_fail_the_run() {
        let v = SparseVector::from([(0, 1.0)]);
        let corpus =
            Corpus::from_examples(vec![Example::new(0, v.clone()), Example::new(0, v)]).unwrap();
        let seeds = seed_centroids(&corpus, 2, SeedingMode::First, None);
        let mut s = settings(5);
        s.empty_cluster = EmptyClusterPolicy::Fail;
        let err = run_lloyd(&corpus, seeds.centroids, s).unwrap_err();
        assert!(matches!(err, ClusteringError::EmptyCluster { iteration: 1, .. }));
    }
}
