//! Integration tests for lloyd-engine: end-to-end training runs on fixtures.

use lloyd_core::config::{
    DocumentFrequency, EmptyClusterPolicy, LloydConfig, SeedingMode, WeightingScheme,
};
use lloyd_core::{ClusterId, Corpus, Example, ExampleId, FeatureIndex, Label, SparseVector};
use lloyd_engine::algorithms::weighting::apply_tfidf;
use lloyd_engine::evaluation;
use lloyd_engine::pipeline::{assign, seed_centroids};
use lloyd_engine::{purity, train, ClusteringEngine, Termination};
use test_fixtures::load_corpus_fixture;

fn engine(k: usize, tweak: impl FnOnce(&mut LloydConfig)) -> ClusteringEngine {
    let mut config = LloydConfig::default();
    config.clustering.k = Some(k);
    tweak(&mut config);
    ClusteringEngine::new(config).unwrap()
}

fn clusters(result: &lloyd_engine::ClusteringResult) -> Vec<usize> {
    result.assignment.as_slice().iter().map(|c| c.index()).collect()
}

#[test]
fn four_document_scenario() {
    let mut corpus = load_corpus_fixture("four_documents").corpus;
    let result = train(&mut corpus, 2, 10, SeedingMode::First).unwrap();

    assert_eq!(result.seeds, vec![ExampleId(0), ExampleId(2)]);
    assert_eq!(clusters(&result), vec![0, 0, 1, 1]);
    assert!(result.converged());
    assert_eq!(result.iterations, 1);

    // Centroids are the members' means; in raw-count units (1.5, 0) and (0, 1.5).
    let idf = result.idf.get(FeatureIndex(0)).unwrap();
    assert!((idf - (4.0f64 / 3.0).ln()).abs() < 1e-12);
    assert!((result.centroids[0].get(FeatureIndex(0)) * idf - 1.5).abs() < 1e-9);
    assert_eq!(result.centroids[0].get(FeatureIndex(1)), 0.0);
    assert!((result.centroids[1].get(FeatureIndex(1)) * idf - 1.5).abs() < 1e-9);

    let report = purity(&result, &corpus);
    assert_eq!(report.overall, 1.0);
    assert_eq!(report.per_cluster[&ClusterId(0)], 1.0);
    assert_eq!(report.per_cluster[&ClusterId(1)], 1.0);
}

#[test]
fn three_topics_are_recovered() {
    let fixture = load_corpus_fixture("three_topics");
    let mut corpus = fixture.corpus;
    let result = engine(fixture.k, |_| {}).train(&mut corpus).unwrap();

    assert_eq!(result.seeds, vec![ExampleId(0), ExampleId(1), ExampleId(2)]);
    assert!(result.converged());
    assert_eq!(result.cluster_sizes(), vec![4, 4, 4]);
    assert_eq!(result.purity(&corpus).overall, 1.0);
    assert_eq!(result.changes_per_round, vec![12, 0]);
}

#[test]
fn feature_present_in_every_document_is_neutralised() {
    let mut corpus = load_corpus_fixture("three_topics").corpus;
    let result = train(&mut corpus, 3, 10, SeedingMode::First).unwrap();
    // Feature 100 occurs once per document: df == N, idf == 0.
    assert_eq!(result.idf.get(FeatureIndex(100)), Some(0.0));
    assert!(corpus
        .examples()
        .iter()
        .all(|e| e.feature(FeatureIndex(100)) == 0.0));
}

#[test]
fn single_cluster_purity_is_majority_share() {
    let mut corpus = load_corpus_fixture("three_topics").corpus;
    let result = train(&mut corpus, 1, 10, SeedingMode::First).unwrap();
    assert!(result.assignment.as_slice().iter().all(|&c| c == ClusterId(0)));
    assert!((result.purity(&corpus).overall - 4.0 / 12.0).abs() < 1e-12);
}

#[test]
fn too_few_clusters_lowers_purity() {
    let mut corpus = load_corpus_fixture("three_topics").corpus;
    let result = train(&mut corpus, 2, 10, SeedingMode::First).unwrap();
    // The third topic shares no weighted feature with either seed and
    // falls into cluster 0.
    assert!((result.purity(&corpus).overall - 8.0 / 12.0).abs() < 1e-12);
}

#[test]
fn one_centroid_per_example_is_pure_before_any_update() {
    let mut corpus = load_corpus_fixture("three_topics").corpus;
    let n = corpus.len();
    apply_tfidf(&mut corpus, &Default::default()).unwrap();
    let seeds = seed_centroids(&corpus, n, SeedingMode::First, None);
    let initial = assign(&corpus, &seeds.centroids, None, true);

    let mut sizes = initial.assignment.sizes();
    sizes.sort();
    assert_eq!(sizes, vec![1; n]);
    assert_eq!(evaluation::overall_purity(&corpus, &initial.assignment), 1.0);
}

#[test]
fn zero_vector_example_lands_in_cluster_zero() {
    let mut corpus = Corpus::from_examples(vec![
        Example::new(0, SparseVector::from([(0, 2.0)])),
        Example::new(1, SparseVector::from([(1, 2.0)])),
        Example::new(1, SparseVector::new()),
    ])
    .unwrap();
    let result = train(&mut corpus, 2, 10, SeedingMode::First).unwrap();
    assert_eq!(result.assignment.cluster_of(ExampleId(2)), Some(ClusterId(0)));
    assert!(result
        .centroids
        .iter()
        .all(|c| c.iter().all(|(_, w)| w.is_finite())));
    assert!((result.purity(&corpus).overall - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn alternative_weighting_conventions_agree_on_separable_topics() {
    let mut corpus = load_corpus_fixture("three_topics").corpus;
    let result = engine(3, |c| {
        c.weighting.scheme = Some(WeightingScheme::Multiply);
        c.weighting.document_frequency = Some(DocumentFrequency::DocumentCount);
    })
    .train(&mut corpus)
    .unwrap();
    assert_eq!(result.idf.scheme(), WeightingScheme::Multiply);
    assert_eq!(result.purity(&corpus).overall, 1.0);
}

#[test]
fn seeded_random_runs_are_reproducible() {
    let base = load_corpus_fixture("three_topics").corpus;
    let run = || {
        let mut corpus = base.clone();
        engine(3, |c| {
            c.clustering.seeding = Some(SeedingMode::Random);
            c.clustering.seed = Some(42);
        })
        .train(&mut corpus)
        .unwrap()
    };
    let (a, b) = (run(), run());
    assert_eq!(a.seeds, b.seeds);
    assert_eq!(a.assignment, b.assignment);
}

#[test]
fn sequential_and_parallel_runs_match() {
    let base = load_corpus_fixture("three_topics").corpus;
    let mut c1 = base.clone();
    let mut c2 = base;
    let par = engine(2, |_| {}).train(&mut c1).unwrap();
    let seq = engine(2, |c| c.clustering.parallel = Some(false))
        .train(&mut c2)
        .unwrap();
    assert_eq!(par.assignment, seq.assignment);
    assert_eq!(par.centroids, seq.centroids);
}

#[test]
fn failing_empty_cluster_policy_aborts() {
    let v = SparseVector::from([(0, 1.0), (1, 1.0)]);
    let mut corpus = Corpus::from_examples(vec![
        Example::new(0, v.clone()),
        Example::new(0, v),
        Example::new(1, SparseVector::from([(2, 1.0)])),
    ])
    .unwrap();
    let err = engine(3, |c| c.clustering.empty_cluster = Some(EmptyClusterPolicy::Fail))
        .train(&mut corpus)
        .unwrap_err();
    assert_eq!(
        lloyd_core::errors::LloydErrorCode::error_code(&err),
        "EMPTY_CLUSTER"
    );
}

#[test]
fn single_update_suffices_for_three_topics() {
    let mut corpus = load_corpus_fixture("three_topics").corpus;
    let result = train(&mut corpus, 3, 1, SeedingMode::First).unwrap();
    assert_eq!(result.iterations, 1);
    assert_eq!(result.termination, Termination::Converged);
}

/// Unit vectors at 0°, 10°, 40° and 90° plus a long one at 50°. Seeds land on
/// 0° and 90°; the 40° example only moves after the first update.
fn two_round_corpus() -> Corpus {
    let at = |deg: f64, mag: f64| {
        let r = deg.to_radians();
        SparseVector::from([(0, mag * r.cos()), (1, mag * r.sin())])
    };
    Corpus::from_examples(vec![
        Example::new(0, SparseVector::from([(0, 1.0)])),
        Example::new(0, at(10.0, 1.0)),
        Example::new(1, at(40.0, 1.0)),
        Example::new(1, SparseVector::from([(1, 1.0)])),
        Example::new(1, at(50.0, 10.0)),
    ])
    .unwrap()
}

/// Document-count IDF is identical for both features here, so weighting
/// scales every vector uniformly and leaves the angles intact.
fn uniform_weighting(k: usize, max_iterations: usize) -> ClusteringEngine {
    engine(k, |c| {
        c.clustering.max_iterations = Some(max_iterations);
        c.weighting.scheme = Some(WeightingScheme::Multiply);
        c.weighting.document_frequency = Some(DocumentFrequency::DocumentCount);
    })
}

#[test]
fn iteration_cap_reports_stopped_not_error() {
    let mut corpus = two_round_corpus();
    let result = uniform_weighting(2, 1).train(&mut corpus).unwrap();

    assert_eq!(result.seeds, vec![ExampleId(0), ExampleId(3)]);
    assert_eq!(result.termination, Termination::Stopped);
    assert!(!result.converged());
    assert_eq!(result.iterations, 1);
    assert_eq!(result.changes_per_round.len(), 2);
    assert_eq!(result.changes_per_round, vec![5, 1]);
    assert_eq!(clusters(&result), vec![0, 0, 1, 1, 1]);
}

#[test]
fn raising_the_cap_lets_the_same_run_converge() {
    let mut corpus = two_round_corpus();
    let result = uniform_weighting(2, 2).train(&mut corpus).unwrap();

    assert!(result.converged());
    assert_eq!(result.iterations, 2);
    assert_eq!(result.changes_per_round, vec![5, 1, 0]);
    assert_eq!(result.purity(&corpus).overall, 1.0);
}

#[test]
fn trained_corpus_survives_json() {
    // Term-total counts above the corpus size give negative IDF for feature 0.
    let mut corpus = Corpus::from_examples(vec![
        Example::new(0, SparseVector::from([(0, 4.0), (1, 1.0)])),
        Example::new(1, SparseVector::from([(0, 1.0), (2, 1.0)])),
    ])
    .unwrap();
    train(&mut corpus, 2, 10, SeedingMode::First).unwrap();
    assert!(corpus.examples()[0].feature(FeatureIndex(0)) < 0.0);

    let json = serde_json::to_string(&corpus).unwrap();
    let back: Corpus = serde_json::from_str(&json).unwrap();
    assert!(back.is_weighted());
    assert_eq!(back.features(), corpus.features());
    for (restored, original) in back.examples().iter().zip(corpus.examples()) {
        assert_eq!(restored.label, original.label);
        for (feature, weight) in original.features.iter() {
            assert!((restored.feature(feature) - weight).abs() < 1e-12);
        }
    }
}

#[test]
fn out_of_sample_classification() {
    let mut corpus = load_corpus_fixture("three_topics").corpus;
    let result = train(&mut corpus, 3, 10, SeedingMode::First).unwrap();
    let unseen = Example::new(-1, SparseVector::from([(20, 3.0), (999, 5.0)]));
    let cluster = result.classify(&unseen);
    assert_eq!(cluster, ClusterId(2));
    assert_eq!(result.predict_label(&unseen, &corpus), Some(Label(2)));
    assert_eq!(result.members(cluster).len(), 4);
}
