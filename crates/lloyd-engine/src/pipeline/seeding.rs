//! Farthest-point seeding in similarity space.
//!
//! The first centroid is the first example (or a random one). Each later
//! centroid is the not-yet-chosen example whose similarity to its nearest
//! chosen centroid is smallest; ties go to the earlier example. Cost is
//! O(k · N · F).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use lloyd_core::config::SeedingMode;
use lloyd_core::{Corpus, ExampleId, SparseVector};

use super::Centroid;
use crate::algorithms::similarity::cosine_with_norms;

/// Chosen seed examples and their vectors, in selection order.
#[derive(Debug, Clone)]
pub struct Seeds {
    pub examples: Vec<ExampleId>,
    pub centroids: Vec<Centroid>,
}

/// Pick the index of the first centroid.
fn first_seed(n: usize, mode: SeedingMode, seed: Option<u64>) -> usize {
    match mode {
        SeedingMode::First => 0,
        SeedingMode::Random => {
            let mut rng = match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            };
            rng.gen_range(0..n)
        }
    }
}

/// Select `k` examples of `corpus` as initial centroids.
///
/// `k` must already be validated against the corpus size; it is clamped to
/// it here so a bad call cannot loop forever.
pub fn seed_centroids(corpus: &Corpus, k: usize, mode: SeedingMode, seed: Option<u64>) -> Seeds {
    let n = corpus.len();
    let k = k.min(n);
    if k == 0 {
        return Seeds {
            examples: Vec::new(),
            centroids: Vec::new(),
        };
    }

    let examples = corpus.examples();
    let norms: Vec<f64> = examples.iter().map(|e| e.features.norm()).collect();

    let mut chosen = vec![false; n];
    // Similarity of each example to its nearest chosen centroid.
    let mut best = vec![f64::NEG_INFINITY; n];
    let mut picks = Vec::with_capacity(k);

    let mut next = first_seed(n, mode, seed);
    loop {
        chosen[next] = true;
        picks.push(ExampleId(next));
        if picks.len() == k {
            break;
        }

        let seed_vec = &examples[next].features;
        let seed_norm = norms[next];
        let mut farthest: Option<(usize, f64)> = None;
        for (i, example) in examples.iter().enumerate() {
            if chosen[i] {
                continue;
            }
            let sim = cosine_with_norms(&example.features, norms[i], seed_vec, seed_norm);
            if sim > best[i] {
                best[i] = sim;
            }
            match farthest {
                Some((_, min)) if best[i] >= min => {}
                _ => farthest = Some((i, best[i])),
            }
        }
        match farthest {
            Some((i, _)) => next = i,
            None => break,
        }
    }

    debug!(k, seeds = ?picks, %mode, "seeded centroids");

    let centroids = picks
        .iter()
        .map(|id| examples[id.index()].features.clone())
        .collect::<Vec<SparseVector>>();

    Seeds {
        examples: picks,
        centroids,
    }
}
