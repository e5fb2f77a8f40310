//! Test fixture loader for lloyd corpus fixtures.
//!
//! Fixtures live in the workspace-level `test-fixtures/corpora/` directory as
//! JSON documents of the form `{ "description", "k", "corpus" }`, where
//! `corpus` is the wire shape `lloyd_core::Corpus` deserializes from.

use std::path::PathBuf;

use lloyd_core::Corpus;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// A corpus fixture with the cluster count it was designed for.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusFixture {
    pub description: String,
    pub k: usize,
    pub corpus: Corpus,
}

/// Root directory of the fixture data.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up until the data directory
    // appears (the crate directory shares the name, so look for a subdirectory).
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("corpora").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures/corpora from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load `test-fixtures/corpora/<name>.json`.
pub fn load_corpus_fixture(name: &str) -> CorpusFixture {
    load_fixture(&format!("corpora/{name}.json"))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}
