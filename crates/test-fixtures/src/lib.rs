//! Test doubles and golden-fixture loading shared by the pattern crates.
//!
//! Stores, sanitizers, and embedders here are deterministic and in-memory so
//! routing and policy tests can script every collaborator outcome.

mod embedder;
mod sanitizers;
mod store;

use std::path::PathBuf;

use serde::de::DeserializeOwned;

pub use embedder::BagOfWordsEmbedder;
pub use sanitizers::{FailingSanitizer, ScriptedSanitizer};
pub use store::InMemoryPatternStore;

/// Root directory of the JSON fixture data.
///
/// Walks up from the calling crate until it finds a `test-fixtures` directory
/// that is not itself a crate.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);
    loop {
        let candidate = path.join("test-fixtures");
        if candidate.is_dir() && !candidate.join("Cargo.toml").exists() {
            return candidate;
        }
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
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

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}
