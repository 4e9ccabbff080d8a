//! Tests for registry behavior.
//!
//! Responsibilities:
//! - Test key normalization and prefix handling.
//! - Test environment/file precedence, including the empty-env short-circuit.
//! - Test set/save/write/invalidate round-trips through the shared cache.
//! - Test typed accessors end to end.
//!
//! Invariants:
//! - Tests that touch environment variables use `serial_test` and `temp_env`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use crate::cache::CacheStore;
use crate::registry::Registry;

pub mod typed_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Writes `content` to `name` inside `dir` and returns the path.
pub fn write_env_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write test env file");
    path
}

/// A registry over a fresh temp file with a private cache.
pub fn registry_for(content: &str) -> (Registry, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let path = write_env_file(temp_dir.path(), "app.env", content);
    (Registry::new(path, Arc::new(CacheStore::new())), temp_dir)
}
