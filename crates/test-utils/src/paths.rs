//! Temporary directory helpers for tests that exercise file I/O (grid
//! binary formats, cache persistence).

use tempfile::TempDir;

/// A `tempfile::TempDir` that will be automatically cleaned up.
pub fn temp_test_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temporary test directory")
}

/// A `tempfile::TempDir` with the specified prefix.
pub fn temp_test_dir_with_prefix(prefix: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("failed to create temporary test directory")
}
