//! Paths to the sample resources under `test-fixtures/resources`.

use std::path::PathBuf;

/// Root of the checked-in sample resources.
pub fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("test-fixtures")
        .join("resources")
}

/// Full path of a named sample resource.
pub fn path(name: &str) -> PathBuf {
    root().join(name)
}
