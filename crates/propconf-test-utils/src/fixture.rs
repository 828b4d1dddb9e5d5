//! [`TestDir`] builder for properties-file scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory with helpers for writing and checking
/// properties files.
///
/// # Example
///
/// ```rust,no_run
/// use propconf_test_utils::fixture::TestDir;
///
/// let dir = TestDir::new();
/// dir.write_properties("db.properties", &[("host", "localhost")]);
/// dir.assert_file_contains("db.properties", "host=localhost");
/// ```
pub struct TestDir {
    temp_dir: TempDir,
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Join `name` onto the root.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Create a subdirectory (and parents) under the root.
    pub fn mkdir(&self, name: &str) -> PathBuf {
        let dir = self.path(name);
        fs::create_dir_all(&dir)
            .unwrap_or_else(|e| panic!("TestDir::mkdir: failed to create {}: {e}", dir.display()));
        dir
    }

    /// Write raw text to `name`, creating parent directories.
    pub fn write_raw(&self, name: &str, content: &str) -> PathBuf {
        let file = self.path(name);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&file, content)
            .unwrap_or_else(|e| panic!("TestDir::write_raw: failed to write {}: {e}", file.display()));
        file
    }

    /// Write `key=value` lines to `name`.
    pub fn write_properties(&self, name: &str, pairs: &[(&str, &str)]) -> PathBuf {
        let content: String = pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect();
        self.write_raw(name, &content)
    }

    /// Read `name` (relative to the root) as text.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, name: &str) -> String {
        let file = self.path(name);
        fs::read_to_string(&file)
            .unwrap_or_else(|_| panic!("Could not read file: {}", file.display()))
    }

    /// Assert that `name` (relative to the root) exists.
    pub fn assert_file_exists(&self, name: &str) {
        let full_path = self.path(name);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `name` (relative to the root) does **not** exist.
    pub fn assert_file_not_exists(&self, name: &str) {
        let full_path = self.path(name);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `name` contains `content`.
    pub fn assert_file_contains(&self, name: &str, content: &str) {
        let file_content = self.read(name);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            self.path(name).display(),
            content,
            file_content
        );
    }
}
