//! Normalized path handling for cross-platform compatibility

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Used as the stable registry key for writer targets, so two spellings of
/// the same location (`conf/./a.properties`, `conf\a.properties`) compare
/// equal once cleaned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    ///
    /// The segment is appended textually, so a segment with a leading slash
    /// still lands under this path.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Lexically clean the path: collapse repeated separators, drop `.`
    /// segments and fold `..` into the preceding segment.
    ///
    /// `..` directly under the root of an absolute path is discarded. Leading
    /// `..` segments of a relative path are kept.
    pub fn clean(&self) -> Self {
        let absolute = self.inner.starts_with('/');
        let mut segments: Vec<&str> = Vec::new();

        for segment in self.inner.split('/') {
            match segment {
                "" | "." => {}
                ".." => match segments.last() {
                    Some(&last) if last != ".." => {
                        segments.pop();
                    }
                    _ if absolute => {}
                    _ => segments.push(".."),
                },
                other => segments.push(other),
            }
        }

        let body = segments.join("/");
        let inner = match (absolute, body.is_empty()) {
            (true, _) => format!("/{body}"),
            (false, true) => ".".to_string(),
            (false, false) => body,
        };
        Self { inner }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }
}

/// Resolve `name` under `base` to the canonical path used as a writer key.
///
/// `base` must exist. The joined path is cleaned lexically, then its deepest
/// existing ancestor is canonicalized (symlinks resolved, no UNC prefix on
/// Windows) and the missing segments are appended. The key is therefore the
/// same before and after the target file is created.
///
/// # Errors
///
/// Returns [`Error::MalformedPath`] for an empty name and
/// [`Error::UnresolvableBase`] when `base` cannot be canonicalized.
pub fn canonical_target(base: &Path, name: &str) -> Result<NormalizedPath> {
    if name.trim().is_empty() {
        return Err(Error::MalformedPath {
            path: name.to_string(),
            message: "file name is empty".into(),
        });
    }

    let base = dunce::canonicalize(base).map_err(|source| Error::UnresolvableBase {
        path: base.to_path_buf(),
        source,
    })?;

    let target = NormalizedPath::new(base).join(name).clean().to_native();

    let mut existing = target.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(segment)) => {
                missing.push(segment);
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = dunce::canonicalize(existing).map_err(|e| Error::io(existing, e))?;
    resolved.extend(missing.into_iter().rev());
    Ok(NormalizedPath::new(resolved))
}

/// Canonicalize an existing file path without a UNC prefix on Windows.
pub fn canonical_file(path: &Path) -> Result<PathBuf> {
    dunce::canonicalize(path).map_err(|e| Error::io(path, e))
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_folds_parent_segments() {
        let path = NormalizedPath::new("/base/conf/../out/./a.properties");
        assert_eq!(path.clean().as_str(), "/base/out/a.properties");
    }

    #[test]
    fn clean_keeps_leading_parent_of_relative_path() {
        let path = NormalizedPath::new("../a//b");
        assert_eq!(path.clean().as_str(), "../a/b");
    }

    #[test]
    fn clean_of_empty_relative_path_is_dot() {
        assert_eq!(NormalizedPath::new("a/..").clean().as_str(), ".");
    }

    #[test]
    fn file_name_of_root_is_none() {
        assert_eq!(NormalizedPath::new("/").file_name(), None);
    }
}
