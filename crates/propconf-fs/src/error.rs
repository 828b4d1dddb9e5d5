//! Error types for propconf-fs

use std::path::PathBuf;

/// Result type for propconf-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in propconf-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed path '{path}': {message}")]
    MalformedPath { path: String, message: String },

    #[error("Base directory cannot be resolved: {path}")]
    UnresolvableBase {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying failure is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io { source, .. } | Self::UnresolvableBase { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            Self::MalformedPath { .. } => false,
        }
    }
}
