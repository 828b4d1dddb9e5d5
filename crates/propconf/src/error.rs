//! Error types for propconf

use std::path::PathBuf;

/// Result type for propconf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in propconf operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Not found
    /// The name did not resolve to a readable resource under the mode
    #[error("Resource not found: {name} ({mode})")]
    ResourceNotFound { name: String, mode: &'static str },

    /// None of the requested names resolved
    #[error("None of {requested} requested resources could be resolved")]
    NoResourcesResolved { requested: usize },

    /// Lookup against a properties file that was never loaded
    #[error("Properties not loaded: {name}")]
    NotLoaded { name: String },

    /// The properties file is loaded but has no such field
    #[error("No property '{field}' in {name}")]
    FieldNotFound { name: String, field: String },

    /// Writer target has no open handle
    #[error("Configuration file is not open: {path}")]
    NotOpen { path: String },

    // Malformed input
    /// Field and value sequences of different lengths
    #[error("Fields and values are not paired: {fields} fields, {values} values")]
    FieldCountMismatch { fields: usize, values: usize },

    /// A physical path that cannot be turned into a locator
    #[error("Malformed path '{path}': {message}")]
    MalformedPath { path: String, message: String },

    /// Remote name lacking the configured scheme prefix
    #[error("Invalid prefix for remote path {name}: expected {expected}")]
    InvalidRemotePrefix { name: String, expected: String },

    /// Remote name that does not parse as a URI
    #[error("Invalid remote URI {uri}: {message}")]
    InvalidRemoteUri { uri: String, message: String },

    /// Reader options that fail to parse
    #[error("Failed to parse reader options at {path}: {message}")]
    Options { path: PathBuf, message: String },

    // Preconditions
    /// Writer used before a base directory was set
    #[error("Base directory must be set before opening a configuration file")]
    BaseDirNotSet,

    // Object stores
    /// No store bound for the scheme
    #[error("No object store registered for scheme '{scheme}'")]
    StoreUnavailable { scheme: String },

    /// A store is already bound for the scheme
    #[error("An object store is already registered for scheme '{scheme}'")]
    StoreAlreadyRegistered { scheme: String },

    // I/O
    /// Reading from an object store failed
    #[error("I/O error reading {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem error from propconf-fs
    #[error(transparent)]
    Fs(#[from] propconf_fs::Error),
}

impl Error {
    /// True for the "nothing found" family: missing resources, unloaded
    /// files, absent fields and unopened writer targets.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ResourceNotFound { .. }
                | Self::NoResourcesResolved { .. }
                | Self::NotLoaded { .. }
                | Self::FieldNotFound { .. }
                | Self::NotOpen { .. }
        )
    }
}
