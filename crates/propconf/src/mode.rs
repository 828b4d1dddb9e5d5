//! Resolution modes for turning a logical name into a readable resource

use serde::{Deserialize, Serialize};

/// How a properties name is located.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// Look the name up along the reader's search path.
    #[default]
    Classpath,
    /// Treat the name as a local filesystem path.
    PhysicalPath,
    /// Treat the name as a URI served by a registered object store.
    Remote(RemoteOptions),
}

impl LoadMode {
    /// Remote mode with the default scheme bindings.
    pub fn remote() -> Self {
        Self::Remote(RemoteOptions::default())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classpath => "classpath",
            Self::PhysicalPath => "physical-path",
            Self::Remote(_) => "remote",
        }
    }
}

impl std::fmt::Display for LoadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scheme bindings for remote loading.
///
/// `scheme` names the remote store (names must start with `scheme://`);
/// `fallback_scheme` is bound to the local filesystem store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteOptions {
    pub scheme: String,
    pub fallback_scheme: String,
}

impl RemoteOptions {
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            ..Self::default()
        }
    }

    /// The literal prefix remote names must carry, e.g. `hdfs://`.
    pub fn prefix(&self) -> String {
        format!("{}://", self.scheme)
    }
}

impl Default for RemoteOptions {
    fn default() -> Self {
        Self {
            scheme: "hdfs".to_string(),
            fallback_scheme: "file".to_string(),
        }
    }
}
