//! Resolution of logical properties names to resource locators
//!
//! Resolution never reads a resource. It only decides where one lives:
//!
//! - [`LoadMode::Classpath`] searches the [`SearchPath`] roots in order
//! - [`LoadMode::PhysicalPath`] converts the name to an absolute `file://` URL
//! - [`LoadMode::Remote`] validates the scheme prefix and parses the URI

use std::path::{Path, PathBuf};

use propconf_fs::NormalizedPath;
use url::Url;

use crate::mode::{LoadMode, RemoteOptions};
use crate::store::StoreRegistry;
use crate::{Error, Result};

/// Ordered list of root directories searched in classpath mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    roots: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// First root holding a regular file at `root/name`.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        self.roots
            .iter()
            .map(|root| NormalizedPath::new(root).join(name).clean().to_native())
            .find(|candidate| candidate.is_file())
    }
}

/// Strip embedded quotes and one leading `/` from a classpath name.
pub fn classpath_name(name: &str) -> String {
    let unquoted = name.replace('"', "");
    match unquoted.strip_prefix('/') {
        Some(rest) => rest.to_string(),
        None => unquoted,
    }
}

/// Resolve `name` under `mode`.
///
/// Remote resolution may bind the fallback store in `stores`.
pub fn resolve(
    name: &str,
    mode: &LoadMode,
    search_path: &SearchPath,
    stores: &mut StoreRegistry,
) -> Result<Url> {
    match mode {
        LoadMode::Classpath => resolve_classpath(name, search_path),
        LoadMode::PhysicalPath => resolve_physical(name),
        LoadMode::Remote(options) => resolve_remote(name, options, stores),
    }
}

fn resolve_classpath(name: &str, search_path: &SearchPath) -> Result<Url> {
    let cleaned = classpath_name(name);
    let not_found = || Error::ResourceNotFound {
        name: name.to_string(),
        mode: LoadMode::Classpath.as_str(),
    };

    if cleaned.is_empty() {
        return Err(not_found());
    }

    let Some(found) = search_path.find(&cleaned) else {
        tracing::debug!(resource = %name, roots = ?search_path.roots(), "resource not on search path");
        return Err(not_found());
    };

    let found = propconf_fs::path::canonical_file(&found)?;
    Url::from_file_path(&found).map_err(|_| Error::MalformedPath {
        path: found.display().to_string(),
        message: "cannot be expressed as a file URL".into(),
    })
}

fn resolve_physical(name: &str) -> Result<Url> {
    let malformed = |message: &str| Error::MalformedPath {
        path: name.to_string(),
        message: message.to_string(),
    };

    if name.is_empty() {
        tracing::error!("empty physical path");
        return Err(malformed("path is empty"));
    }

    let absolute = std::path::absolute(Path::new(name)).map_err(|e| {
        tracing::error!(resource = %name, error = %e, "cannot make path absolute");
        malformed(&e.to_string())
    })?;
    let absolute = NormalizedPath::new(absolute).clean().to_native();

    Url::from_file_path(&absolute).map_err(|_| {
        tracing::error!(resource = %name, "path cannot be expressed as a file URL");
        malformed("cannot be expressed as a file URL")
    })
}

fn resolve_remote(name: &str, options: &RemoteOptions, stores: &mut StoreRegistry) -> Result<Url> {
    let expected = options.prefix();
    if !name.starts_with(&expected) {
        tracing::warn!(resource = %name, %expected, "invalid prefix of file path for remote store");
        return Err(Error::InvalidRemotePrefix {
            name: name.to_string(),
            expected,
        });
    }

    if let Err(e) = stores.configure(options) {
        tracing::warn!(resource = %name, error = %e, "failed to initialize remote store");
        return Err(e);
    }

    Url::parse(name).map_err(|e| {
        tracing::warn!(resource = %name, error = %e, "failed to parse remote URI");
        Error::InvalidRemoteUri {
            uri: name.to_string(),
            message: e.to_string(),
        }
    })
}
