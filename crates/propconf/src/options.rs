//! Reader options
//!
//! Options can be built in code, read from a TOML file, or taken from the
//! `PROPCONF_PATH` environment variable:
//!
//! ```toml
//! search_path = ["conf", "/etc/myapp"]
//!
//! [remote]
//! scheme = "hdfs"
//! fallback_scheme = "file"
//! ```

use std::ffi::OsStr;
use std::path::PathBuf;

use propconf_fs::NormalizedPath;
use serde::{Deserialize, Serialize};

use crate::mode::RemoteOptions;
use crate::{Error, Result};

/// Environment variable holding the search path, in the platform's
/// path-list syntax (`:`-separated on Unix, `;` on Windows).
pub const SEARCH_PATH_ENV: &str = "PROPCONF_PATH";

/// Settings for a [`Configuration`](crate::Configuration).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Roots searched, in order, by classpath-mode loads.
    pub search_path: Vec<PathBuf>,

    /// Scheme bindings used by [`LoadMode::remote`](crate::LoadMode::remote).
    pub remote: RemoteOptions,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            search_path: vec![PathBuf::from(".")],
            remote: RemoteOptions::default(),
        }
    }
}

impl ReaderOptions {
    /// Parse options from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Options {
            path: PathBuf::from("<string>"),
            message: e.to_string(),
        })
    }

    /// Read options from a TOML file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let content = propconf_fs::io::read_text(path)?;
        toml::from_str(&content).map_err(|e| Error::Options {
            path: path.to_native(),
            message: e.to_string(),
        })
    }

    /// Options whose search path comes from [`SEARCH_PATH_ENV`].
    ///
    /// Falls back to the defaults when the variable is unset or empty.
    pub fn from_env() -> Self {
        match std::env::var_os(SEARCH_PATH_ENV) {
            Some(value) => Self::from_path_list(&value),
            None => Self::default(),
        }
    }

    /// Options whose search path is parsed from a platform path list.
    ///
    /// Empty entries are skipped; an entirely empty list yields the defaults.
    pub fn from_path_list(list: &OsStr) -> Self {
        let search_path: Vec<PathBuf> = std::env::split_paths(list)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();

        if search_path.is_empty() {
            return Self::default();
        }

        Self {
            search_path,
            ..Self::default()
        }
    }
}
