//! Properties reader with a per-name cache
//!
//! Working flow:
//!
//! 1. Construct a [`Configuration`] (or borrow the shared one)
//! 2. [`load_properties`](Configuration::load_properties) a name under a mode
//! 3. [`read_property`](Configuration::read_property) fields by that same name

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use propconf_fs::NormalizedPath;
use url::Url;

use crate::format;
use crate::item::ConfigItem;
use crate::mode::LoadMode;
use crate::options::ReaderOptions;
use crate::resource::{self, SearchPath};
use crate::store::{ObjectStore, StoreRegistry};
use crate::traits::Configurable;
use crate::{Error, Result};

/// Loads properties files and answers lookups against them.
///
/// Loaded files are cached under the name they were loaded with; reloading a
/// name replaces its cached fields wholesale.
#[derive(Debug)]
pub struct Configuration {
    properties: HashMap<String, ConfigItem>,
    base_dir: Option<String>,
    search_path: SearchPath,
    stores: StoreRegistry,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(ReaderOptions::default())
    }
}

impl Configuration {
    pub fn new(options: ReaderOptions) -> Self {
        Self {
            properties: HashMap::new(),
            base_dir: None,
            search_path: SearchPath::new(options.search_path),
            stores: StoreRegistry::new(),
        }
    }

    pub fn with_search_path(search_path: SearchPath) -> Self {
        Self {
            search_path,
            ..Self::default()
        }
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    /// Bind an object store for remote loading.
    ///
    /// # Errors
    ///
    /// [`Error::StoreAlreadyRegistered`] when `scheme` already has a store.
    pub fn register_store(&mut self, scheme: &str, store: Arc<dyn ObjectStore>) -> Result<()> {
        self.stores.register(scheme, store)
    }

    /// Location recorded by the most recent successful load.
    ///
    /// This is a single value shared by all loads, not tracked per name.
    pub fn base_dir(&self) -> Option<&str> {
        self.base_dir.as_deref()
    }

    /// Cached fields for `name`, if it has been loaded.
    pub fn properties(&self, name: &str) -> Option<&ConfigItem> {
        self.properties.get(name)
    }

    /// Resolve `name` to a locator without reading it.
    pub fn get_resource(&mut self, name: &str, mode: &LoadMode) -> Result<Url> {
        resource::resolve(name, mode, &self.search_path, &mut self.stores)
    }

    /// Resolve several names, dropping the ones that fail.
    ///
    /// # Errors
    ///
    /// [`Error::NoResourcesResolved`] when nothing resolved, including for an
    /// empty `names`.
    pub fn get_resources<S: AsRef<str>>(&mut self, names: &[S], mode: &LoadMode) -> Result<Vec<Url>> {
        let resolved: Vec<Url> = names
            .iter()
            .filter_map(|name| self.get_resource(name.as_ref(), mode).ok())
            .collect();

        if resolved.is_empty() {
            return Err(Error::NoResourcesResolved {
                requested: names.len(),
            });
        }
        Ok(resolved)
    }

    /// Load and cache the properties at `name`.
    ///
    /// The cache is only touched when the whole load succeeds.
    ///
    /// # Errors
    ///
    /// - [`Error::ResourceNotFound`] when `name` does not resolve or the
    ///   resolved object does not exist
    /// - [`Error::InvalidRemotePrefix`] for a remote name without the scheme
    /// - [`Error::Io`] when the object exists but cannot be read
    pub fn load_properties(&mut self, name: &str, mode: &LoadMode) -> Result<()> {
        let location = match self.get_resource(name, mode) {
            Ok(location) => location,
            Err(Error::StoreUnavailable { scheme }) => {
                tracing::warn!(resource = %name, %scheme, "no remote store configured");
                return Err(self.not_found(name, mode));
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!(resource = %name, %mode, "resource not found");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        let stream = match self.stores.open(&location) {
            Ok(stream) => stream,
            Err(Error::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(resource = %name, %location, "resource does not exist");
                return Err(self.not_found(name, mode));
            }
            Err(Error::StoreUnavailable { scheme }) => {
                tracing::warn!(resource = %name, %scheme, "no store for resolved location");
                return Err(self.not_found(name, mode));
            }
            Err(e) => {
                tracing::error!(resource = %name, %location, error = %e, "failed to open resource");
                return Err(e);
            }
        };

        let origin = NormalizedPath::new(location.as_str());
        let text = propconf_fs::io::read_stream(stream, &origin).map_err(|e| {
            tracing::error!(resource = %name, %location, error = %e, "failed to read resource");
            e
        })?;
        let item = format::parse(&text);

        self.base_dir = Some(match mode {
            LoadMode::PhysicalPath => name.to_string(),
            LoadMode::Classpath | LoadMode::Remote(_) => location.path().to_string(),
        });

        tracing::debug!(resource = %name, %mode, fields = item.size(), "loaded properties");
        self.properties.insert(name.to_string(), item);
        Ok(())
    }

    /// Value of `field` in the properties loaded as `name`.
    ///
    /// # Errors
    ///
    /// [`Error::NotLoaded`] when `name` was never loaded and
    /// [`Error::FieldNotFound`] when it has no such field.
    pub fn read_property(&self, name: &str, field: &str) -> Result<&str> {
        let item = self.loaded(name)?;
        item.get(field).ok_or_else(|| {
            tracing::warn!(resource = %name, field, "no property exists");
            Error::FieldNotFound {
                name: name.to_string(),
                field: field.to_string(),
            }
        })
    }

    /// Field names of the properties loaded as `name`.
    pub fn property_names(&self, name: &str) -> Result<Vec<&str>> {
        Ok(self.loaded(name)?.fields().collect())
    }

    /// Owned variant of [`property_names`](Self::property_names).
    pub fn property_names_list(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.loaded(name)?.fields().map(str::to_string).collect())
    }

    fn loaded(&self, name: &str) -> Result<&ConfigItem> {
        self.properties.get(name).ok_or_else(|| {
            tracing::warn!(resource = %name, "no property is initialized");
            Error::NotLoaded {
                name: name.to_string(),
            }
        })
    }

    fn not_found(&self, name: &str, mode: &LoadMode) -> Error {
        Error::ResourceNotFound {
            name: name.to_string(),
            mode: mode.as_str(),
        }
    }
}

impl Configurable for Configuration {
    fn load_properties(&mut self, name: &str, mode: &LoadMode) -> Result<()> {
        Configuration::load_properties(self, name, mode)
    }

    fn get_resource(&mut self, name: &str, mode: &LoadMode) -> Result<Url> {
        Configuration::get_resource(self, name, mode)
    }

    fn read_property(&self, name: &str, field: &str) -> Result<&str> {
        Configuration::read_property(self, name, field)
    }

    fn property_names(&self, name: &str) -> Result<Vec<&str>> {
        Configuration::property_names(self, name)
    }
}
