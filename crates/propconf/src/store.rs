//! Object stores that serve resource locators as byte streams
//!
//! A store is bound to a URL scheme in a [`StoreRegistry`]. The reader hands
//! every resolved locator to the store registered for its scheme, so a real
//! distributed-filesystem client only has to implement [`ObjectStore`].

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::sync::Arc;

use url::Url;

use crate::mode::RemoteOptions;
use crate::{Error, Result};

/// Scheme served by [`LocalObjectStore`].
pub const FILE_SCHEME: &str = "file";

/// A source of readable objects addressed by URL.
pub trait ObjectStore: Send + Sync {
    /// Open the object at `location` for reading.
    ///
    /// A missing object must be reported with [`io::ErrorKind::NotFound`].
    fn open(&self, location: &Url) -> io::Result<Box<dyn Read + Send>>;
}

/// Serves `file://` locators from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalObjectStore;

impl ObjectStore for LocalObjectStore {
    fn open(&self, location: &Url) -> io::Result<Box<dyn Read + Send>> {
        let path = location.to_file_path().map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a local file locator: {location}"),
            )
        })?;
        Ok(Box::new(File::open(path)?))
    }
}

/// Objects held in memory, keyed by their full URL.
#[derive(Debug, Default, Clone)]
pub struct MemoryObjectStore {
    objects: HashMap<String, Vec<u8>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object. `uri` is normalized the same way resolved locators are.
    pub fn insert(&mut self, uri: &str, content: impl Into<Vec<u8>>) {
        let key = Url::parse(uri)
            .map(String::from)
            .unwrap_or_else(|_| uri.to_string());
        self.objects.insert(key, content.into());
    }

    pub fn with_object(mut self, uri: &str, content: impl Into<Vec<u8>>) -> Self {
        self.insert(uri, content);
        self
    }
}

impl ObjectStore for MemoryObjectStore {
    fn open(&self, location: &Url) -> io::Result<Box<dyn Read + Send>> {
        match self.objects.get(location.as_str()) {
            Some(content) => Ok(Box::new(Cursor::new(content.clone()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no object at {location}"),
            )),
        }
    }
}

/// Scheme to store bindings.
///
/// Starts with [`LocalObjectStore`] bound to `file`.
#[derive(Clone)]
pub struct StoreRegistry {
    stores: HashMap<String, Arc<dyn ObjectStore>>,
}

impl Default for StoreRegistry {
    fn default() -> Self {
        let mut stores: HashMap<String, Arc<dyn ObjectStore>> = HashMap::new();
        stores.insert(FILE_SCHEME.to_string(), Arc::new(LocalObjectStore));
        Self { stores }
    }
}

impl std::fmt::Debug for StoreRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut schemes: Vec<&str> = self.stores.keys().map(String::as_str).collect();
        schemes.sort_unstable();
        f.debug_struct("StoreRegistry")
            .field("schemes", &schemes)
            .finish()
    }
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with no bindings at all.
    pub fn empty() -> Self {
        Self {
            stores: HashMap::new(),
        }
    }

    /// Bind `store` to `scheme`.
    ///
    /// # Errors
    ///
    /// [`Error::StoreAlreadyRegistered`] when the scheme is already bound;
    /// the existing binding is kept.
    pub fn register(&mut self, scheme: &str, store: Arc<dyn ObjectStore>) -> Result<()> {
        if self.stores.contains_key(scheme) {
            return Err(Error::StoreAlreadyRegistered {
                scheme: scheme.to_string(),
            });
        }
        self.stores.insert(scheme.to_string(), store);
        Ok(())
    }

    pub fn get(&self, scheme: &str) -> Option<&Arc<dyn ObjectStore>> {
        self.stores.get(scheme)
    }

    /// Prepare the registry for remote loading.
    ///
    /// Binds the local store to the fallback scheme (an existing binding is
    /// left as is) and checks that the remote scheme has a store.
    pub fn configure(&mut self, options: &RemoteOptions) -> Result<Arc<dyn ObjectStore>> {
        match self.register(&options.fallback_scheme, Arc::new(LocalObjectStore)) {
            Ok(()) | Err(Error::StoreAlreadyRegistered { .. }) => {}
            Err(e) => return Err(e),
        }

        self.get(&options.scheme)
            .cloned()
            .ok_or_else(|| Error::StoreUnavailable {
                scheme: options.scheme.clone(),
            })
    }

    /// Open `location` with the store bound to its scheme.
    pub fn open(&self, location: &Url) -> Result<Box<dyn Read + Send>> {
        let store = self
            .get(location.scheme())
            .ok_or_else(|| Error::StoreUnavailable {
                scheme: location.scheme().to_string(),
            })?;
        store.open(location).map_err(|source| Error::Io {
            location: location.to_string(),
            source,
        })
    }
}
