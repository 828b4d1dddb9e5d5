//! Properties writer with per-target pending content
//!
//! Targets are named relative to a base directory. Every registry (open
//! handles, pending fields, headers) is keyed by the target's canonical path,
//! so `a.properties` and `./sub/../a.properties` address the same target.
//!
//! Open handles are closed by [`close`](ConfigWriter::close),
//! [`delete`](ConfigWriter::delete), [`close_all`](ConfigWriter::close_all),
//! or when the writer is dropped.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use propconf_fs::io::{self, TextWriter};
use propconf_fs::{NormalizedPath, canonical_target};

use crate::format;
use crate::item::ConfigItem;
use crate::traits::ConfigWritable;
use crate::{Error, Result};

/// Accumulates fields per target and writes them out on request.
#[derive(Debug, Default)]
pub struct ConfigWriter {
    base_dir: Option<PathBuf>,
    handles: HashMap<NormalizedPath, TextWriter>,
    items: HashMap<NormalizedPath, ConfigItem>,
    headers: HashMap<NormalizedPath, String>,
}

impl ConfigWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the directory targets are resolved against.
    ///
    /// A missing directory or a non-directory is logged, not rejected;
    /// later calls that need the directory will fail.
    pub fn set_base_dir(&mut self, dir: impl AsRef<Path>) {
        let dir = dir.as_ref();
        if !dir.exists() {
            tracing::warn!(dir = %dir.display(), "base directory doesn't exist");
        } else if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "base directory is not a directory");
        }
        self.base_dir = Some(dir.to_path_buf());
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Whether `name` currently has an open handle.
    pub fn is_open(&self, name: &str) -> bool {
        self.target(name)
            .map(|key| self.handles.contains_key(&key))
            .unwrap_or(false)
    }

    /// Canonical paths of all open targets.
    pub fn open_targets(&self) -> Vec<&NormalizedPath> {
        let mut targets: Vec<&NormalizedPath> = self.handles.keys().collect();
        targets.sort();
        targets
    }

    /// Pending fields for `name`, if any were added.
    pub fn pending(&self, name: &str) -> Option<&ConfigItem> {
        self.target(name).ok().and_then(|key| self.items.get(&key))
    }

    /// Create or truncate `name` under the base directory and keep it open.
    ///
    /// Reopening an open target truncates it again.
    ///
    /// # Errors
    ///
    /// [`Error::BaseDirNotSet`] before [`set_base_dir`](Self::set_base_dir),
    /// or a filesystem error when the file cannot be created.
    pub fn open(&mut self, name: &str) -> Result<NormalizedPath> {
        let Some(base) = self.base_dir.clone() else {
            tracing::error!(target_name = %name, "base directory must be set before creating a property file");
            return Err(Error::BaseDirNotSet);
        };

        let path = canonical_target(&base, name).map_err(|e| {
            tracing::error!(target_name = %name, error = %e, "can't create property file (wrong path)");
            e
        })?;

        if let Some(previous) = self.handles.remove(&path) {
            if let Err(e) = io::close(previous, &path) {
                tracing::warn!(path = %path, error = %e, "failed to close before reopening");
            }
        }

        let handle = io::create_truncate(&path).map_err(|e| {
            tracing::error!(target_name = %name, error = %e, "can't create property file");
            e
        })?;

        tracing::debug!(path = %path, "opened property file");
        self.handles.insert(path.clone(), handle);
        Ok(path)
    }

    /// Set the header for `name`, replacing any previous one.
    ///
    /// Multi-line headers are split on `\n` when written.
    pub fn add_header(&mut self, name: &str, header: impl Into<String>) -> Result<()> {
        let key = self.target(name)?;
        self.headers.insert(key, header.into());
        Ok(())
    }

    /// Add one pending field for `name`.
    pub fn add_single_config(&mut self, name: &str, field: &str, value: &str) -> Result<()> {
        let key = self.target(name)?;
        self.items.entry(key).or_default().add_one_item(field, value);
        Ok(())
    }

    /// Add pending fields for `name`, pairing `fields[i]` with `values[i]`.
    ///
    /// # Errors
    ///
    /// [`Error::FieldCountMismatch`] when the slices differ in length; nothing
    /// is recorded in that case.
    pub fn add_multiple_config<F, V>(&mut self, name: &str, fields: &[F], values: &[V]) -> Result<()>
    where
        F: AsRef<str>,
        V: AsRef<str>,
    {
        let key = self.target(name)?;
        match self.items.get_mut(&key) {
            Some(item) => item.add_all_item(fields, values),
            None => {
                let mut item = ConfigItem::new();
                item.add_all_item(fields, values)?;
                self.items.insert(key, item);
                Ok(())
            }
        }
    }

    /// Write the header and pending fields for `name` to its open handle.
    ///
    /// The handle stays open; calling this twice appends the content twice.
    ///
    /// # Errors
    ///
    /// [`Error::NotOpen`] when `name` has not been opened.
    pub fn write(&mut self, name: &str) -> Result<()> {
        let key = self.target(name)?;
        let content = format::render(
            self.headers.get(&key).map(String::as_str),
            self.items.get(&key),
        );

        let Some(handle) = self.handles.get_mut(&key) else {
            tracing::error!(path = %key, "write before open");
            return Err(Error::NotOpen {
                path: key.to_string(),
            });
        };

        io::write_flush(handle, &key, &content).map_err(|e| {
            tracing::error!(path = %key, error = %e, "failed to write property file");
            e
        })?;
        tracing::debug!(path = %key, bytes = content.len(), "wrote property file");
        Ok(())
    }

    /// Truncate the file behind an open target by closing and reopening it.
    ///
    /// Pending fields and the header are kept. Does nothing when `name` is
    /// not open.
    pub fn clear(&mut self, name: &str) -> Result<()> {
        let key = self.target(name)?;
        let Some(handle) = self.handles.remove(&key) else {
            return Ok(());
        };

        io::close(handle, &key)?;
        let handle = io::create_truncate(&key)?;
        self.handles.insert(key, handle);
        Ok(())
    }

    /// Close `name`, dropping its pending fields and header.
    ///
    /// Returns `Ok(None)` when `name` was not open.
    pub fn close(&mut self, name: &str) -> Result<Option<NormalizedPath>> {
        let Some(key) = self.open_key(name) else {
            return Ok(None);
        };
        self.release(&key)?;
        tracing::debug!(path = %key, "closed property file");
        Ok(Some(key))
    }

    /// Close `name` and remove its file from disk.
    ///
    /// Returns `Ok(None)` when `name` was not open.
    pub fn delete(&mut self, name: &str) -> Result<Option<NormalizedPath>> {
        let Some(key) = self.open_key(name) else {
            return Ok(None);
        };
        self.release(&key)?;
        io::remove_file(&key)?;
        tracing::debug!(path = %key, "deleted property file");
        Ok(Some(key))
    }

    /// Close every open handle and empty all registries.
    ///
    /// Individual close failures are logged and skipped.
    pub fn close_all(&mut self) {
        for (path, handle) in self.handles.drain() {
            if let Err(e) = io::close(handle, &path) {
                tracing::warn!(path = %path, error = %e, "failed to close property file");
            }
        }
        self.items.clear();
        self.headers.clear();
    }

    fn target(&self, name: &str) -> Result<NormalizedPath> {
        let Some(base) = self.base_dir.as_deref() else {
            tracing::error!(target_name = %name, "base directory is not set");
            return Err(Error::BaseDirNotSet);
        };
        canonical_target(base, name).map_err(|e| {
            tracing::warn!(target_name = %name, error = %e, "can't resolve the property file");
            e.into()
        })
    }

    /// Key of `name` when it has an open handle.
    fn open_key(&self, name: &str) -> Option<NormalizedPath> {
        if self.handles.is_empty() {
            return None;
        }
        self.target(name)
            .ok()
            .filter(|key| self.handles.contains_key(key))
    }

    fn release(&mut self, key: &NormalizedPath) -> Result<()> {
        self.items.remove(key);
        self.headers.remove(key);
        match self.handles.remove(key) {
            Some(handle) => Ok(io::close(handle, key)?),
            None => Ok(()),
        }
    }
}

impl Drop for ConfigWriter {
    fn drop(&mut self) {
        if !self.handles.is_empty() {
            self.close_all();
        }
    }
}

impl ConfigWritable for ConfigWriter {
    fn write(&mut self, name: &str) -> Result<()> {
        ConfigWriter::write(self, name)
    }

    fn set_base_dir(&mut self, dir: &Path) {
        ConfigWriter::set_base_dir(self, dir)
    }

    fn open(&mut self, name: &str) -> Result<NormalizedPath> {
        ConfigWriter::open(self, name)
    }

    fn close(&mut self, name: &str) -> Result<Option<NormalizedPath>> {
        ConfigWriter::close(self, name)
    }

    fn delete(&mut self, name: &str) -> Result<Option<NormalizedPath>> {
        ConfigWriter::delete(self, name)
    }

    fn close_all(&mut self) {
        ConfigWriter::close_all(self)
    }

    fn add_single_config(&mut self, name: &str, field: &str, value: &str) -> Result<()> {
        ConfigWriter::add_single_config(self, name, field, value)
    }

    fn add_multiple_config(&mut self, name: &str, fields: &[&str], values: &[&str]) -> Result<()> {
        ConfigWriter::add_multiple_config(self, name, fields, values)
    }
}
