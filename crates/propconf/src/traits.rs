//! Capability contracts for properties readers and writers

use std::path::Path;

use propconf_fs::NormalizedPath;
use url::Url;

use crate::Result;
use crate::mode::LoadMode;

/// Something that loads properties files and answers lookups.
pub trait Configurable {
    /// Load the properties at `name` under `mode`.
    fn load_properties(&mut self, name: &str, mode: &LoadMode) -> Result<()>;

    /// Load `name` under the default (classpath) mode.
    fn load(&mut self, name: &str) -> Result<()> {
        self.load_properties(name, &LoadMode::default())
    }

    /// Resolve `name` under `mode` without reading it.
    fn get_resource(&mut self, name: &str, mode: &LoadMode) -> Result<Url>;

    /// Resolve `name` under the default (classpath) mode.
    fn resource(&mut self, name: &str) -> Result<Url> {
        self.get_resource(name, &LoadMode::default())
    }

    /// Value of `field` in the properties loaded as `name`.
    fn read_property(&self, name: &str, field: &str) -> Result<&str>;

    /// Field names in the properties loaded as `name`.
    fn property_names(&self, name: &str) -> Result<Vec<&str>>;
}

/// Something that accumulates fields and persists them to properties files.
///
/// Targets are named relative to the base directory and keyed internally by
/// their canonical path.
pub trait ConfigWritable {
    /// Write the target's header and pending fields.
    fn write(&mut self, name: &str) -> Result<()>;

    /// Directory that target names are resolved against.
    fn set_base_dir(&mut self, dir: &Path);

    /// Create or truncate the target and keep it open for writing.
    fn open(&mut self, name: &str) -> Result<NormalizedPath>;

    /// Close the target. `Ok(None)` when it was not open.
    fn close(&mut self, name: &str) -> Result<Option<NormalizedPath>>;

    /// Close the target and remove it from disk. `Ok(None)` when it was not open.
    fn delete(&mut self, name: &str) -> Result<Option<NormalizedPath>>;

    /// Close every open target.
    fn close_all(&mut self);

    fn add_single_config(&mut self, name: &str, field: &str, value: &str) -> Result<()>;

    fn add_multiple_config(&mut self, name: &str, fields: &[&str], values: &[&str]) -> Result<()>;
}
