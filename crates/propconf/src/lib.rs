//! Properties file loading and writing.
//!
//! - [`Configuration`] loads `key=value` files by name from a search path, the
//!   local filesystem, or a remote object store, and answers lookups
//! - [`ConfigWriter`] accumulates fields per target file under a base
//!   directory and writes them out with optional `# ` header lines
//! - [`ConfigItem`] is the field/value set both sides share
//!
//! # Example
//!
//! ```no_run
//! use propconf::{ConfigWriter, Configuration, LoadMode, ReaderOptions};
//!
//! let mut writer = ConfigWriter::new();
//! writer.set_base_dir("/etc/myapp");
//! writer.open("db.properties")?;
//! writer.add_header("db.properties", "Database settings")?;
//! writer.add_single_config("db.properties", "host", "localhost")?;
//! writer.write("db.properties")?;
//! writer.close("db.properties")?;
//!
//! let mut config = Configuration::new(ReaderOptions::default());
//! config.load_properties("/etc/myapp/db.properties", &LoadMode::PhysicalPath)?;
//! assert_eq!(config.read_property("/etc/myapp/db.properties", "host")?, "localhost");
//! # Ok::<(), propconf::Error>(())
//! ```

pub mod error;
pub mod format;
pub mod item;
pub mod logging;
pub mod mode;
pub mod options;
pub mod reader;
pub mod resource;
pub mod shared;
pub mod store;
pub mod traits;
pub mod writer;

pub use error::{Error, Result};
pub use item::{ConfigItem, HEADER_TAG};
pub use mode::{LoadMode, RemoteOptions};
pub use options::ReaderOptions;
pub use reader::Configuration;
pub use resource::SearchPath;
pub use store::{LocalObjectStore, MemoryObjectStore, ObjectStore, StoreRegistry};
pub use traits::{ConfigWritable, Configurable};
pub use writer::ConfigWriter;
