//! Filesystem primitives for propconf
//!
//! Provides normalized path handling, canonical output-path resolution and
//! the small set of text I/O operations the reader and writer build on.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use path::{NormalizedPath, canonical_file, canonical_target};
