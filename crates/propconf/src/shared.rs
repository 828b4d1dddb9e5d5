//! Process-wide instances for callers that cannot pass a context around
//!
//! Prefer constructing a [`Configuration`] or [`ConfigWriter`] and owning it.
//! These accessors exist for code that needs one instance per process; each
//! is built exactly once on first use.

use std::sync::{LazyLock, Mutex};

use crate::options::ReaderOptions;
use crate::reader::Configuration;
use crate::writer::ConfigWriter;

static CONFIGURATION: LazyLock<Mutex<Configuration>> =
    LazyLock::new(|| Mutex::new(Configuration::new(ReaderOptions::from_env())));

static WRITER: LazyLock<Mutex<ConfigWriter>> = LazyLock::new(|| Mutex::new(ConfigWriter::new()));

/// The shared reader, with its search path taken from `PROPCONF_PATH`.
pub fn configuration() -> &'static Mutex<Configuration> {
    &CONFIGURATION
}

/// The shared writer.
pub fn writer() -> &'static Mutex<ConfigWriter> {
    &WRITER
}
