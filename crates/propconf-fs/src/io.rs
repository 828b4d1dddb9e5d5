//! Text I/O operations used by the properties reader and writer

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use crate::{Error, NormalizedPath, Result};

/// Buffered handle for a properties file open for writing.
pub type TextWriter = BufWriter<File>;

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path)
        .map_err(|e| Error::io(&native_path, e))
}

/// Drain a reader into a string.
///
/// `origin` is only used to label errors.
pub fn read_stream(mut reader: impl Read, origin: &NormalizedPath) -> Result<String> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| Error::io(origin.to_native(), e))?;
    Ok(content)
}

/// Create a file for writing, truncating any existing content.
///
/// Parent directories are not created: the target directory is expected to
/// exist already.
pub fn create_truncate(path: &NormalizedPath) -> Result<TextWriter> {
    let native_path = path.to_native();
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&native_path)
        .map_err(|e| Error::io(&native_path, e))?;
    Ok(BufWriter::new(file))
}

/// Write text to an open handle and flush it to the file.
pub fn write_flush(writer: &mut TextWriter, path: &NormalizedPath, content: &str) -> Result<()> {
    writer
        .write_all(content.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| Error::io(path.to_native(), e))
}

/// Flush and close a handle.
///
/// Dropping a `BufWriter` swallows flush errors, so the flush is done
/// explicitly first.
pub fn close(mut writer: TextWriter, path: &NormalizedPath) -> Result<()> {
    writer.flush().map_err(|e| Error::io(path.to_native(), e))?;
    let file = writer
        .into_inner()
        .map_err(|e| Error::io(path.to_native(), e.into_error()))?;
    file.sync_all().map_err(|e| Error::io(path.to_native(), e))
}

/// Remove a file from disk.
pub fn remove_file(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    fs::remove_file(&native_path).map_err(|e| Error::io(&native_path, e))
}
