//! Whole-document JSON persistence.
//!
//! Documents are always read in full and rewritten in full. Writes go to a
//! temporary file in the same directory which is then renamed over the
//! target, so readers observe either the old or the new document.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::StoreError;

/// Read a JSON object document.
pub(crate) fn read_object(path: &Path) -> Result<Map<String, Value>, StoreError> {
    let raw = match std::fs::read(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(StoreError::DocumentNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(err) => return Err(StoreError::Read(err)),
    };
    serde_json::from_slice(&raw).map_err(StoreError::InvalidFormat)
}

/// Atomically replace the document at `path` with `value`, pretty-printed
/// with four-space indentation.
pub(crate) fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| StoreError::Write(std::io::Error::other(e)))?;
    buf.push(b'\n');

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(StoreError::Write)?;
    tmp.write_all(&buf).map_err(StoreError::Write)?;
    tmp.as_file().sync_all().map_err(StoreError::Write)?;
    tmp.persist(path).map_err(|e| StoreError::Write(e.error))?;
    Ok(())
}
