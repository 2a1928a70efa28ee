//! Source file reading.

use std::fs;
use std::path::Path;

use crate::error::{IoResultExt, ScanError, ScanResult};

/// Reads a whole source file as UTF-8, dropping a leading byte-order mark.
///
/// A missing file yields [`ScanError::NotFound`], anything else that stops
/// the read (permissions, a directory, invalid UTF-8) yields
/// [`ScanError::Read`].
pub fn read_source(path: &Path) -> ScanResult<String> {
    let bytes = fs::read(path).with_path(path)?;
    let text = String::from_utf8(bytes).map_err(|e| ScanError::Read {
        path: path.to_path_buf(),
        message: format!("not valid UTF-8: {}", e.utf8_error()),
        source: None,
    })?;

    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}
