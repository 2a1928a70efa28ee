//! Typed error handling for sigscan.
//!
//! Library callers match on [`ScanError`] to decide whether a failure ends
//! the run (single-file mode) or is logged and skipped (batch mode).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sigscan operations.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Source or index file does not exist
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    /// Path exists but is not a regular file
    #[error("not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// I/O or decoding error while reading a file
    #[error("failed to read {path}: {message}")]
    Read {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Malformed index CSV
    #[error("invalid index file {path}: {message}")]
    Index { path: PathBuf, message: String },

    /// Failure while writing a report
    #[error("failed to write {path}: {message}")]
    Write {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file errors
    #[error("config error at {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl ScanError {
    /// Create a read error, mapping `NotFound` to its own variant.
    pub fn read(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        if err.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound { path };
        }
        Self::Read {
            path,
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a not-found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a not-a-file error.
    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    /// Create an index error.
    pub fn index(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Index {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a write error from an I/O failure.
    pub fn write(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a write error without an underlying I/O error.
    pub fn write_msg(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Write {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if a batch run can skip this file and continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::NotAFile { .. } | Self::Read { .. }
        )
    }

    /// Get the path associated with this error.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound { path }
            | Self::NotAFile { path }
            | Self::Read { path, .. }
            | Self::Index { path, .. }
            | Self::Write { path, .. }
            | Self::Config { path, .. } => path,
        }
    }
}

/// Convenience type alias for sigscan results.
pub type ScanResult<T> = Result<T, ScanError>;

/// Extension trait for attaching a path to `std::io::Error`.
pub trait IoResultExt<T> {
    /// Map a read-side I/O error, keeping the path.
    fn with_path(self, path: impl Into<PathBuf>) -> ScanResult<T>;

    /// Map a write-side I/O error, keeping the path.
    fn with_write_path(self, path: impl Into<PathBuf>) -> ScanResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> ScanResult<T> {
        self.map_err(|e| ScanError::read(path, e))
    }

    fn with_write_path(self, path: impl Into<PathBuf>) -> ScanResult<T> {
        self.map_err(|e| ScanError::write(path, e))
    }
}
