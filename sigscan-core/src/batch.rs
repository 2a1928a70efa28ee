//! Batch mode: scan every file listed in an index CSV.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::builder::Scanner;
use crate::error::{IoResultExt, ScanError, ScanResult};
use crate::record::CallableRecord;

/// First-cell values that mark a header row.
pub const HEADER_WORDS: &[&str] = &[
    "file",
    "filepath",
    "file_path",
    "filename",
    "path",
    "source",
    "ファイル",
    "ファイルパス",
    "ファイル名",
];

/// Aggregate result of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub records: Vec<CallableRecord>,
    /// Files scanned successfully
    pub processed: usize,
    /// Files skipped because they were missing or unreadable
    pub errors: usize,
}

fn is_header(cell: &str) -> bool {
    let lowered = cell.to_lowercase();
    HEADER_WORDS.iter().any(|w| *w == lowered)
}

/// Reads the source paths listed in the first column of `index`.
///
/// Blank rows are skipped, as is a leading header row. Relative paths are
/// resolved against the directory holding the index.
pub fn read_index(index: &Path) -> ScanResult<Vec<PathBuf>> {
    let bytes = fs::read(index).with_path(index)?;
    let body = bytes.strip_prefix("\u{feff}".as_bytes()).unwrap_or(&bytes[..]);
    let base = index.parent().unwrap_or_else(|| Path::new(""));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body);

    let mut paths = Vec::new();
    let mut first = true;
    for row in reader.records() {
        let row = row.map_err(|e| ScanError::index(index, e.to_string()))?;
        let Some(cell) = row.get(0).map(str::trim).filter(|c| !c.is_empty()) else {
            continue;
        };
        if std::mem::take(&mut first) && is_header(cell) {
            continue;
        }
        let entry = Path::new(cell);
        paths.push(if entry.is_absolute() {
            entry.to_path_buf()
        } else {
            base.join(entry)
        });
    }
    Ok(paths)
}

/// Fails with `NotFound` or `NotAFile` unless `path` is a regular file.
pub fn check_listed(path: &Path) -> ScanResult<()> {
    match fs::metadata(path) {
        Err(_) => Err(ScanError::not_found(path)),
        Ok(meta) if !meta.is_file() => Err(ScanError::not_a_file(path)),
        Ok(_) => Ok(()),
    }
}

/// Scans every file listed in `index`.
///
/// Missing entries and unreadable files are reported, counted and skipped;
/// only a missing or malformed index ends the run.
pub fn run_batch(scanner: &Scanner, index: &Path) -> ScanResult<BatchReport> {
    let paths = read_index(index)?;
    info!(index = %index.display(), files = paths.len(), "batch started");
    println!("files listed: {}", paths.len());

    let mut report = BatchReport::default();
    for path in &paths {
        if let Err(e) = check_listed(path) {
            println!("[WARN] {}", e);
            warn!(file = %path.display(), error = %e, "skipping listed path");
            report.errors += 1;
            continue;
        }

        match scanner.scan_file(path) {
            Ok(records) => {
                println!("[OK] {} ({} callables)", path.display(), records.len());
                report.processed += 1;
                report.records.extend(records);
            }
            Err(e) => {
                println!("[ERROR] {}", e);
                error!(file = %path.display(), error = %e, "failed to scan file");
                report.errors += 1;
            }
        }
    }
    Ok(report)
}

/// `<dir>/<index stem>_result.csv`, next to the index.
pub fn default_output_path(index: &Path) -> PathBuf {
    let stem = index
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "index".to_string());
    index.with_file_name(format!("{}_result.csv", stem))
}
