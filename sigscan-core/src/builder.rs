//! Builder API for running one language's scan.
//!
//! ```rust,ignore
//! use sigscan_core::prelude::*;
//!
//! let records = Scanner::new(Language::Rust)
//!     .ignore_patterns(["main", "test_*"])
//!     .scan_file(Path::new("src/lib.rs"))?;
//! ```

use std::path::Path;

use tracing::info;

use crate::dedupe::is_ignored;
use crate::error::ScanResult;
use crate::extract::extract_callables;
use crate::profile::{profile_for, LanguageProfile};
use crate::reader::read_source;
use crate::record::{CallableRecord, Language};

/// Configured scanner for one language.
#[derive(Debug, Clone)]
pub struct Scanner {
    language: Language,

    /// Names to drop from the output; a trailing `*` matches by prefix
    ignored_patterns: Vec<String>,
}

impl Scanner {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ignored_patterns: Vec::new(),
        }
    }

    /// Add name patterns to drop from the output.
    pub fn ignore_patterns(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ignored_patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn profile(&self) -> &'static dyn LanguageProfile {
        profile_for(self.language)
    }

    /// Extract callables from text already in memory.
    ///
    /// `file` is only used to label the records.
    pub fn scan_source(&self, file: &str, content: &str) -> Vec<CallableRecord> {
        let mut records = extract_callables(self.profile(), file, content);
        if !self.ignored_patterns.is_empty() {
            records.retain(|r| !is_ignored(&r.name, &self.ignored_patterns));
        }
        records
    }

    /// Read and scan one file. Records are labelled with the path as given.
    pub fn scan_file(&self, path: &Path) -> ScanResult<Vec<CallableRecord>> {
        let content = read_source(path)?;
        let label = path.display().to_string();
        let records = self.scan_source(&label, &content);
        info!(
            language = self.language.short_name(),
            file = %label,
            callables = records.len(),
            "scanned file"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignore_patterns_drop_names() {
        let src = "fn main() {}\nfn test_parse() {}\nfn parse() {}\n";
        let records = Scanner::new(Language::Rust)
            .ignore_patterns(["main", "test_*"])
            .scan_source("main.rs", src);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["parse"]);
        assert_eq!(records[0].file, "main.rs");
    }

    #[test]
    fn test_scan_missing_file_is_not_found() {
        let err = Scanner::new(Language::Java)
            .scan_file(Path::new("/definitely/not/here/Foo.java"))
            .unwrap_err();
        assert!(matches!(err, crate::error::ScanError::NotFound { .. }));
    }
}
