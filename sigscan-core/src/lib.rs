//! sigscan-core: regex-based callable inventory for Java, JavaScript and Rust
//!
//! This library finds function, method and constructor declarations in source
//! text with regular expressions, not a parser, and reports their names,
//! parameters, return types, modifiers, owning types and line numbers.
//!
//! # Features
//!
//! - **Three languages**: Java, JavaScript and Rust profiles
//! - **Call-site filtering**: keywords and `obj.name(` shapes are dropped
//! - **Deduplication**: one record per (name, line), chosen by category priority
//! - **Reports**: console, CSV (UTF-8 with BOM) and JSON
//! - **Batch mode**: scan every file listed in an index CSV
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sigscan_core::prelude::*;
//!
//! let records = Scanner::new(Language::Java).scan_file(Path::new("App.java"))?;
//! print_console("App.java", &records, Language::Java);
//! ```
//!
//! # Module Organization
//!
//! - [`reader`]: source file reading
//! - [`profile`]: the [`LanguageProfile`] trait and profile lookup
//! - [`lang`]: Java, JavaScript and Rust profiles
//! - [`extract`]: the generic match/filter/refine pipeline
//! - [`dedupe`]: (name, line) deduplication and ignore patterns
//! - [`builder`]: the [`Scanner`] entry point
//! - [`report`]: console, CSV and JSON output
//! - [`batch`]: index-driven multi-file runs
//! - [`error`]: typed error handling

pub mod batch;
pub mod builder;
pub mod common;
pub mod config;
pub mod dedupe;
pub mod error;
pub mod extract;
pub mod lang;
pub mod logging;
pub mod prelude;
pub mod profile;
pub mod reader;
pub mod record;
pub mod report;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{IoResultExt, ScanError, ScanResult};

// Builder API
pub use builder::Scanner;

// Batch mode
pub use batch::{
    check_listed, default_output_path, read_index, run_batch, BatchReport, HEADER_WORDS,
};

// Configuration
pub use config::{load_config, OutputConfig, ScanConfig, CONFIG_FILE};

// Pipeline
pub use dedupe::{dedupe, is_ignored};
pub use extract::{collect_candidates, extract_callables};
pub use profile::{profile_for, LanguageProfile, PatternRule, Refined, SourceContext};

// Logging
pub use logging::{init_structured_logging, log_error, log_info, log_warn};

// Records and reading
pub use reader::read_source;
pub use record::{CallableRecord, Candidate, Category, Language};

// Reporting
pub use report::{
    csv_headers, print_console, read_csv, render_console, render_json, write_csv,
    write_csv_to, Column,
};

#[cfg(test)]
mod tests;
