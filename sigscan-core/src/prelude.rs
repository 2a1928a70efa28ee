//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use sigscan_core::prelude::*;
//! ```

// Core types
pub use crate::error::{ScanError, ScanResult};
pub use crate::record::{CallableRecord, Category, Language};

// Scanning
pub use crate::builder::Scanner;
pub use crate::batch::{run_batch, BatchReport};

// Output
pub use crate::report::{print_console, render_json, write_csv};

// Configuration
pub use crate::config::{load_config, ScanConfig};
