//! Configuration loading from sigscan.toml.

use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::{IoResultExt, ScanError, ScanResult};

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "sigscan.toml";

/// Main configuration structure for sigscan.toml.
#[derive(Debug, Deserialize, Default)]
pub struct ScanConfig {
    /// Callable names to drop from every report. A trailing `*` makes the
    /// entry a prefix match.
    pub ignore: Option<Vec<String>>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Single-file default: "console", "csv" or "json".
    pub format: Option<String>,
}

impl ScanConfig {
    /// Ignore patterns, empty when unset.
    pub fn ignore_patterns(&self) -> Vec<String> {
        self.ignore.clone().unwrap_or_default()
    }

    /// Configured default output format, if any.
    pub fn output_format(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.format.as_deref())
    }
}

/// Loads configuration from `dir/sigscan.toml` if it exists.
pub fn load_config(dir: &Path) -> ScanResult<Option<ScanConfig>> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).with_path(&path)?;
    let cfg = toml::from_str(&content).map_err(|e| ScanError::config(&path, e.to_string()))?;
    Ok(Some(cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir()
            .join("sigscan_config_test")
            .join(format!("{}_{}", name, std::process::id()));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = temp_dir("missing");
        assert!(load_config(&dir).unwrap().is_none());
    }

    #[test]
    fn test_parse_config() {
        let dir = temp_dir("parse");
        fs::write(
            dir.join(CONFIG_FILE),
            "ignore = [\"main\", \"test_*\"]\n\n[output]\nformat = \"json\"\n",
        )
        .unwrap();

        let cfg = load_config(&dir).unwrap().unwrap();
        assert_eq!(cfg.ignore_patterns(), vec!["main", "test_*"]);
        assert_eq!(cfg.output_format(), Some("json"));
    }

    #[test]
    fn test_invalid_config_errors() {
        let dir = temp_dir("invalid");
        fs::write(dir.join(CONFIG_FILE), "ignore = 3").unwrap();
        assert!(matches!(load_config(&dir), Err(ScanError::Config { .. })));
    }
}
