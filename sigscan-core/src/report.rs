//! Output formatting: console, CSV and JSON.
//!
//! CSV columns depend on the language; [`read_csv`] reads a report written by
//! [`write_csv`] back into records.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::common::split_top_level;
use crate::error::{IoResultExt, ScanError, ScanResult};
use crate::record::{CallableRecord, Category, Language};

const BOM: &str = "\u{feff}";

/// One CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    File,
    Line,
    Owner,
    Category,
    Modifiers,
    ReturnType,
    Name,
    Parameters,
}

impl Column {
    fn header(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::File, _) => "file",
            (Self::Line, _) => "line",
            (Self::Owner, Language::Rust) => "struct_or_trait",
            (Self::Owner, _) => "class",
            (Self::Category, _) => "category",
            (Self::Modifiers, Language::Rust) => "visibility",
            (Self::Modifiers, _) => "modifiers",
            (Self::ReturnType, _) => "return_type",
            (Self::Name, Language::Java) => "method_name",
            (Self::Name, _) => "function_name",
            (Self::Parameters, _) => "parameters",
        }
    }

    fn cell(self, record: &CallableRecord) -> String {
        match self {
            Self::File => record.file.clone(),
            Self::Line => record.line.to_string(),
            Self::Owner => record.owning_type.clone().unwrap_or_default(),
            Self::Category => record.category.to_string(),
            Self::Modifiers => record.modifiers.join(", "),
            Self::ReturnType => record.return_type.clone().unwrap_or_default(),
            Self::Name => record.name.clone(),
            Self::Parameters => record.parameters.join(", "),
        }
    }
}

/// Columns written for `language`, in order.
pub fn columns(language: Language) -> &'static [Column] {
    use Column::*;
    match language {
        Language::Java | Language::Rust => &[
            File, Line, Owner, Category, Modifiers, ReturnType, Name, Parameters,
        ],
        Language::JavaScript => &[File, Line, Category, Name, Parameters],
    }
}

/// Header row for `language`.
pub fn csv_headers(language: Language) -> Vec<&'static str> {
    columns(language).iter().map(|c| c.header(language)).collect()
}

/// Renders the console report for one file.
pub fn render_console(file_name: &str, records: &[CallableRecord], language: Language) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== {} ===\n", file_name);

    if records.is_empty() {
        out.push_str("No callables found.\n");
        return out;
    }

    for (i, r) in records.iter().enumerate() {
        let _ = writeln!(out, "[{} {}]", language.callable_noun(), i + 1);
        let _ = writeln!(out, "  File: {}", r.file);
        if let (Some(label), Some(owner)) = (language.owner_label(), &r.owning_type) {
            let _ = writeln!(out, "  {}: {}", label, owner);
        }
        let _ = writeln!(out, "  Name: {}", r.name);
        let _ = writeln!(out, "  Category: {}", r.category);
        if let Some(ret) = &r.return_type {
            let _ = writeln!(out, "  Return type: {}", ret);
        }
        if let Some(label) = language.modifiers_label() {
            if !r.modifiers.is_empty() {
                let _ = writeln!(out, "  {}: {}", label, r.modifiers.join(", "));
            }
        }
        let _ = writeln!(out, "  Line: {}", r.line);
        if r.parameters.is_empty() {
            out.push_str("  Parameters: none\n");
        } else {
            let _ = writeln!(out, "  Parameters: {}", r.parameters.join(", "));
        }
        out.push('\n');
    }
    out
}

/// Prints the console report to stdout.
pub fn print_console(file_name: &str, records: &[CallableRecord], language: Language) {
    print!("{}", render_console(file_name, records, language));
}

/// Writes the header and one row per record, without a byte-order mark.
pub fn write_csv_to<W: Write>(
    writer: W,
    records: &[CallableRecord],
    language: Language,
) -> Result<(), csv::Error> {
    let cols = columns(language);
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(csv_headers(language))?;
    for record in records {
        wtr.write_record(cols.iter().map(|c| c.cell(record)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a UTF-8 CSV report with a byte-order mark.
pub fn write_csv(path: &Path, records: &[CallableRecord], language: Language) -> ScanResult<()> {
    let file = File::create(path).with_write_path(path)?;
    let mut out = BufWriter::new(file);
    out.write_all(BOM.as_bytes()).with_write_path(path)?;
    write_csv_to(&mut out, records, language).map_err(|e| csv_write_error(path, e))?;
    out.flush().with_write_path(path)
}

fn csv_write_error(path: &Path, err: csv::Error) -> ScanError {
    if err.is_io_error() {
        if let csv::ErrorKind::Io(io_err) = err.into_kind() {
            return ScanError::write(path, io_err);
        }
        return ScanError::write_msg(path, "I/O error");
    }
    ScanError::write_msg(path, err.to_string())
}

/// Pretty-printed JSON array of records. Non-ASCII text is kept as is.
pub fn render_json(records: &[CallableRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

/// Reads a CSV report for `language` back into records.
///
/// Columns the language does not write come back empty.
pub fn read_csv(path: &Path, language: Language) -> ScanResult<Vec<CallableRecord>> {
    let text = fs::read_to_string(path).with_path(path)?;
    let body = text.strip_prefix(BOM).unwrap_or(&text);
    let bad = |msg: String| ScanError::Read {
        path: path.to_path_buf(),
        message: msg,
        source: None,
    };

    let cols = columns(language);
    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let mut records = Vec::new();

    for (row_no, row) in reader.records().enumerate() {
        let row = row.map_err(|e| bad(e.to_string()))?;
        let mut record = CallableRecord {
            name: String::new(),
            category: Category::Function,
            return_type: None,
            parameters: Vec::new(),
            modifiers: Vec::new(),
            owning_type: None,
            file: String::new(),
            line: 0,
        };

        for (col, cell) in cols.iter().zip(row.iter()) {
            let non_empty = || (!cell.is_empty()).then(|| cell.to_string());
            match col {
                Column::File => record.file = cell.to_string(),
                Column::Line => {
                    record.line = cell
                        .parse()
                        .map_err(|_| bad(format!("row {}: bad line number {:?}", row_no + 2, cell)))?;
                }
                Column::Owner => record.owning_type = non_empty(),
                Column::Category => {
                    record.category = cell
                        .parse()
                        .map_err(|e: String| bad(format!("row {}: {}", row_no + 2, e)))?;
                }
                Column::Modifiers => {
                    record.modifiers = cell
                        .split(',')
                        .map(str::trim)
                        .filter(|m| !m.is_empty())
                        .map(String::from)
                        .collect();
                }
                Column::ReturnType => record.return_type = non_empty(),
                Column::Name => record.name = cell.to_string(),
                Column::Parameters => record.parameters = split_top_level(cell),
            }
        }
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CallableRecord {
        CallableRecord {
            name: "bar".to_string(),
            category: Category::Method,
            return_type: Some("Map<String, Integer>".to_string()),
            parameters: vec!["String s".to_string(), "Map<K, V> m".to_string()],
            modifiers: vec!["public".to_string(), "static".to_string()],
            owning_type: Some("Foo".to_string()),
            file: "src/Foo.java".to_string(),
            line: 12,
        }
    }

    #[test]
    fn test_headers_per_language() {
        assert_eq!(
            csv_headers(Language::Java),
            vec!["file", "line", "class", "category", "modifiers", "return_type", "method_name", "parameters"]
        );
        assert_eq!(
            csv_headers(Language::JavaScript),
            vec!["file", "line", "category", "function_name", "parameters"]
        );
        assert_eq!(csv_headers(Language::Rust)[2], "struct_or_trait");
        assert_eq!(csv_headers(Language::Rust)[4], "visibility");
    }

    #[test]
    fn test_csv_rows_quote_joined_params() {
        let mut buf = Vec::new();
        write_csv_to(&mut buf, &[sample()], Language::Java).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        lines.next();
        assert_eq!(
            lines.next().unwrap(),
            "src/Foo.java,12,Foo,method,\"public, static\",\"Map<String, Integer>\",bar,\"String s, Map<K, V> m\""
        );
    }

    #[test]
    fn test_modifiers_read_back_from_comma_list() {
        let dir = std::env::temp_dir().join(format!("sigscan_report_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let out = dir.join("mods.csv");
        write_csv(&out, &[sample()], Language::Java).unwrap();
        let back = read_csv(&out, Language::Java).unwrap();
        assert_eq!(back[0].modifiers, vec!["public", "static"]);
        assert_eq!(back[0], sample());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_console_layout() {
        let mut bare = sample();
        bare.parameters.clear();
        bare.return_type = None;
        let out = render_console("Foo.java", &[bare], Language::Java);
        assert!(out.contains("=== Foo.java ==="));
        assert!(out.contains("[Method 1]"));
        assert!(out.contains("  Class: Foo"));
        assert!(out.contains("  Modifiers: public, static"));
        assert!(out.contains("  Parameters: none"));
        assert!(!out.contains("Return type"));
    }

    #[test]
    fn test_console_js_has_no_owner_or_modifiers() {
        let mut r = sample();
        r.category = Category::ArrowFunction;
        let out = render_console("app.js", &[r], Language::JavaScript);
        assert!(out.contains("[Function 1]"));
        assert!(!out.contains("Class:"));
        assert!(!out.contains("Modifiers:"));
    }

    #[test]
    fn test_console_empty() {
        let out = render_console("empty.rs", &[], Language::Rust);
        assert!(out.contains("No callables found."));
    }

    #[test]
    fn test_json_keeps_non_ascii() {
        let mut r = sample();
        r.name = "計算".to_string();
        let json = render_json(&[r]).unwrap();
        assert!(json.contains("計算"));
        assert!(json.contains("\"category\": \"method\""));
    }
}
