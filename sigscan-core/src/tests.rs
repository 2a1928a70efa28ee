//! End-to-end scenarios for sigscan-core.

use crate::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn write_file(file: &Path, content: &str) {
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, content).unwrap();
}

fn setup_temp_dir() -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir()
        .join("sigscan_tests")
        .join(format!("{}_{}", timestamp, id));

    if dir.exists() {
        fs::remove_dir_all(&dir).ok();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}

// Scenario 1: Java file read from disk
#[test]
fn test_java_file_constructor_and_method() {
    let root = setup_temp_dir();
    let file = root.join("Foo.java");
    write_file(
        &file,
        "public class Foo { public Foo(int x) {} public int bar(String s) { return 1; } }",
    );

    let records = Scanner::new(Language::Java).scan_file(&file).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(
        (records[0].name.as_str(), records[0].category),
        ("Foo", Category::Constructor)
    );
    assert_eq!(records[0].parameters, vec!["int x"]);
    assert_eq!(
        (records[1].name.as_str(), records[1].category),
        ("bar", Category::Method)
    );
    assert_eq!(records[1].return_type.as_deref(), Some("int"));
    assert_eq!(records[1].file, file.display().to_string());
}

// Scenario 2: BOM is dropped before matching, lines stay 1-based
#[test]
fn test_bom_and_line_numbers() {
    let root = setup_temp_dir();
    let file = root.join("app.js");
    write_file(&file, "\u{feff}function first(a) {}\n\nfunction second(b) {}\n");

    let records = Scanner::new(Language::JavaScript).scan_file(&file).unwrap();
    let lines: Vec<_> = records.iter().map(|r| (r.name.as_str(), r.line)).collect();
    assert_eq!(lines, vec![("first", 1), ("second", 3)]);
}

// Scenario 3: invalid UTF-8 is a read error, not a panic
#[test]
fn test_invalid_utf8_is_read_error() {
    let root = setup_temp_dir();
    let file = root.join("bad.rs");
    fs::write(&file, [0x66, 0x6e, 0x20, 0xff, 0xfe]).unwrap();

    let err = Scanner::new(Language::Rust).scan_file(&file).unwrap_err();
    assert!(matches!(err, ScanError::Read { .. }));
    assert!(err.is_recoverable());
}

// Scenario 4: batch with one missing entry and a header row
#[test]
fn test_batch_counts_missing_files() {
    let root = setup_temp_dir();
    write_file(&root.join("src/a.rs"), "pub fn alpha() {}\n");
    write_file(&root.join("src/b.rs"), "fn beta(x: u8) -> u8 {\n    x\n}\n");
    let index = root.join("files.csv");
    write_file(&index, "file\nsrc/a.rs\n\nsrc/missing.rs\nsrc/b.rs\n");

    let report = run_batch(&Scanner::new(Language::Rust), &index).unwrap();
    assert_eq!(report.processed, 2);
    assert_eq!(report.errors, 1);
    let names: Vec<_> = report.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
}

// Scenario 5: directories listed in the index are skipped
#[test]
fn test_batch_skips_directories() {
    let root = setup_temp_dir();
    fs::create_dir_all(root.join("src")).unwrap();
    write_file(&root.join("one.js"), "const f = (x) => x;\n");
    let index = root.join("list.csv");
    write_file(&index, "one.js\nsrc\n");

    let report = run_batch(&Scanner::new(Language::JavaScript), &index).unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.errors, 1);
    assert_eq!(report.records.len(), 1);
}

// Scenario 6: absolute paths in the index are used as is
#[test]
fn test_index_absolute_and_relative_paths() {
    let root = setup_temp_dir();
    let abs = root.join("abs.java");
    let index = root.join("sub").join("index.csv");
    write_file(&index, &format!("{}\nrel/Thing.java\n", abs.display()));

    let paths = read_index(&index).unwrap();
    assert_eq!(paths[0], abs);
    assert_eq!(paths[1], root.join("sub").join("rel/Thing.java"));
}

// Scenario 7: CSV report reads back into the same records
#[test]
fn test_csv_round_trip() {
    let root = setup_temp_dir();
    let src = "struct Svc;\n\nimpl Svc {\n    pub async fn fetch(&self, ids: HashMap<u32, Vec<u8>>) -> Result<u8, E> {\n        todo!()\n    }\n}\n\npub(crate) fn helper() {}\n";
    let records = Scanner::new(Language::Rust).scan_source("svc.rs", src);
    assert_eq!(records.len(), 2);

    let out = root.join("svc.csv");
    write_csv(&out, &records, Language::Rust).unwrap();
    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with("\u{feff}".as_bytes()));

    let back = read_csv(&out, Language::Rust).unwrap();
    assert_eq!(back, records);
}

// Scenario 8: JavaScript round trip keeps (name, line, category)
#[test]
fn test_csv_round_trip_javascript() {
    let root = setup_temp_dir();
    let src = "async function load(url, opts = {}) {}\nconst sum = (a, b) => a + b;\n";
    let records = Scanner::new(Language::JavaScript).scan_source("m.js", src);

    let out = root.join("m.csv");
    write_csv(&out, &records, Language::JavaScript).unwrap();
    let back = read_csv(&out, Language::JavaScript).unwrap();

    let key = |r: &CallableRecord| (r.name.clone(), r.line, r.category);
    assert_eq!(
        back.iter().map(key).collect::<Vec<_>>(),
        records.iter().map(key).collect::<Vec<_>>()
    );
    assert_eq!(back[0].parameters, vec!["url", "opts"]);
}

// Scenario 9: config ignore patterns flow into the scanner
#[test]
fn test_config_ignore_patterns() {
    let root = setup_temp_dir();
    write_file(
        &root.join(CONFIG_FILE),
        "ignore = [\"main\", \"test_*\"]\n\n[output]\nformat = \"json\"\n",
    );
    let cfg = load_config(&root).unwrap().unwrap();
    assert_eq!(cfg.output_format(), Some("json"));

    let src = "fn main() {}\nfn test_it() {}\nfn run() {}\n";
    let records = Scanner::new(Language::Rust)
        .ignore_patterns(cfg.ignore_patterns())
        .scan_source("main.rs", src);
    let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["run"]);
}

// Scenario 10: JSON output is an array of record objects
#[test]
fn test_json_report_shape() {
    let records = Scanner::new(Language::Java).scan_source(
        "A.java",
        "class A {\n    private static String name(int id) {\n        return \"\";\n    }\n}\n",
    );
    let json = render_json(&records).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let first = &value[0];
    assert_eq!(first["name"], "name");
    assert_eq!(first["category"], "method");
    assert_eq!(first["owning_type"], "A");
    assert_eq!(first["modifiers"], serde_json::json!(["private", "static"]));
    assert_eq!(first["line"], 2);
}
