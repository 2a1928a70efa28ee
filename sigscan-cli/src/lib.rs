//! sigscan CLI: callable inventory for Java, JavaScript and Rust sources.
//!
//! The three programs `sigscan-java`, `sigscan-js` and `sigscan-rust` share
//! this implementation and differ only in the [`Language`] they pass to
//! [`run`].
//!
//! ```text
//! sigscan-<lang> <source-file> [--csv [output.csv]] [--json]
//! sigscan-<lang> --list <index.csv> [output.csv]
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::error::ErrorKind;
use clap::{ArgGroup, CommandFactory, FromArgMatches, Parser};

use sigscan_core::{
    default_output_path, init_structured_logging, load_config, log_error, log_info, log_warn,
    print_console, render_json, run_batch, write_csv, Language, ScanConfig, Scanner,
};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Lists the functions and methods declared in a source file",
    arg_required_else_help = true,
    group(ArgGroup::new("input").required(true).args(["file", "list"]))
)]
pub struct Cli {
    /// Source file to scan
    file: Option<PathBuf>,

    /// Write a CSV report (default: the source path with a .csv extension)
    #[arg(long, value_name = "OUTPUT", num_args = 0..=1)]
    csv: Option<Option<PathBuf>>,

    /// Print the records as a JSON array
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Scan every file listed in the first column of INDEX
    #[arg(
        long,
        num_args = 1..=2,
        value_names = ["INDEX", "OUTPUT"],
        conflicts_with_all = ["file", "csv", "json"]
    )]
    list: Option<Vec<PathBuf>>,
}

/// How a single-file run reports its records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    Console,
    Csv(Option<PathBuf>),
    Json,
}

/// Parses `args` (program name first) as `language`'s command line.
pub fn parse_args<I, T>(language: Language, args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = Cli::command()
        .name(language.program_name())
        .bin_name(language.program_name())
        .try_get_matches_from(args)?;
    Cli::from_arg_matches(&matches)
}

/// Picks the output mode: flags first, then `output.format` from the config.
pub fn output_mode(cli: &Cli, config: Option<&ScanConfig>) -> Result<OutputMode> {
    if let Some(path) = &cli.csv {
        return Ok(OutputMode::Csv(path.clone()));
    }
    if cli.json {
        return Ok(OutputMode::Json);
    }
    match config.and_then(|c| c.output_format()) {
        None | Some("console") => Ok(OutputMode::Console),
        Some("csv") => Ok(OutputMode::Csv(None)),
        Some("json") => Ok(OutputMode::Json),
        Some(other) => Err(anyhow!(
            "unknown output format {:?} in sigscan.toml (expected console, csv or json)",
            other
        )),
    }
}

fn scan_single(scanner: &Scanner, file: &Path, mode: OutputMode) -> Result<()> {
    let language = scanner.language();
    let records = scanner
        .scan_file(file)
        .with_context(|| format!("cannot scan {}", file.display()))?;

    match mode {
        OutputMode::Console => {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());
            print_console(&name, &records, language);
        }
        OutputMode::Csv(target) => {
            if records.is_empty() {
                println!("No callables found.");
                log_warn(&format!("no callables in {}; CSV not written", file.display()));
                return Ok(());
            }
            let out = target.unwrap_or_else(|| file.with_extension("csv"));
            write_csv(&out, &records, language)?;
            println!("CSV written: {}", out.display());
        }
        OutputMode::Json => {
            let json = render_json(&records).context("JSON serialization failed")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn scan_list(scanner: &Scanner, args: &[PathBuf]) -> Result<()> {
    let index = args
        .first()
        .ok_or_else(|| anyhow!("--list needs an index file"))?;
    let out = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| default_output_path(index));

    let report = run_batch(scanner, index)
        .with_context(|| format!("cannot read index {}", index.display()))?;

    println!();
    println!("processed: {}, errors: {}", report.processed, report.errors);
    println!("callables found: {}", report.records.len());

    write_csv(&out, &report.records, scanner.language())?;
    println!("CSV written: {}", out.display());
    log_info(&format!(
        "batch report {} written ({} records)",
        out.display(),
        report.records.len()
    ));
    Ok(())
}

fn dispatch(cli: Cli, language: Language, config: Option<ScanConfig>) -> Result<()> {
    let scanner = Scanner::new(language).ignore_patterns(
        config
            .as_ref()
            .map(ScanConfig::ignore_patterns)
            .unwrap_or_default(),
    );

    if let Some(list) = &cli.list {
        return scan_list(&scanner, list);
    }

    let mode = output_mode(&cli, config.as_ref())?;
    match &cli.file {
        Some(file) => scan_single(&scanner, file, mode),
        None => bail!("no source file given"),
    }
}

/// Console line printed for a fatal error.
pub fn error_line(err: &anyhow::Error) -> String {
    format!("error: {:#}", err)
}

/// Runs one invocation and returns the process exit code.
///
/// Help and version requests exit 0; usage errors and fatal failures exit 1.
pub fn run_with<I, T>(language: Language, args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match parse_args(language, args) {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors share stdout with the rest of the console output.
            print!("{}", e.render());
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
        }
    };

    let outcome = load_config(Path::new("."))
        .context("failed to load sigscan.toml")
        .and_then(|config| dispatch(cli, language, config));

    match outcome {
        Ok(()) => 0,
        Err(err) => {
            println!("{}", error_line(&err));
            log_error(&format!("{:#}", err));
            1
        }
    }
}

/// Entry point shared by the three binaries.
pub fn run(language: Language) -> i32 {
    std::panic::set_hook(Box::new(move |info| {
        eprintln!("[PANIC] {} internal error: {}", language.program_name(), info);
    }));

    // JSON logs to stderr, filtered by RUST_LOG
    init_structured_logging();

    run_with(language, std::env::args_os())
}
