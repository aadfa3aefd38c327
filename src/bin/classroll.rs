//! Command-line front end for classroll.
//!
//! ```bash
//! # Validate a JSON array (or JSON Lines) of raw survey records
//! classroll validate responses.json --csv out/students.csv --documents out/students.jsonl
//!
//! # Use a custom vocabulary file
//! classroll validate responses.jsonl --vocabularies vocab.json
//!
//! # Print the tabular column order
//! classroll columns
//! ```
//!
//! # Exit Codes
//!
//! - 0: every record accepted
//! - 1: at least one record rejected
//! - 2: unreadable input, vocabulary file or output path

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing::{info, warn};

use classroll::schema::value_type_name;
use classroll::{write_csv_path, StudentRecord, StudentSchema, VocabularyRegistry, COLUMNS};

#[derive(Debug, Parser)]
#[command(name = "classroll", version, about = "Validate student survey records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate raw records and report every violation
    Validate(ValidateArgs),
    /// Print the tabular column order
    Columns,
}

#[derive(Debug, clap::Args)]
struct ValidateArgs {
    /// Input file holding raw records
    input: PathBuf,

    /// Input format; guessed from the extension when omitted
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// Write accepted records as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write accepted records as JSON Lines documents to this path
    #[arg(long)]
    documents: Option<PathBuf>,

    /// Vocabulary override file
    #[arg(long, env = "CLASSROLL_VOCABULARIES")]
    vocabularies: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// A single JSON array of records
    Json,
    /// One record per line
    Jsonl,
}

impl InputFormat {
    fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl") | Some("ndjson") => InputFormat::Jsonl,
            _ => InputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Validate(args) => run_validate(&args),
        Command::Columns => run_columns().map(|_| true),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run_columns() -> Result<()> {
    let mut out = io::stdout().lock();
    for column in COLUMNS {
        writeln!(out, "{column}")?;
    }
    Ok(())
}

/// Returns `Ok(true)` when every record was accepted.
fn run_validate(args: &ValidateArgs) -> Result<bool> {
    let registry = VocabularyRegistry::new();
    if let Some(path) = &args.vocabularies {
        registry
            .load_file(path)
            .with_context(|| format!("loading vocabularies from {}", path.display()))?;
    }

    let format = args.format.unwrap_or_else(|| InputFormat::detect(&args.input));
    let raws = read_records(&args.input, format)?;
    info!(records = raws.len(), input = %args.input.display(), "read input");

    let schema = StudentSchema::with_registry(registry);
    let report = schema.validate_batch(&raws);

    let mut out = io::stdout().lock();
    for (index, errors) in report.rejected() {
        writeln!(out, "record {index}: rejected")?;
        for error in errors.iter() {
            writeln!(out, "  {error}")?;
        }
    }
    writeln!(
        out,
        "{} accepted, {} rejected",
        report.accepted_count(),
        report.rejected_count()
    )?;

    let all_accepted = report.all_accepted();
    let records = report.into_records();

    if let Some(path) = &args.csv {
        if records.is_empty() {
            warn!(path = %path.display(), "no accepted records, skipping csv");
        } else {
            write_csv_path(path, &records)
                .with_context(|| format!("writing csv to {}", path.display()))?;
        }
    }
    if let Some(path) = &args.documents {
        write_documents(path, &records)
            .with_context(|| format!("writing documents to {}", path.display()))?;
    }

    Ok(all_accepted)
}

fn read_records(path: &Path, format: InputFormat) -> Result<Vec<Value>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    match format {
        InputFormat::Json => match serde_json::from_str(&text)? {
            Value::Array(items) => Ok(items),
            other => bail!(
                "expected a JSON array of records, found {}",
                value_type_name(&other)
            ),
        },
        InputFormat::Jsonl => text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str::<Value>(line).with_context(|| format!("line {}", n + 1))
            })
            .collect(),
    }
}

fn write_documents(path: &Path, records: &[StudentRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(fs::File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut out, &record.to_document())?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    info!(path = %path.display(), documents = records.len(), "wrote documents");
    Ok(())
}
