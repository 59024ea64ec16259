//! Command-line parsing and dispatch, kept separate from the scoring code.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};

use crate::analysis::AnalysisEngine;
use crate::config::EngineConfig;
use crate::errors::AppError;
use crate::models::{AnalysisResult, StructuredDocument};
use crate::report;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sieve", version, about = "Resume scoring and analysis engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score one Structured Document JSON file, or every *.json in a directory.
    Analyze(AnalyzeArgs),
    /// Load configuration and dictionaries, validate them, and exit.
    ValidateConfig(ConfigArgs),
}

/// Configuration file options shared by every subcommand.
#[derive(Debug, Parser, Clone)]
pub struct ConfigArgs {
    /// Configuration override file (JSON; partial overrides allowed).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Dictionary override file (JSON; replaces the builtin tables).
    #[arg(long, value_name = "FILE")]
    pub dictionaries: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Structured Document JSON file, or a directory of them.
    pub input: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Newline-separated job-description terms for gap analysis.
    #[arg(long, value_name = "FILE")]
    pub job_terms: Option<PathBuf>,

    /// Write output here instead of stdout: a file for single input,
    /// a directory for batch input.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Entry point for the `sieve` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::ValidateConfig(args) => handle_validate_config(args),
    }
}

fn handle_validate_config(args: ConfigArgs) -> Result<(), AppError> {
    let config = EngineConfig::load(args.config.as_deref(), args.dictionaries.as_deref())?;
    let engine = AnalysisEngine::new(config)?;
    let dicts = engine.dictionaries();
    println!(
        "configuration ok (dictionary {}: {} technical, {} soft, {} industry terms)",
        engine.dictionary_version(),
        dicts.technical.len(),
        dicts.soft.len(),
        dicts.industry.len()
    );
    Ok(())
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = EngineConfig::load(
        args.config.config.as_deref(),
        args.config.dictionaries.as_deref(),
    )?;
    let engine = AnalysisEngine::new(config)?;
    let job_terms = match &args.job_terms {
        Some(path) => load_job_terms(path)?,
        None => Vec::new(),
    };

    if args.input.is_dir() {
        return analyze_directory(&engine, &args, &job_terms);
    }

    let rendered = analyze_file(&engine, &args.input, &job_terms, args.format)?;
    match &args.output {
        Some(path) => fs::write(path, rendered)?,
        None => print!("{rendered}"),
    }
    Ok(())
}

fn analyze_file(
    engine: &AnalysisEngine,
    path: &Path,
    job_terms: &[String],
    format: OutputFormat,
) -> Result<String, AppError> {
    let json = fs::read_to_string(path)?;
    let doc = StructuredDocument::from_json(&json)?;
    let result = engine.analyze(&doc, job_terms);
    render(engine, &result, format)
}

/// Scores every `*.json` in the directory in name order. Per-document
/// failures are reported and skipped; the command fails at the end if any
/// document did.
fn analyze_directory(
    engine: &AnalysisEngine,
    args: &AnalyzeArgs,
    job_terms: &[String],
) -> Result<(), AppError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(&args.input)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(AppError::MalformedInput(format!(
            "no .json documents found in '{}'",
            args.input.display()
        )));
    }
    if let Some(dir) = &args.output {
        fs::create_dir_all(dir)?;
    }

    let mut failures = 0usize;
    for path in &paths {
        match analyze_file(engine, path, job_terms, args.format) {
            Ok(rendered) => match &args.output {
                Some(dir) => fs::write(dir.join(output_name(path, args.format)), rendered)?,
                None => {
                    println!("--- {} ---", path.display());
                    print!("{rendered}");
                }
            },
            Err(err) => {
                failures += 1;
                error!(path = %path.display(), %err, "document failed");
            }
        }
    }
    info!(
        documents = paths.len() - failures,
        failures, "batch complete"
    );

    if failures > 0 {
        return Err(AppError::MalformedInput(format!(
            "{failures} of {} documents failed",
            paths.len()
        )));
    }
    Ok(())
}

fn render(
    engine: &AnalysisEngine,
    result: &AnalysisResult,
    format: OutputFormat,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Text => Ok(report::format_analysis(result, engine.config())),
        OutputFormat::Json => Ok(result.to_json_pretty()? + "\n"),
    }
}

fn output_name(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .unwrap_or_else(|| std::ffi::OsStr::new("document"));
    let ext = match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
    };
    PathBuf::from(stem).with_extension(ext)
}

/// One term per line; surrounding whitespace and blank lines are dropped.
fn load_job_terms(path: &Path) -> Result<Vec<String>, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
