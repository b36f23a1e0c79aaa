//! Pump Diagnosis CLI
//!
//! Evaluates reading sets exported by the data collector and prints the
//! diagnoses as JSON on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Diagnose one reading set (or a JSON array of them)
//! pump-diagnosis diagnose --input readings.json --pretty
//!
//! # Read from stdin
//! cat readings.json | pump-diagnosis diagnose --input -
//!
//! # Show the effective reference data
//! pump-diagnosis config dump
//!
//! # Validate a reference data file
//! pump-diagnosis config check pump_reference.toml
//! ```
//!
//! # Environment Variables
//!
//! - `PUMP_DIAGNOSIS_CONFIG`: Path to the reference data TOML file
//! - `RUST_LOG`: Logging level (default: info)

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::info;

use pump_diagnosis::config::{defaults, validation};
use pump_diagnosis::{evaluate, evaluate_batch, ReadingSet, ReferenceData};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "pump-diagnosis")]
#[command(about = "Pump and motor condition diagnosis")]
#[command(version)]
struct CliArgs {
    /// Reference data TOML file (overrides the standard search order)
    #[arg(long, global = true, env = defaults::CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines (for log shippers)
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Diagnose reading sets and print the results as JSON
    Diagnose {
        /// JSON file with one reading set or an array of them ("-" for stdin)
        #[arg(long, short, default_value = "-")]
        input: String,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Reference data utilities
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(clap::Subcommand, Debug)]
enum ConfigCommand {
    /// Print the effective reference data as TOML
    Dump,

    /// Validate a reference data file and report warnings
    Check {
        /// Path to the TOML file
        path: PathBuf,
    },
}

/// Input accepted by `diagnose`.
#[derive(Deserialize)]
#[serde(untagged)]
enum DiagnoseInput {
    Batch(Vec<ReadingSet>),
    Single(Box<ReadingSet>),
}

// ============================================================================
// Commands
// ============================================================================

/// Resolve reference data: an explicit path must load cleanly, otherwise the
/// standard search order applies.
fn load_reference(path: Option<&Path>) -> Result<ReferenceData> {
    match path {
        Some(p) => {
            let reference = ReferenceData::load_from_file(p)
                .with_context(|| format!("Failed to load reference data from {}", p.display()))?;
            info!(path = %p.display(), site = %reference.site.name, "Loaded reference data");
            Ok(reference)
        }
        None => Ok(ReferenceData::load()),
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read reading sets from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}

fn run_diagnose(reference: &ReferenceData, input: &str, pretty: bool) -> Result<()> {
    let raw = read_input(input)?;
    let parsed: DiagnoseInput =
        serde_json::from_str(&raw).context("Input is not a reading set or an array of reading sets")?;

    let output = match parsed {
        DiagnoseInput::Single(set) => to_json(&evaluate(&set, reference), pretty)?,
        DiagnoseInput::Batch(sets) => {
            info!(assets = sets.len(), "Evaluating batch");
            to_json(&evaluate_batch(&sets, reference), pretty)?
        }
    };

    println!("{}", output);
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("Failed to serialize diagnosis")
}

fn run_config_check(path: &Path) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let unknown = validation::validate_unknown_keys(&contents);
    for w in &unknown {
        println!("warning: {}", w);
    }

    let reference = ReferenceData::from_toml_str(&contents)
        .with_context(|| format!("{} is not valid reference data", path.display()))?;

    let (_, range_warnings) = validation::validate_physical_ranges(&reference);
    for w in &range_warnings {
        println!("warning: {}", w);
    }

    println!(
        "{}: OK (site '{}', {} warning(s))",
        path.display(),
        reference.site.name,
        unknown.len() + range_warnings.len()
    );
    Ok(())
}

/// Install the tracing subscriber on stderr so stdout stays machine-readable.
fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_json);

    match args.command {
        SubCommand::Diagnose { input, pretty } => {
            let reference = load_reference(args.config.as_deref())?;
            run_diagnose(&reference, &input, pretty)
        }
        SubCommand::Config(ConfigCommand::Dump) => {
            let reference = load_reference(args.config.as_deref())?;
            print!("{}", reference.to_toml()?);
            Ok(())
        }
        SubCommand::Config(ConfigCommand::Check { path }) => run_config_check(&path),
    }
}
