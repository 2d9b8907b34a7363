//! CLI argument definitions for sumflow.

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
pub use sf_cli_common::LogLevel;
use sf_reader_json::{DEFAULT_RECORD_COUNT, DEFAULT_VALUE_RANGE};
use sf_worker::DEFAULT_QUEUE_CAPACITY;
use std::path::PathBuf;

/// Sum a file of `{"a": int, "b": int}` records with a pool of workers.
///
/// The file is streamed by a single decoder into a bounded queue that the
/// workers drain. Prints the total and the memory allocated while summing.
///
/// ## Examples
///
/// Generate one million records and sum them with 8 workers:
///   sumflow records.json 8 true
///
/// Re-sum the existing file with the maximum number of workers:
///   sumflow records.json 1000 false
#[derive(Parser, Debug)]
#[command(name = "sumflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Record file to read (and to write when GENERATE is true)
    pub file: PathBuf,

    /// Number of worker threads (>= 1, capped at 1000)
    #[arg(value_parser = parse_positive_usize)]
    pub workers: usize,

    /// Regenerate the record file before processing (true/false)
    #[arg(action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub generate: bool,

    // === Generation ===
    /// Number of records to generate
    #[arg(long, default_value_t = DEFAULT_RECORD_COUNT)]
    pub records: u64,

    /// Generated fields are drawn from -RANGE..=RANGE
    #[arg(long, default_value_t = DEFAULT_VALUE_RANGE, value_parser = clap::value_parser!(i64).range(0..))]
    pub range: i64,

    /// Seed for reproducible generation
    #[arg(long)]
    pub seed: Option<u64>,

    // === Processing ===
    /// Capacity of the record queue (must be >= 1)
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY, value_parser = parse_positive_usize)]
    pub queue_capacity: usize,

    // === Logging ===
    /// Log level
    #[arg(short = 'l', long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Parse a positive usize (>= 1).
fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if value < 1 {
        return Err(format!("{} is not in 1..", value));
    }
    Ok(value)
}
