//! sumflow CLI
//!
//! Generates a file of two-field records and sums it with a bounded
//! worker pool.

use clap::Parser;
use sf_cli_common::{format_bytes, format_number, format_signed, init_logging};

mod alloc;
mod args;
mod run;

use args::Cli;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Logs go to stderr, stdout carries the results
    init_logging(args.log_level)?;

    // Every failure is fatal; the stage tells the user where it happened
    let report = run::execute(&args).map_err(|e| run::stage_error(e, &args.file))?;

    for line in run::result_lines(&report) {
        println!("{}", line);
    }

    let summary = &report.summary;
    eprintln!();
    eprintln!("Run completed:");
    eprintln!("  Records:         {}", format_number(summary.records));
    eprintln!("  Total:           {}", format_signed(summary.total));
    eprintln!(
        "  Workers:         {} ({} received records)",
        summary.worker_count,
        summary.active_workers()
    );
    if summary.was_capped() {
        eprintln!("  Requested:       {} (capped)", summary.requested_workers);
    }
    eprintln!("  Queue capacity:  {}", summary.queue_capacity);
    eprintln!(
        "  Allocated:       {} in {} calls",
        format_bytes(report.memory.allocated_bytes),
        format_number(report.memory.allocations)
    );

    let secs = summary.duration().num_milliseconds() as f64 / 1000.0;
    eprintln!("  Duration:        {:.2}s", secs);
    if let Some(rate) = summary.records_per_second() {
        eprintln!("  Throughput:      {} records/sec", format_number(rate as u64));
    }

    Ok(())
}
