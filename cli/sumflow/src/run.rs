//! Main execution logic for the sumflow CLI.

use crate::alloc::{self, AllocationDelta};
use crate::args::Cli;
use sf_cli_common::format_megabytes;
use sf_error::{Result, SfError};
use sf_reader_json::{GeneratorConfig, generate_file};
use std::path::Path;
use sf_worker::{Pipeline, PoolConfig, RunSummary};
use tracing::info;

/// Everything reported after a successful run.
#[derive(Debug)]
pub struct RunReport {
    pub summary: RunSummary,
    pub memory: AllocationDelta,
}

/// Build the generator configuration from the arguments.
pub fn generator_config(args: &Cli) -> GeneratorConfig {
    let config = GeneratorConfig::new()
        .with_count(args.records)
        .with_range(args.range);

    match args.seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    }
}

/// Build the pool configuration from the arguments.
pub fn pool_config(args: &Cli) -> PoolConfig {
    PoolConfig::new()
        .with_worker_count(args.workers)
        .with_queue_capacity(args.queue_capacity)
}

/// Execute a run: optionally regenerate the file, then sum it.
///
/// Allocation counters cover only the processing phase, from opening the
/// file to joining the last worker.
pub fn execute(args: &Cli) -> Result<RunReport> {
    let pipeline = Pipeline::new(pool_config(args))?;

    if args.generate {
        info!(path = %args.file.display(), records = args.records, "Generating record file");
        generate_file(&args.file, &generator_config(args))?;
    }

    let before = alloc::snapshot();

    info!(path = %args.file.display(), "Processing record file");
    let summary = pipeline.run_file(&args.file)?;

    let memory = alloc::snapshot().since(&before);

    Ok(RunReport { summary, memory })
}

/// The three result lines printed on stdout, in order.
pub fn result_lines(report: &RunReport) -> [String; 3] {
    [
        format!("Total sum: {}", report.summary.total),
        format!("Memory used: {}", format_megabytes(report.memory.live_bytes)),
        format!("Number of allocations: {}", report.memory.allocations),
    ]
}

/// Wrap a run failure with the stage it happened in and the record file.
///
/// The original error stays in the chain as the cause.
pub fn stage_error(err: SfError, path: &Path) -> anyhow::Error {
    let stage = err.stage();
    anyhow::Error::new(err).context(format!("{} stage failed for {}", stage, path.display()))
}
