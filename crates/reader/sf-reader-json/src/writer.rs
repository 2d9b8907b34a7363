//! Framed record writer and random record generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sf_error::{ProcessingStage, Result, SfError};
use sf_types::Record;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Number of records written by [`generate_file`] unless configured.
pub const DEFAULT_RECORD_COUNT: u64 = 1_000_000;

/// Fields are drawn uniformly from `-range..=range`.
pub const DEFAULT_VALUE_RANGE: i64 = 10;

const WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Writes records using the array framing the reader expects.
///
/// The opening `[` is written on construction; [`finish`](Self::finish)
/// writes the closing `]` and flushes. Dropping the writer without calling
/// `finish` leaves an unterminated array.
pub struct RecordWriter<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> RecordWriter<W> {
    /// Start a new array on `writer`.
    pub fn new(mut writer: W) -> io::Result<Self> {
        writer.write_all(b"[\n")?;
        Ok(Self { writer, written: 0 })
    }

    /// Append one record.
    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        if self.written > 0 {
            self.writer.write_all(b",\n")?;
        }
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> u64 {
        self.written
    }

    /// Close the array, flush, and hand back the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.write_all(b"]\n")?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Configuration for random record generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of records to write
    pub count: u64,

    /// Fields are drawn from `-range..=range`
    pub range: i64,

    /// Optional RNG seed for reproducible files
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_RECORD_COUNT,
            range: DEFAULT_VALUE_RANGE,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a generator configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of records.
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    /// Set the symmetric value range.
    pub fn with_range(mut self, range: i64) -> Self {
        self.range = range;
        self
    }

    /// Seed the RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.range < 0 {
            return Err(format!("range must be non-negative, got {}", self.range));
        }
        Ok(())
    }
}

/// Write `count` random records to `writer` and close the array.
pub fn generate_records<W: Write, G: Rng>(
    writer: W,
    rng: &mut G,
    count: u64,
    range: i64,
) -> io::Result<W> {
    let mut out = RecordWriter::new(writer)?;
    for _ in 0..count {
        let record = Record::new(
            rng.random_range(-range..=range),
            rng.random_range(-range..=range),
        );
        out.write_record(&record)?;
    }
    out.finish()
}

/// (Re)create `path` filled with random records.
///
/// Returns the number of records written.
pub fn generate_file(path: impl AsRef<Path>, config: &GeneratorConfig) -> Result<u64> {
    let path = path.as_ref();
    config.validate().map_err(SfError::Config)?;

    let start = Instant::now();
    let file = File::create(path).map_err(|e| SfError::io(ProcessingStage::Create, path, e))?;
    debug!(path = %path.display(), "Created record file");

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    generate_records(
        BufWriter::with_capacity(WRITE_BUFFER_SIZE, file),
        &mut rng,
        config.count,
        config.range,
    )
    .map_err(|e| SfError::io(ProcessingStage::Generate, path, e))?;

    info!(
        path = %path.display(),
        records = config.count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Generated record file"
    );

    Ok(config.count)
}
