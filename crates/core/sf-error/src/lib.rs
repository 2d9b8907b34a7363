//! Error types for sumflow.
//!
//! This crate provides:
//! - [`SfError`] - Top-level error enum for all pipeline errors
//! - [`FormatError`] - Decoding failures in the framed record stream
//! - [`ProcessingStage`] - Where in a run an error was detected
//!
//! Every error is fatal. Nothing is retried and there is no partial-success
//! mode: a run either consumes and sums the whole input or aborts.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level error type for sumflow.
#[derive(Error, Debug)]
pub enum SfError {
    /// Invalid arguments or configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// File creation, open or read failures
    #[error("I/O error during {stage} of {}: {source}", path.display())]
    Io {
        stage: ProcessingStage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed framing or record
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// A worker thread could not be started
    #[error("Failed to spawn worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: std::io::Error,
    },

    /// A worker thread panicked before merging its partial sum
    #[error("Worker {0} panicked")]
    WorkerPanicked(usize),

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SfError {
    /// Create an I/O error tagged with the stage and path it occurred at.
    pub fn io(stage: ProcessingStage, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            stage,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// The processing stage the error was detected in.
    pub fn stage(&self) -> ProcessingStage {
        match self {
            Self::Config(_) => ProcessingStage::Config,
            Self::Io { stage, .. } => *stage,
            Self::Format(_) => ProcessingStage::Decode,
            Self::Spawn { .. } | Self::WorkerPanicked(_) => ProcessingStage::Aggregate,
            Self::Other(_) => ProcessingStage::Aggregate,
        }
    }
}

/// Errors decoding the framed record stream.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The stream did not open with `[`
    #[error("Expected start of array '[' at byte {offset}, found {found}")]
    MissingArrayStart { offset: u64, found: String },

    /// A record element could not be decoded into the two-field shape
    #[error("Invalid record {index} at byte {offset}: {message}")]
    InvalidRecord {
        index: u64,
        offset: u64,
        message: String,
    },

    /// Something other than `,` or `]` followed a record
    #[error("Expected ',' or ']' after record {index} at byte {offset}, found {found}")]
    UnexpectedToken {
        index: u64,
        offset: u64,
        found: String,
    },

    /// Input ended before the closing `]`
    #[error("Unexpected end of input at byte {offset} after {records} records")]
    UnexpectedEof { offset: u64, records: u64 },
}

/// Stage of a run, used to label diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Argument and configuration validation
    Config,

    /// Creating the record file
    Create,

    /// Writing generated records
    Generate,

    /// Opening the record file for processing
    Open,

    /// Decoding records from the stream
    Decode,

    /// Worker pool and aggregation
    Aggregate,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config => write!(f, "Config"),
            Self::Create => write!(f, "Create"),
            Self::Generate => write!(f, "Generate"),
            Self::Open => write!(f, "Open"),
            Self::Decode => write!(f, "Decode"),
            Self::Aggregate => write!(f, "Aggregate"),
        }
    }
}

/// Result type alias using SfError.
pub type Result<T> = std::result::Result<T, SfError>;
