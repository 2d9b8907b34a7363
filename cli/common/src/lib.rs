//! Shared utilities for sumflow CLI binaries.
//!
//! Log level selection, logging setup and human-readable number formatting.

pub mod args;
pub mod format;
pub mod logging;

pub use args::LogLevel;
pub use format::{format_bytes, format_megabytes, format_number, format_signed};
pub use logging::init_logging;
