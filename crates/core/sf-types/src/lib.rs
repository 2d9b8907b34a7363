//! Core types for sumflow.
//!
//! - [`Record`] - The two-field record streamed through the pipeline

pub mod record;

pub use record::*;
