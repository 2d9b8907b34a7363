//! Integration tests for sumflow.
//!
//! These tests write real record files to a temporary directory and run
//! the full decode -> queue -> pool -> aggregate path over them.
//!
//! ```bash
//! cargo test -p integration-tests
//! ```

mod common;
mod malformed_test;
mod pipeline_test;
