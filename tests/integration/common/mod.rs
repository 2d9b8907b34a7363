//! Shared helpers for integration tests.

use sf_reader_json::RecordWriter;
use sf_types::Record;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding record files for one test.
pub struct RecordFiles {
    dir: TempDir,
}

impl RecordFiles {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Path of `name` inside the directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `records` with the standard framing and return the path.
    pub fn write(&self, name: &str, records: &[Record]) -> PathBuf {
        let path = self.path(name);
        write_records(&path, records);
        path
    }

    /// Write raw text and return the path.
    pub fn write_raw(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("write raw file");
        path
    }
}

pub fn write_records(path: &Path, records: &[Record]) {
    let file = File::create(path).expect("create record file");
    let mut writer = RecordWriter::new(BufWriter::new(file)).expect("open array");
    for record in records {
        writer.write_record(record).expect("write record");
    }
    writer.finish().expect("close array");
}

/// Exact sum of `a + b` over `records`.
pub fn expected_total(records: &[Record]) -> i128 {
    records.iter().map(Record::sum).sum()
}
