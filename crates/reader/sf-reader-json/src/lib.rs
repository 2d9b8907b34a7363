//! Streaming reader and writer for framed JSON record files.
//!
//! A record file is a single JSON array of `{"a": <int>, "b": <int>}`
//! objects. The writer emits one element per line with each separating
//! comma on its own line:
//!
//! ```text
//! [
//! {"a":3,"b":4}
//! ,
//! {"a":-1,"b":2}
//! ]
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sf_reader_json::{GeneratorConfig, RecordSource, generate_file};
//!
//! generate_file("records.json", &GeneratorConfig::new().with_count(1000))?;
//!
//! let mut total = 0i128;
//! for record in RecordSource::open("records.json")? {
//!     total += record?.sum();
//! }
//! ```

mod reader;
mod writer;

pub use reader::RecordSource;
pub use writer::{
    DEFAULT_RECORD_COUNT, DEFAULT_VALUE_RANGE, GeneratorConfig, RecordWriter, generate_file,
    generate_records,
};
