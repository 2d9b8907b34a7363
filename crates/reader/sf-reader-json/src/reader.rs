//! Incremental decoder for framed record arrays.
//!
//! The decoder never materializes the array: it walks the framing bytes
//! itself and hands each element to serde_json, so memory stays bounded by
//! the read buffer plus one record regardless of file size.

use serde::Deserialize;
use sf_error::{FormatError, ProcessingStage, Result, SfError};
use sf_types::Record;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Read buffer size used by [`RecordSource::open`].
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Label used in diagnostics when the source has no backing path.
const STREAM_ORIGIN: &str = "<stream>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// `[` consumed, no element read yet
    Opened,
    /// At least one element read
    AfterRecord,
    /// `]` consumed or an error was returned
    Done,
}

/// Lazy, single-pass sequence of [`Record`]s decoded from a framed stream.
///
/// Construction checks the opening `[` eagerly, so a stream with the wrong
/// leading token fails before any record is produced. Iteration yields
/// records in stream order and stops at the closing `]`. The first error
/// ends the sequence.
///
/// Works over any [`BufRead`].
pub struct RecordSource<R> {
    reader: R,
    origin: PathBuf,
    offset: u64,
    records: u64,
    state: State,
}

impl RecordSource<BufReader<File>> {
    /// Open a record file for streaming.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SfError::io(ProcessingStage::Open, path, e))?;
        debug!(path = %path.display(), "Opened record file");

        Self::with_origin(BufReader::with_capacity(READ_BUFFER_SIZE, file), path)
    }
}

impl<R: BufRead> RecordSource<R> {
    /// Wrap a buffered stream, consuming the opening `[`.
    pub fn new(reader: R) -> Result<Self> {
        Self::with_origin(reader, STREAM_ORIGIN)
    }

    /// Wrap a buffered stream, labelling diagnostics with `origin`.
    pub fn with_origin(reader: R, origin: impl AsRef<Path>) -> Result<Self> {
        let mut source = Self {
            reader,
            origin: origin.as_ref().to_path_buf(),
            offset: 0,
            records: 0,
            state: State::Opened,
        };

        match source.peek_significant()? {
            Some(b'[') => source.consume(1),
            other => {
                return Err(FormatError::MissingArrayStart {
                    offset: source.offset,
                    found: describe(other),
                }
                .into());
            }
        }

        Ok(source)
    }

    /// Number of records decoded so far.
    pub fn records_decoded(&self) -> u64 {
        self.records
    }

    /// Number of bytes consumed from the underlying stream so far.
    pub fn bytes_consumed(&self) -> u64 {
        self.offset
    }

    /// Path (or stream label) the records are read from.
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    fn advance(&mut self) -> Result<Option<Record>> {
        match self.state {
            State::Done => return Ok(None),
            State::Opened => {
                if self.peek_significant()? == Some(b']') {
                    self.close();
                    return Ok(None);
                }
            }
            State::AfterRecord => match self.peek_significant()? {
                Some(b']') => {
                    self.close();
                    return Ok(None);
                }
                Some(b',') => self.consume(1),
                None => {
                    return Err(FormatError::UnexpectedEof {
                        offset: self.offset,
                        records: self.records,
                    }
                    .into());
                }
                other => {
                    return Err(FormatError::UnexpectedToken {
                        index: self.records - 1,
                        offset: self.offset,
                        found: describe(other),
                    }
                    .into());
                }
            },
        }

        let record = self.decode_record()?;
        self.records += 1;
        self.state = State::AfterRecord;

        trace!(index = self.records - 1, a = record.a, b = record.b, "Decoded record");
        Ok(Some(record))
    }

    fn close(&mut self) {
        self.consume(1);
        self.state = State::Done;
        debug!(records = self.records, bytes = self.offset, "Reached end of record array");
    }

    /// Decode one element, which must be a JSON object.
    fn decode_record(&mut self) -> Result<Record> {
        let index = self.records;
        let start = match self.peek_significant()? {
            Some(b'{') => self.offset,
            None => {
                return Err(FormatError::UnexpectedEof {
                    offset: self.offset,
                    records: self.records,
                }
                .into());
            }
            other => {
                return Err(FormatError::InvalidRecord {
                    index,
                    offset: self.offset,
                    message: format!("expected an object, found {}", describe(other)),
                }
                .into());
            }
        };

        let mut counting = CountingReader {
            inner: &mut self.reader,
            count: 0,
        };
        let result = {
            let mut de = serde_json::Deserializer::from_reader(&mut counting);
            Record::deserialize(&mut de)
        };
        self.offset += counting.count;

        result.map_err(|e| {
            if e.is_io() {
                SfError::io(ProcessingStage::Decode, &self.origin, io::Error::from(e))
            } else if e.is_eof() {
                FormatError::UnexpectedEof {
                    offset: self.offset,
                    records: self.records,
                }
                .into()
            } else {
                FormatError::InvalidRecord {
                    index,
                    offset: start,
                    message: e.to_string(),
                }
                .into()
            }
        })
    }

    /// Skip whitespace and return the next byte without consuming it.
    fn peek_significant(&mut self) -> Result<Option<u8>> {
        loop {
            let (skipped, next) = match self.reader.fill_buf() {
                Ok(buf) if buf.is_empty() => return Ok(None),
                Ok(buf) => match buf.iter().position(|b| !b.is_ascii_whitespace()) {
                    Some(pos) => (pos, Some(buf[pos])),
                    None => (buf.len(), None),
                },
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(SfError::io(ProcessingStage::Decode, &self.origin, e)),
            };

            self.consume(skipped);
            if next.is_some() {
                return Ok(next);
            }
        }
    }

    fn consume(&mut self, amount: usize) {
        self.reader.consume(amount);
        self.offset += amount as u64;
    }
}

impl<R: BufRead> Iterator for RecordSource<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.state = State::Done;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for RecordSource<R> {}

/// Tracks how many bytes serde_json pulled while decoding one element.
struct CountingReader<'a, R> {
    inner: &'a mut R,
    count: u64,
}

impl<R: Read> Read for CountingReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

fn describe(byte: Option<u8>) -> String {
    match byte {
        None => "end of input".to_string(),
        Some(b) if b.is_ascii_graphic() => format!("'{}'", b as char),
        Some(b) => format!("byte 0x{:02x}", b),
    }
}
