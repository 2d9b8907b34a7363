//! The record type carried through the pipeline.

use serde::{Deserialize, Serialize};

/// A fixed-shape record with two signed integer fields.
///
/// Records are produced by the generator or decoded from a record file,
/// consumed exactly once by a single worker, then dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub a: i64,
    pub b: i64,
}

impl Record {
    /// Create a new record.
    pub fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    /// The record's contribution to the aggregate, `a + b`.
    ///
    /// Widened to `i128` so neither the per-record sum nor any realistic
    /// aggregate of them can overflow.
    #[inline]
    pub fn sum(&self) -> i128 {
        self.a as i128 + self.b as i128
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_sum() {
        assert_eq!(Record::new(3, 4).sum(), 7);
        assert_eq!(Record::new(-1, 2).sum(), 1);
        assert_eq!(Record::new(-10, -10).sum(), -20);
    }

    #[test]
    fn test_record_sum_does_not_overflow() {
        let record = Record::new(i64::MAX, i64::MAX);
        assert_eq!(record.sum(), 2 * i64::MAX as i128);
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_string(&Record::new(3, -4)).unwrap();
        assert_eq!(json, r#"{"a":3,"b":-4}"#);
    }

    #[test]
    fn test_record_rejects_missing_field() {
        let result = serde_json::from_str::<Record>(r#"{"a":3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_record_rejects_non_integer() {
        assert!(serde_json::from_str::<Record>(r#"{"a":3,"b":"x"}"#).is_err());
        assert!(serde_json::from_str::<Record>(r#"{"a":1.5,"b":2}"#).is_err());
    }
}
