//! Customer arrival input sources.
//!
//! The driver consumes arrival records through the [`ArrivalSource`] trait
//! so the core stays independent of where records come from. Two sources are
//! provided:
//!
//! - [`RecordReader`] — parses whitespace-separated `arrival service
//!   priority` triples from any buffered reader (the original's file
//!   format).
//! - [`VecSource`] — serves records from an in-memory list, for tests and
//!   programmatic runs.
//!
//! `Ok(None)` uniformly means end-of-input, whether the stream ran dry or a
//! sentinel record (both time fields non-positive) was read.

use std::io::BufRead;

use thiserror::Error;

use crate::models::ArrivalRecord;

/// Errors reported while reading arrival records.
#[derive(Debug, Error)]
pub enum ArrivalError {
    /// The underlying stream failed.
    #[error("input error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream yielded non-numeric, non-finite, or incomplete fields.
    #[error("malformed input record at line {line}: {detail}")]
    MalformedRecord { line: usize, detail: String },
}

/// A stream of customer arrival records.
pub trait ArrivalSource {
    /// Pull the next arrival record.
    ///
    /// Returns `Ok(None)` once the input is exhausted or the end-of-input
    /// sentinel has been read; subsequent calls keep returning `Ok(None)`.
    fn next_record(&mut self) -> Result<Option<ArrivalRecord>, ArrivalError>;
}

/// Arrival source parsing whitespace-separated text records.
///
/// Each record is three fields in order: arrival time, service duration,
/// priority. Fields may be split across lines; blank lines are skipped.
///
/// # Example
/// ```
/// use std::io::Cursor;
/// use teller_sim_core::arrivals::{ArrivalSource, RecordReader};
///
/// let mut reader = RecordReader::new(Cursor::new("1.0 2.5 3\n0 0 0\n"));
/// let record = reader.next_record().unwrap().unwrap();
/// assert_eq!(record.arrival_time, 1.0);
/// assert_eq!(record.priority, 3);
///
/// // The 0 0 0 sentinel ends the input.
/// assert!(reader.next_record().unwrap().is_none());
/// ```
pub struct RecordReader<R: BufRead> {
    reader: R,
    /// Tokens from the current line not yet consumed, in reverse order.
    pending: Vec<String>,
    line: usize,
    finished: bool,
}

impl<R: BufRead> RecordReader<R> {
    /// Create a reader over a buffered input stream.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
            line: 0,
            finished: false,
        }
    }

    /// Next whitespace-separated token, or `None` at end of stream.
    fn next_token(&mut self) -> Result<Option<String>, ArrivalError> {
        loop {
            if let Some(token) = self.pending.pop() {
                return Ok(Some(token));
            }

            let mut buf = String::new();
            if self.reader.read_line(&mut buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            self.pending
                .extend(buf.split_whitespace().rev().map(str::to_string));
        }
    }

    /// Next token, or a malformed-record error if the stream ends mid-record.
    fn require_token(&mut self, what: &str) -> Result<String, ArrivalError> {
        match self.next_token()? {
            Some(token) => Ok(token),
            None => Err(ArrivalError::MalformedRecord {
                line: self.line,
                detail: format!("record truncated before {}", what),
            }),
        }
    }

    fn parse_field<T: std::str::FromStr>(
        &self,
        token: &str,
        what: &str,
    ) -> Result<T, ArrivalError> {
        token.parse().map_err(|_| ArrivalError::MalformedRecord {
            line: self.line,
            detail: format!("invalid {}: {:?}", what, token),
        })
    }
}

impl<R: BufRead> ArrivalSource for RecordReader<R> {
    fn next_record(&mut self) -> Result<Option<ArrivalRecord>, ArrivalError> {
        if self.finished {
            return Ok(None);
        }

        let first = match self.next_token()? {
            Some(token) => token,
            None => {
                self.finished = true;
                return Ok(None);
            }
        };

        let second = self.require_token("service duration")?;
        let third = self.require_token("priority")?;

        let arrival_time: f64 = self.parse_field(&first, "arrival time")?;
        let service_duration: f64 = self.parse_field(&second, "service duration")?;
        let priority: i32 = self.parse_field(&third, "priority")?;

        if !arrival_time.is_finite() || !service_duration.is_finite() {
            return Err(ArrivalError::MalformedRecord {
                line: self.line,
                detail: "non-finite time field".to_string(),
            });
        }

        let record = ArrivalRecord::new(arrival_time, service_duration, priority);
        if record.is_end_marker() {
            self.finished = true;
            return Ok(None);
        }
        Ok(Some(record))
    }
}

/// Arrival source backed by an in-memory record list.
pub struct VecSource {
    records: std::vec::IntoIter<ArrivalRecord>,
    finished: bool,
}

impl VecSource {
    /// Create a source serving `records` in order.
    ///
    /// Sentinel records are honored the same way as in file input.
    pub fn new(records: Vec<ArrivalRecord>) -> Self {
        Self {
            records: records.into_iter(),
            finished: false,
        }
    }
}

impl ArrivalSource for VecSource {
    fn next_record(&mut self) -> Result<Option<ArrivalRecord>, ArrivalError> {
        if self.finished {
            return Ok(None);
        }
        match self.records.next() {
            Some(record) if record.is_end_marker() => {
                self.finished = true;
                Ok(None)
            }
            Some(record) => Ok(Some(record)),
            None => {
                self.finished = true;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(input: &str) -> RecordReader<Cursor<&str>> {
        RecordReader::new(Cursor::new(input))
    }

    #[test]
    fn test_reads_records_in_order() {
        let mut source = reader("1.0 2.0 3\n4.5 0.5 1\n");

        let first = source.next_record().unwrap().unwrap();
        assert_eq!(first, ArrivalRecord::new(1.0, 2.0, 3));

        let second = source.next_record().unwrap().unwrap();
        assert_eq!(second, ArrivalRecord::new(4.5, 0.5, 1));

        assert!(source.next_record().unwrap().is_none());
    }

    #[test]
    fn test_fields_may_span_lines() {
        let mut source = reader("1.0\n2.0\n3\n");
        let record = source.next_record().unwrap().unwrap();
        assert_eq!(record, ArrivalRecord::new(1.0, 2.0, 3));
    }

    #[test]
    fn test_sentinel_stops_reading() {
        let mut source = reader("1.0 2.0 3\n0 0 0\n9.0 9.0 9\n");
        assert!(source.next_record().unwrap().is_some());
        assert!(source.next_record().unwrap().is_none());
        // Records after the sentinel are never served.
        assert!(source.next_record().unwrap().is_none());
    }

    #[test]
    fn test_non_numeric_field_is_malformed() {
        let mut source = reader("1.0 abc 3\n");
        match source.next_record() {
            Err(ArrivalError::MalformedRecord { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected malformed record, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_truncated_record_is_malformed() {
        let mut source = reader("1.0 2.0\n");
        assert!(matches!(
            source.next_record(),
            Err(ArrivalError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_vec_source_honors_sentinel() {
        let mut source = VecSource::new(vec![
            ArrivalRecord::new(1.0, 1.0, 1),
            ArrivalRecord::new(0.0, 0.0, 0),
            ArrivalRecord::new(2.0, 1.0, 1),
        ]);
        assert!(source.next_record().unwrap().is_some());
        assert!(source.next_record().unwrap().is_none());
        assert!(source.next_record().unwrap().is_none());
    }
}
