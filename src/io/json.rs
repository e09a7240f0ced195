//! JSON document sinks.
//!
//! Two layouts for the same logical output, a single JSON array of record
//! objects. [`write_array_pretty`] serializes a fully materialized batch
//! with 2-space indentation. [`JsonArrayWriter`] emits the array
//! incrementally, one compact record per line, so a table can be written
//! without ever holding more than a chunk of it.
//!
//! Both layouts keep non-ASCII text as literal UTF-8 rather than `\u`
//! escapes, and both parse to the same values.

use std::io::{self, Write};

use serde::Serialize;

/// Writes `records` as one pretty-printed JSON array and flushes.
///
/// An empty batch produces exactly `[]`.
///
/// # Errors
///
/// Returns any error from serialization or the underlying writer.
pub fn write_array_pretty<W, T>(mut writer: W, records: &[T]) -> io::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NotStarted,
    WroteFirst,
    WroteSubsequent,
    Closed,
}

/// Incremental writer for a JSON array of records.
///
/// The opening bracket is written on construction; each record lands on
/// its own indented line, comma-separated; [`JsonArrayWriter::close`]
/// writes the closing bracket exactly once no matter how often it is
/// called. Separator placement is tracked explicitly, so the output is a
/// syntactically valid array for every record count, including zero.
pub struct JsonArrayWriter<W: Write> {
    writer: W,
    state: State,
    written: usize,
}

impl<W: Write> JsonArrayWriter<W> {
    /// Starts a new array, writing the opening bracket immediately.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn new(mut writer: W) -> io::Result<Self> {
        writer.write_all(b"[")?;
        Ok(Self {
            writer,
            state: State::NotStarted,
            written: 0,
        })
    }

    /// Appends one record to the array.
    ///
    /// # Errors
    ///
    /// Fails when the array is already closed, and on any serialization
    /// or writer error.
    pub fn write<T: Serialize>(&mut self, record: &T) -> io::Result<()> {
        match self.state {
            State::NotStarted => {
                self.writer.write_all(b"\n  ")?;
                self.state = State::WroteFirst;
            }
            State::WroteFirst | State::WroteSubsequent => {
                self.writer.write_all(b",\n  ")?;
                self.state = State::WroteSubsequent;
            }
            State::Closed => {
                return Err(io::Error::other("array already closed"));
            }
        }
        serde_json::to_writer(&mut self.writer, record)?;
        self.written += 1;
        Ok(())
    }

    /// Terminates the array and flushes. Calling it again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn close(&mut self) -> io::Result<()> {
        if self.state != State::Closed {
            self.writer.write_all(b"\n]")?;
            self.writer.flush()?;
            self.state = State::Closed;
        }
        Ok(())
    }

    /// Closes the array and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns any error from [`JsonArrayWriter::close`].
    pub fn finish(mut self) -> io::Result<W> {
        self.close()?;
        Ok(self.writer)
    }

    /// Records written so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }
}
