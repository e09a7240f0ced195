//! Tab-separated table sources.
//!
//! A [`TsvReader`] turns a (possibly compressed) TSV file into
//! [`RawRecord`]s one row at a time, so callers choose between slurping a
//! table and walking it in bounded chunks. The first row is always the
//! header; every later row is data keyed by it.
//!
//! Rows narrower than the header are padded with absent cells, matching
//! how dataset dumps omit trailing fields. Rows wider than the header are
//! structural corruption and fail the read, and a source with no header
//! row at all fails the open.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Error;
use crate::io::compression::input_stream;
use crate::record::RawRecord;

/// Streaming reader over one TSV table.
pub struct TsvReader {
    reader: csv::Reader<Box<dyn io::Read>>,
    columns: Arc<[String]>,
    path: PathBuf,
    rows_read: u64,
}

impl TsvReader {
    /// Opens a table, decompressing transparently, and reads its header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceRead`] when the file cannot be opened or
    /// holds no header row at all, and [`Error::SourceParse`] when the
    /// header row cannot be tokenized.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| Error::SourceRead {
            path: path.clone(),
            source,
        })?;
        let stream = input_stream(file, &path).map_err(|source| Error::SourceRead {
            path: path.clone(),
            source,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_reader(stream);
        let columns: Arc<[String]> = reader
            .headers()
            .map_err(|source| Error::SourceParse {
                path: path.clone(),
                row: 0,
                source,
            })?
            .iter()
            .map(String::from)
            .collect();
        // An exhausted source yields a zero-field header; a header-only
        // table still has columns and converts to an empty collection.
        if columns.is_empty() {
            return Err(Error::SourceRead {
                path,
                source: io::Error::new(io::ErrorKind::UnexpectedEof, "no header row"),
            });
        }

        tracing::debug!(
            path = %path.display(),
            columns = columns.len(),
            "opened table source"
        );
        Ok(Self {
            reader,
            columns,
            path,
            rows_read: 0,
        })
    }

    /// Column names from the header row, in table order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Path this reader was opened on.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data rows handed out so far.
    #[must_use]
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    /// Reads the next data row, or `None` at end of table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceParse`] when the row cannot be tokenized
    /// (including decompression failures surfacing mid-read) and
    /// [`Error::RowWidth`] when it carries more fields than the header.
    pub fn read_record(&mut self) -> Result<Option<RawRecord>, Error> {
        let mut row = csv::StringRecord::new();
        let more = self
            .reader
            .read_record(&mut row)
            .map_err(|source| Error::SourceParse {
                path: self.path.clone(),
                row: self.rows_read + 1,
                source,
            })?;
        if !more {
            return Ok(None);
        }
        self.rows_read += 1;

        if row.len() > self.columns.len() {
            return Err(Error::RowWidth {
                path: self.path.clone(),
                row: self.rows_read,
                got: row.len(),
                expected: self.columns.len(),
            });
        }

        let cells = (0..self.columns.len())
            .map(|index| row.get(index).map(str::to_string))
            .collect();
        Ok(Some(RawRecord::new(self.columns.clone(), cells)))
    }

    /// Reads up to `max_rows` data rows. An empty result means end of
    /// table.
    ///
    /// # Errors
    ///
    /// Propagates the first failure from [`TsvReader::read_record`].
    pub fn read_chunk(&mut self, max_rows: usize) -> Result<Vec<RawRecord>, Error> {
        let mut chunk = Vec::with_capacity(max_rows.min(1024));
        while chunk.len() < max_rows {
            match self.read_record()? {
                Some(record) => chunk.push(record),
                None => break,
            }
        }
        Ok(chunk)
    }
}

impl std::fmt::Debug for TsvReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TsvReader")
            .field("path", &self.path)
            .field("columns", &self.columns.len())
            .field("rows_read", &self.rows_read)
            .finish_non_exhaustive()
    }
}

/// Reads at most `rows` data rows from the head of a table, for quick
/// inspection without a full conversion.
///
/// # Errors
///
/// Propagates any failure from opening or reading the table.
pub fn preview(path: impl AsRef<Path>, rows: usize) -> Result<Vec<RawRecord>, Error> {
    let mut reader = TsvReader::open(path)?;
    reader.read_chunk(rows)
}
