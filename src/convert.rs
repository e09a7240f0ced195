//! Table-to-collection conversion.
//!
//! Two paths to the same result. [`convert_whole`] materializes the
//! entire table, normalizes it, and writes one pretty-printed array;
//! it also hands the cleaned records back for further use.
//! [`convert_streaming`] walks the table in bounded chunks and appends
//! each document as it is produced, so peak memory tracks the chunk
//! size instead of the table. Given the same source and classification,
//! both paths publish collections that parse to identical values.
//!
//! Neither path ever publishes a partial file. Output is staged in a
//! sibling temporary file, parsed back as JSON, and only then renamed
//! over the destination; a conversion that fails partway leaves the
//! destination untouched.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Error;
use crate::io::compression::output_stream;
use crate::io::json::{JsonArrayWriter, write_array_pretty};
use crate::io::tsv::TsvReader;
use crate::normalize::{normalize_record, sanitize_records};
use crate::record::CleanedRecord;
use crate::schema::NumericColumns;
use crate::validate::validate_hinted;

fn sink_error(path: &Path, source: std::io::Error) -> Error {
    Error::SinkWrite {
        path: path.to_path_buf(),
        source,
    }
}

/// Staging for one output file.
///
/// Bytes land in a temporary file in the destination's directory, get
/// validated, and are renamed into place by [`AtomicSink::commit`]. If
/// the sink is dropped without committing, the temporary file goes with
/// it.
struct AtomicSink {
    temp: NamedTempFile,
    dest: PathBuf,
}

impl AtomicSink {
    fn create(dest: &Path) -> Result<Self, Error> {
        let dir = if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| sink_error(dest, source))?;
            parent
        } else {
            Path::new(".")
        };
        let temp = NamedTempFile::new_in(dir).map_err(|source| sink_error(dest, source))?;
        Ok(Self {
            temp,
            dest: dest.to_path_buf(),
        })
    }

    /// Opens the staged file for writing. Compression is chosen by the
    /// destination's name, not the temporary one.
    fn stream(&self) -> Result<Box<dyn Write>, Error> {
        let file = self
            .temp
            .as_file()
            .try_clone()
            .map_err(|source| sink_error(&self.dest, source))?;
        output_stream(file, &self.dest).map_err(|source| sink_error(&self.dest, source))
    }

    /// Validates the staged bytes and renames them over the destination.
    fn commit(self) -> Result<(), Error> {
        let Self { temp, dest } = self;
        if !validate_hinted(temp.path(), &dest) {
            return Err(Error::OutputIntegrity { path: dest });
        }
        temp.persist(&dest)
            .map_err(|persist| sink_error(&dest, persist.error))?;
        Ok(())
    }
}

/// Converts a table in one pass through memory and returns the cleaned
/// records.
///
/// The whole table is read (up to `max_rows` data rows when given),
/// normalized against `numeric`, sanitized, and written to `output` as a
/// pretty-printed JSON array. An empty table publishes `[]`.
///
/// # Errors
///
/// Propagates source failures from [`TsvReader`], [`Error::SinkWrite`]
/// for destination failures, and [`Error::OutputIntegrity`] when the
/// finished file does not parse back as JSON. On any error the
/// destination is left as it was.
pub fn convert_whole(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    numeric: &NumericColumns,
    max_rows: Option<usize>,
) -> Result<Vec<CleanedRecord>, Error> {
    let input = input.as_ref();
    let output = output.as_ref();

    let mut reader = TsvReader::open(input)?;
    let present = numeric.present_in(reader.columns());
    tracing::debug!(
        path = %input.display(),
        numeric_columns = ?present,
        "starting whole-table conversion"
    );

    let mut records = Vec::new();
    loop {
        if let Some(max) = max_rows
            && records.len() >= max
        {
            break;
        }
        match reader.read_record()? {
            Some(raw) => records.push(normalize_record(&raw, numeric)),
            None => break,
        }
    }
    sanitize_records(&mut records);

    let sink = AtomicSink::create(output)?;
    let mut writer = sink.stream()?;
    write_array_pretty(&mut writer, &records).map_err(|source| sink_error(output, source))?;
    drop(writer);
    sink.commit()?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        records = records.len(),
        "whole-table conversion complete"
    );
    Ok(records)
}

/// Converts a table chunk by chunk, holding at most `chunk_size` rows at
/// a time, and returns the number of documents written.
///
/// Each chunk is normalized and appended to the output array as soon as
/// it is produced. A `chunk_size` of zero is treated as one. An empty
/// table publishes an empty array.
///
/// # Errors
///
/// Same taxonomy as [`convert_whole`]; on any error the destination is
/// left as it was, with no partially written array behind it.
pub fn convert_streaming(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    numeric: &NumericColumns,
    chunk_size: usize,
) -> Result<usize, Error> {
    let input = input.as_ref();
    let output = output.as_ref();
    let chunk_size = chunk_size.max(1);

    let mut reader = TsvReader::open(input)?;
    tracing::debug!(
        path = %input.display(),
        numeric_columns = ?numeric.present_in(reader.columns()),
        chunk_size,
        "starting streaming conversion"
    );
    let sink = AtomicSink::create(output)?;
    let mut writer =
        JsonArrayWriter::new(sink.stream()?).map_err(|source| sink_error(output, source))?;

    let mut chunks = 0usize;
    loop {
        let chunk = reader.read_chunk(chunk_size)?;
        if chunk.is_empty() {
            break;
        }
        let present = numeric.present_in(reader.columns());
        tracing::debug!(
            chunk = chunks,
            rows = chunk.len(),
            numeric_columns = present.len(),
            "processing chunk"
        );
        for raw in &chunk {
            let mut record = normalize_record(raw, numeric);
            record.sanitize();
            writer
                .write(&record)
                .map_err(|source| sink_error(output, source))?;
        }
        chunks += 1;
    }

    let total = writer.written();
    let raw_writer = writer
        .finish()
        .map_err(|source| sink_error(output, source))?;
    drop(raw_writer);
    sink.commit()?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        records = total,
        chunks,
        "streaming conversion complete"
    );
    Ok(total)
}
