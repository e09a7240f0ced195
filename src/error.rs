//! Error types for the conversion pipeline.
//!
//! Only failures that abort a conversion live here. Per-field problems are
//! recovered in place instead: an unparseable numeric cell becomes `null`
//! (see [`coerce_numeric`](crate::coerce_numeric)), and a value that cannot
//! be represented in JSON is written as `null` by [`Value`](crate::Value)'s
//! `Serialize` impl.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while converting a table to a document collection.
#[derive(Debug, Error)]
pub enum Error {
    /// Source file could not be opened or read at the container level.
    #[error("failed to read source {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be tokenized, including decompression errors that
    /// surface mid-read.
    #[error("failed to parse row {row} of {path}: {source}")]
    SourceParse {
        path: PathBuf,
        /// 1-based data row number; 0 when the header itself is at fault.
        row: u64,
        #[source]
        source: csv::Error,
    },

    /// A row carried more fields than the header declares.
    #[error("row {row} of {path} has {got} fields, header declares {expected}")]
    RowWidth {
        path: PathBuf,
        row: u64,
        got: usize,
        expected: usize,
    },

    /// Destination could not be created, written, or renamed into place.
    #[error("failed to write output {path}: {source}")]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Finished output failed post-write validation and was discarded.
    #[error("output {path} did not validate as JSON")]
    OutputIntegrity { path: PathBuf },
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::RowWidth {
            path: PathBuf::from("title.basics.tsv.gz"),
            row: 41,
            got: 10,
            expected: 9,
        };
        assert_eq!(
            err.to_string(),
            "row 41 of title.basics.tsv.gz has 10 fields, header declares 9"
        );
    }

    #[test]
    fn test_error_source_chain() {
        let err = Error::SourceRead {
            path: PathBuf::from("missing.tsv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let source = std::error::Error::source(&err);
        assert!(source.is_some());
    }
}
