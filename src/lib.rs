//! # Tabson
//!
//! Converts tab-separated dataset dumps into JSON document collections.
//! Tabson reads TSV tables (plain or gzip-compressed), collapses their
//! assorted missing-value spellings into `null`, types every field, and
//! writes valid JSON arrays of record objects, either in one pass through
//! memory or as a bounded-memory stream.
//!
//! ## Key Features
//!
//! - **Missing-value normalization** - `\N`, `NaN`, `NULL`, and the empty
//!   string all become `null`, case insensitively
//! - **Typed fields** - every cell lands as exactly one of `null`,
//!   integer, float, or string; whole-number floats collapse to integers
//! - **Two conversion paths** - whole-table for moderate inputs, chunked
//!   streaming for dumps larger than memory
//! - **Transparent compression** - sources and sinks named `.gz` are
//!   handled automatically, with magic-byte detection as a fallback
//! - **Atomic outputs** - collections are staged, validated as JSON, and
//!   only then renamed into place; a failed run leaves nothing behind
//!
//! ## Quick Start
//!
//! ```no_run
//! use tabson::{NumericColumns, convert_streaming, validate};
//!
//! fn main() -> tabson::Result<()> {
//!     let numeric = NumericColumns::title_basics();
//!     let written = convert_streaming(
//!         "title.basics.tsv.gz",
//!         "title.basics.json",
//!         &numeric,
//!         200_000,
//!     )?;
//!     println!("wrote {written} documents");
//!     assert!(validate("title.basics.json"));
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Values and normalization
//!
//! A [`Value`] is the closed union every field normalizes into. The rules
//! are fixed: absent cells and missing-value sentinels become
//! [`Value::Null`]; fields in columns named by a [`NumericColumns`]
//! classification go through [`coerce_numeric`]; everything else stays a
//! string, byte for byte. Normalization is total, so a conversion never
//! fails on field content, it degrades the field to `null`.
//!
//! ### Conversion paths
//!
//! [`convert_whole`] materializes the table, hands the cleaned records
//! back, and writes a pretty-printed array. [`convert_streaming`] walks
//! the table in chunks and appends one compact document per line, holding
//! at most a chunk of rows at a time. Both paths publish collections that
//! parse to identical values.
//!
//! ```no_run
//! use tabson::{NumericColumns, convert_whole};
//!
//! # fn main() -> tabson::Result<()> {
//! let numeric = NumericColumns::name_basics();
//! let records = convert_whole("name.basics.tsv.gz", "name.basics.json", &numeric, None)?;
//! println!("first person: {:?}", records.first());
//! # Ok(())
//! # }
//! ```
//!
//! ### Output integrity
//!
//! Finished files are parsed back with [`validate`] before they are
//! renamed over the destination. An output that exists is therefore
//! always complete, well-formed JSON; a conversion that failed never
//! replaces or truncates an earlier result.
//!
//! ## Feature Flags
//!
//! - `compression-gzip` *(default)* - gzip sources and sinks via `flate2`
//!
//! Custom codecs can be added at runtime through
//! [`io::compression::register_codec`].
//!
//! ## Module Overview
//!
//! - [`value`] - The canonical cell union and numeric coercion
//! - [`schema`] - Numeric-column classification
//! - [`record`] - Raw and cleaned row types
//! - [`normalize`] - Field and row normalization rules
//! - [`convert`] - Whole-table and streaming conversion drivers
//! - [`validate`] - Post-write JSON validation
//! - [`io`] - TSV sources, JSON sinks, and compression codecs
//! - [`error`] - The conversion error taxonomy

pub mod convert;
pub mod error;
pub mod io;
pub mod normalize;
pub mod record;
pub mod schema;
pub mod validate;
pub mod value;

// General re-exports
pub use convert::{convert_streaming, convert_whole};
pub use error::{Error, Result};
pub use io::json::{JsonArrayWriter, write_array_pretty};
pub use io::tsv::{TsvReader, preview};
pub use normalize::{normalize_field, normalize_record, sanitize_records};
pub use record::{CleanedRecord, RawRecord};
pub use schema::NumericColumns;
pub use validate::validate;
pub use value::{Value, coerce_numeric, is_missing_token};
