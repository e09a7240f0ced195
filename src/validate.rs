//! Post-write output validation.
//!
//! A conversion is only as good as the file it leaves behind, so the
//! converters parse their finished output back before publishing it. The
//! check streams through [`serde_json`] without building a value tree,
//! which keeps it usable on collections far larger than memory.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use serde::de::IgnoredAny;

use crate::io::compression::input_stream;

/// Reports whether `path` holds exactly one well-formed JSON value, with
/// nothing but whitespace after it.
///
/// Compressed files are decompressed transparently. Any failure to open,
/// decompress, or parse counts as invalid; the check itself never errors.
#[must_use]
pub fn validate(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    validate_hinted(path, path)
}

/// Validation with a codec-detection hint that may differ from `path`,
/// for data sitting in a temporary file that will be published under its
/// final name.
pub(crate) fn validate_hinted(path: &Path, hint: &Path) -> bool {
    let ok = parses_as_json(path, hint);
    if !ok {
        tracing::warn!(path = %hint.display(), "output did not parse as JSON");
    }
    ok
}

fn parses_as_json(path: &Path, hint: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let Ok(stream) = input_stream(file, hint) else {
        return false;
    };
    let mut deserializer = serde_json::Deserializer::from_reader(BufReader::new(stream));
    if IgnoredAny::deserialize(&mut deserializer).is_err() {
        return false;
    }
    deserializer.end().is_ok()
}
