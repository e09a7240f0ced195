//! Transparent compression for table sources and document sinks.
//!
//! Dataset dumps usually arrive gzip-compressed (`title.basics.tsv.gz` and
//! friends), and callers should not have to care. Streams are wrapped
//! automatically: codecs are detected by file extension first, falling back
//! to magic bytes for sources whose name gives nothing away. Paths with no
//! recognized extension and no known signature pass through untouched.
//!
//! Gzip ships built in behind the `compression-gzip` feature. Additional
//! codecs can be registered at runtime:
//!
//! ```
//! use std::io::{Read, Write};
//! use std::sync::Arc;
//! use tabson::io::compression::{Codec, register_codec};
//!
//! struct Identity;
//!
//! impl Codec for Identity {
//!     fn name(&self) -> &str {
//!         "identity"
//!     }
//!     fn extensions(&self) -> &[&str] {
//!         &[".id"]
//!     }
//!     fn magic_bytes(&self) -> Option<&[u8]> {
//!         None
//!     }
//!     fn wrap_reader(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>> {
//!         Ok(reader)
//!     }
//!     fn wrap_writer(&self, writer: Box<dyn Write>) -> std::io::Result<Box<dyn Write>> {
//!         Ok(writer)
//!     }
//! }
//!
//! register_codec(Arc::new(Identity));
//! ```

use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Global codec registry.
static CODEC_REGISTRY: RwLock<Option<Vec<Arc<dyn Codec>>>> = RwLock::new(None);

/// Initialize the codec registry with built-in codecs.
fn init_registry() -> Vec<Arc<dyn Codec>> {
    vec![
        #[cfg(feature = "compression-gzip")]
        Arc::new(GzipCodec),
    ]
}

/// Get or initialize the global codec registry.
fn get_registry() -> Vec<Arc<dyn Codec>> {
    let mut lock = CODEC_REGISTRY.write().unwrap();
    if lock.is_none() {
        *lock = Some(init_registry());
    }
    lock.as_ref().unwrap().clone()
}

/// Register a custom compression codec globally.
///
/// Registered codecs participate in extension and magic-byte detection
/// alongside the built-in ones.
pub fn register_codec(codec: Arc<dyn Codec>) {
    let mut lock = CODEC_REGISTRY.write().unwrap();
    if lock.is_none() {
        *lock = Some(init_registry());
    }
    lock.as_mut().unwrap().push(codec);
}

/// A pluggable compression codec.
///
/// Implementations must be `Send + Sync`; they live in a global registry.
pub trait Codec: Send + Sync {
    /// Human-readable codec name (e.g. "gzip").
    fn name(&self) -> &str;

    /// File extensions associated with this codec, including the leading
    /// dot, lowercase (e.g. `&[".gz", ".gzip"]`).
    fn extensions(&self) -> &[&str];

    /// Magic byte signature for content-based detection, or `None` if the
    /// format has no reliable signature.
    fn magic_bytes(&self) -> Option<&[u8]>;

    /// Wraps a reader with decompression.
    fn wrap_reader(&self, reader: Box<dyn Read>) -> io::Result<Box<dyn Read>>;

    /// Wraps a writer with compression.
    fn wrap_writer(&self, writer: Box<dyn Write>) -> io::Result<Box<dyn Write>>;
}

/// Find the first registered codec whose extension matches the path.
/// Matching is case-insensitive on the full path, so `.tsv.GZ` works.
fn detect_from_extension(path: impl AsRef<Path>) -> Option<Arc<dyn Codec>> {
    let path_str = path.as_ref().to_string_lossy().to_lowercase();
    for codec in get_registry() {
        for ext in codec.extensions() {
            if path_str.ends_with(ext) {
                return Some(codec.clone());
            }
        }
    }
    None
}

/// Match the stream's leading bytes against registered codec signatures
/// without advancing the reader.
fn detect_from_magic<R: BufRead>(reader: &mut R) -> Option<Arc<dyn Codec>> {
    let buf = reader.fill_buf().ok()?;
    if buf.is_empty() {
        return None;
    }
    for codec in get_registry() {
        if let Some(magic) = codec.magic_bytes()
            && buf.starts_with(magic)
        {
            return Some(codec.clone());
        }
    }
    None
}

/// Wraps a source reader with decompression when `path_hint` or the
/// stream's leading bytes identify a registered codec.
///
/// The hint is a file name, not necessarily the file being read; callers
/// working through temporary files pass the name the data will end up
/// under. Undetected streams come back wrapped in a [`BufReader`] only.
///
/// # Errors
///
/// Returns any error from probing the stream or constructing the decoder.
pub fn input_stream<R: Read + 'static>(
    reader: R,
    path_hint: impl AsRef<Path>,
) -> io::Result<Box<dyn Read>> {
    if let Some(codec) = detect_from_extension(&path_hint) {
        return codec.wrap_reader(Box::new(reader));
    }

    let mut buf_reader = BufReader::new(reader);
    if let Some(codec) = detect_from_magic(&mut buf_reader) {
        return codec.wrap_reader(Box::new(buf_reader));
    }

    Ok(Box::new(buf_reader))
}

/// Wraps a sink writer with compression when `path_hint` identifies a
/// registered codec, by extension only.
///
/// Undetected paths come back wrapped in a [`BufWriter`].
///
/// # Errors
///
/// Returns any error from constructing the encoder.
pub fn output_stream<W: Write + 'static>(
    writer: W,
    path_hint: impl AsRef<Path>,
) -> io::Result<Box<dyn Write>> {
    if let Some(codec) = detect_from_extension(&path_hint) {
        return codec.wrap_writer(Box::new(writer));
    }
    Ok(Box::new(BufWriter::new(writer)))
}

#[cfg(feature = "compression-gzip")]
struct GzipCodec;

#[cfg(feature = "compression-gzip")]
impl Codec for GzipCodec {
    fn name(&self) -> &str {
        "gzip"
    }

    fn extensions(&self) -> &[&str] {
        &[".gz", ".gzip"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0x1f, 0x8b])
    }

    fn wrap_reader(&self, reader: Box<dyn Read>) -> io::Result<Box<dyn Read>> {
        use flate2::read::GzDecoder;
        Ok(Box::new(GzDecoder::new(reader)))
    }

    fn wrap_writer(&self, writer: Box<dyn Write>) -> io::Result<Box<dyn Write>> {
        use flate2::Compression;
        use flate2::write::GzEncoder;
        Ok(Box::new(GzEncoder::new(writer, Compression::default())))
    }
}
