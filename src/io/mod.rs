//! Sources and sinks: TSV tables in, JSON collections out, compression
//! handled transparently on both sides.

pub mod compression;
pub mod json;
pub mod tsv;
