//! Row representations on either side of normalization.
//!
//! A [`RawRecord`] is one parsed source row: raw field text keyed by the
//! header, with absent trailing fields kept distinct from empty ones. A
//! [`CleanedRecord`] is the same row after normalization, every cell a
//! typed [`Value`]. Both preserve header order, and records from one table
//! share a single header allocation.

use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::Value;

/// One source row before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    columns: Arc<[String]>,
    cells: Vec<Option<String>>,
}

impl RawRecord {
    /// Builds a record over a shared header, padding absent trailing cells
    /// with `None`.
    pub(crate) fn new(columns: Arc<[String]>, mut cells: Vec<Option<String>>) -> Self {
        cells.resize(columns.len(), None);
        Self { columns, cells }
    }

    /// Builds a record from `(column, field)` pairs, mostly useful for
    /// assembling rows outside a table source.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut columns = Vec::new();
        let mut cells = Vec::new();
        for (column, cell) in pairs {
            columns.push(column.to_string());
            cells.push(cell.map(str::to_string));
        }
        Self {
            columns: columns.into(),
            cells,
        }
    }

    /// Column names in header order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub(crate) fn columns_arc(&self) -> &Arc<[String]> {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Raw text of the named field. `None` for an absent cell and for a
    /// column the header does not declare.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|name| name == column)?;
        self.cells[index].as_deref()
    }

    /// Iterates `(column, field)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter().map(Option::as_deref))
    }
}

/// One row after normalization, ready to serialize as a JSON object.
///
/// Serialization writes one key per column in header order, so converted
/// documents keep the field order of the source table.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedRecord {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl CleanedRecord {
    pub(crate) fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Builds a record from `(column, value)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut columns = Vec::new();
        let mut values = Vec::new();
        for (column, value) in pairs {
            columns.push(column.into());
            values.push(value);
        }
        Self {
            columns: columns.into(),
            values,
        }
    }

    /// Column names in header order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Value of the named column, or `None` if the header does not declare
    /// it.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|name| name == column)?;
        Some(&self.values[index])
    }

    /// Iterates `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Applies [`Value::sanitize`] to every cell.
    pub fn sanitize(&mut self) {
        for value in &mut self.values {
            value.sanitize();
        }
    }
}

impl Serialize for CleanedRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_record_distinguishes_absent_from_empty() {
        let record = RawRecord::from_pairs([("a", Some("")), ("b", None)]);
        assert_eq!(record.get("a"), Some(""));
        assert_eq!(record.get("b"), None);
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn short_rows_pad_with_absent_cells() {
        let columns: Arc<[String]> = vec!["a".to_string(), "b".to_string(), "c".to_string()].into();
        let record = RawRecord::new(columns, vec![Some("1".to_string())]);
        assert_eq!(record.get("a"), Some("1"));
        assert_eq!(record.get("b"), None);
        assert_eq!(record.get("c"), None);
    }

    #[test]
    fn len_tracks_the_header() {
        let raw = RawRecord::from_pairs([("a", Some("1")), ("b", None)]);
        assert_eq!(raw.len(), 2);
        assert!(!raw.is_empty());

        let cleaned = CleanedRecord::from_pairs([("a", Value::Int(1)), ("b", Value::Null)]);
        assert_eq!(cleaned.len(), 2);
        assert!(!cleaned.is_empty());
        assert!(CleanedRecord::from_pairs(Vec::<(String, Value)>::new()).is_empty());
    }

    #[test]
    fn cleaned_record_serializes_in_header_order() {
        let record = CleanedRecord::from_pairs([
            ("z", Value::Int(1)),
            ("a", Value::Null),
            ("m", Value::Str("x".to_string())),
        ]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"z":1,"a":null,"m":"x"}"#);
    }

    #[test]
    fn sanitize_applies_to_every_cell() {
        let mut record = CleanedRecord::from_pairs([
            ("a", Value::Float(f64::INFINITY)),
            ("b", Value::Str("\\N".to_string())),
            ("c", Value::Int(9)),
        ]);
        record.sanitize();
        assert_eq!(record.get("a"), Some(&Value::Null));
        assert_eq!(record.get("b"), Some(&Value::Null));
        assert_eq!(record.get("c"), Some(&Value::Int(9)));
    }
}
