//! Row normalization.
//!
//! Every raw field passes through the same three rules, in order: an
//! absent cell or a missing-value sentinel becomes [`Value::Null`]; a
//! field in a column classified numeric goes through
//! [`coerce_numeric`]; anything else is kept as its exact string,
//! whitespace and all. The rules are total, so normalization can never
//! fail, only degrade a field to `null`.

use crate::record::{CleanedRecord, RawRecord};
use crate::schema::NumericColumns;
use crate::value::{Value, coerce_numeric, is_missing_token};

/// Normalizes one field. `None` marks a cell the row did not carry.
#[must_use]
pub fn normalize_field(cell: Option<&str>, numeric: bool) -> Value {
    let Some(text) = cell else {
        return Value::Null;
    };
    if is_missing_token(text) {
        return Value::Null;
    }
    if numeric {
        coerce_numeric(text)
    } else {
        Value::Str(text.to_string())
    }
}

/// Normalizes every field of a row against the column classification.
///
/// The result keeps the row's column order and shares its header
/// allocation.
#[must_use]
pub fn normalize_record(raw: &RawRecord, numeric: &NumericColumns) -> CleanedRecord {
    let values = raw
        .iter()
        .map(|(column, cell)| normalize_field(cell, numeric.contains(column)))
        .collect();
    CleanedRecord::new(raw.columns_arc().clone(), values)
}

/// Runs [`CleanedRecord::sanitize`] over a batch before it is written.
pub fn sanitize_records(records: &mut [CleanedRecord]) {
    for record in records {
        record.sanitize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_sentinel_fields_are_null() {
        assert_eq!(normalize_field(None, false), Value::Null);
        assert_eq!(normalize_field(None, true), Value::Null);
        assert_eq!(normalize_field(Some("\\N"), false), Value::Null);
        assert_eq!(normalize_field(Some(""), true), Value::Null);
    }

    #[test]
    fn sentinels_win_before_string_passthrough() {
        // "\N" in a textual column must not survive as literal text.
        assert_eq!(normalize_field(Some("NULL"), false), Value::Null);
        assert_eq!(
            normalize_field(Some("not null"), false),
            Value::Str("not null".to_string())
        );
    }

    #[test]
    fn textual_fields_keep_exact_text() {
        assert_eq!(
            normalize_field(Some("  padded  "), false),
            Value::Str("  padded  ".to_string())
        );
        assert_eq!(normalize_field(Some("007"), false), Value::Str("007".to_string()));
    }

    #[test]
    fn numeric_fields_coerce() {
        assert_eq!(normalize_field(Some("120"), true), Value::Int(120));
        assert_eq!(normalize_field(Some("120.5"), true), Value::Float(120.5));
        assert_eq!(normalize_field(Some("garbage"), true), Value::Null);
    }

    #[test]
    fn record_normalization_follows_the_classification() {
        let raw = RawRecord::from_pairs([
            ("tconst", Some("tt0000001")),
            ("startYear", Some("\\N")),
            ("runtimeMinutes", Some("120")),
            ("primaryTitle", Some("NaN")),
            ("genres", None),
        ]);
        let numeric = NumericColumns::from_names(["startYear", "runtimeMinutes"]);

        let cleaned = normalize_record(&raw, &numeric);
        assert_eq!(
            cleaned.get("tconst"),
            Some(&Value::Str("tt0000001".to_string()))
        );
        assert_eq!(cleaned.get("startYear"), Some(&Value::Null));
        assert_eq!(cleaned.get("runtimeMinutes"), Some(&Value::Int(120)));
        assert_eq!(cleaned.get("primaryTitle"), Some(&Value::Null));
        assert_eq!(cleaned.get("genres"), Some(&Value::Null));
        assert_eq!(cleaned.columns(), raw.columns());
    }

    #[test]
    fn sanitize_pass_covers_whole_batch() {
        let mut records = vec![
            CleanedRecord::from_pairs([("a", Value::Float(f64::NAN))]),
            CleanedRecord::from_pairs([("a", Value::Str("null".to_string()))]),
        ];
        sanitize_records(&mut records);
        assert_eq!(records[0].get("a"), Some(&Value::Null));
        assert_eq!(records[1].get("a"), Some(&Value::Null));
    }
}
