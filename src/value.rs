//! The canonical cell value produced by normalization.
//!
//! Every cell in a converted document is exactly one of four shapes: `null`,
//! an integer, a float, or a string. Keeping the union closed here means the
//! writers never have to guess how a cell serializes, and a whole-number
//! float can never leak into the output as `120.0` when `120` was meant.

use serde::{Serialize, Serializer};

/// Largest float magnitude whose integers are all exactly representable in
/// an `f64` (2^53 - 1). Whole-number floats beyond it stay floats so the
/// collapse to an integer can never change the value.
const SAFE_INTEGER_MAX: f64 = 9_007_199_254_740_991.0;

/// A single normalized cell.
///
/// `Float` is only ever constructed finite by [`coerce_numeric`]; a
/// non-finite float smuggled in through the public constructor still
/// serializes as `null` rather than producing invalid JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing or unrepresentable.
    Null,
    /// A whole number, including whole-number floats like `120.0`.
    Int(i64),
    /// A finite number with a fractional part, or one too large to collapse.
    Float(f64),
    /// Unmodified field text.
    Str(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(int) => Some(*int),
            _ => None,
        }
    }

    /// Returns the float payload, if any.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(float) => Some(*float),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Collapses values that slipped past normalization back to `Null`:
    /// non-finite floats and strings that spell a missing-value sentinel.
    ///
    /// Normalization already produces clean values from raw field text; this
    /// exists for records assembled by hand or by future transforms.
    pub fn sanitize(&mut self) {
        let dirty = match self {
            Value::Float(float) => !float.is_finite(),
            Value::Str(text) => is_missing_token(text),
            Value::Null | Value::Int(_) => false,
        };
        if dirty {
            *self = Value::Null;
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Int(int) => serializer.serialize_i64(*int),
            Value::Float(float) if float.is_finite() => serializer.serialize_f64(*float),
            // JSON has no NaN or infinity; degrade instead of aborting.
            Value::Float(_) => serializer.serialize_unit(),
            Value::Str(text) => serializer.serialize_str(text),
        }
    }
}

impl From<i64> for Value {
    fn from(int: i64) -> Self {
        Value::Int(int)
    }
}

impl From<f64> for Value {
    fn from(float: f64) -> Self {
        Value::Float(float)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Str(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Str(text)
    }
}

/// Reports whether raw field text spells a missing value.
///
/// The recognized sentinels are the empty string and the case-insensitive
/// tokens `\N` (the classic database dump escape), `NaN`, and `NULL`.
#[must_use]
pub fn is_missing_token(raw: &str) -> bool {
    raw.is_empty()
        || raw.eq_ignore_ascii_case("\\N")
        || raw.eq_ignore_ascii_case("nan")
        || raw.eq_ignore_ascii_case("null")
}

/// Coerces raw field text from a numeric column into a [`Value`].
///
/// The text is trimmed, then tried as an `i64` and as an `f64` in that
/// order. Whole-number floats within the exactly-representable range
/// collapse to `Int`, so `"120"` and `"120.0"` coerce identically. Text
/// that parses as neither, or parses to a non-finite float, becomes
/// `Null`; this function never fails and never returns a string.
#[must_use]
pub fn coerce_numeric(raw: &str) -> Value {
    let text = raw.trim();
    if let Ok(int) = text.parse::<i64>() {
        return Value::Int(int);
    }
    match text.parse::<f64>() {
        Ok(float) if float.is_finite() => {
            if float.fract() == 0.0 && float.abs() <= SAFE_INTEGER_MAX {
                Value::Int(float as i64)
            } else {
                Value::Float(float)
            }
        }
        _ => Value::Null,
    }
}
