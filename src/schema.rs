//! Column classification for normalization.
//!
//! Columns are not sniffed from the data; the caller declares up front
//! which ones carry numbers and the classification never changes during a
//! conversion. Constructors ship for the standard dataset dumps, and
//! [`NumericColumns::from_names`] covers everything else.

use std::collections::BTreeSet;

const TITLE_BASICS: [&str; 4] = ["isAdult", "startYear", "endYear", "runtimeMinutes"];
const NAME_BASICS: [&str; 2] = ["birthYear", "deathYear"];

/// The set of column names to run through numeric coercion.
///
/// Matching is exact and case sensitive. Classified columns that a given
/// table does not declare are simply ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericColumns {
    names: BTreeSet<String>,
}

impl NumericColumns {
    /// Builds a classification from explicit column names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Classification for `title.basics` dumps: `isAdult`, `startYear`,
    /// `endYear`, and `runtimeMinutes`.
    #[must_use]
    pub fn title_basics() -> Self {
        Self::from_names(TITLE_BASICS)
    }

    /// Classification for `name.basics` dumps: `birthYear` and `deathYear`.
    #[must_use]
    pub fn name_basics() -> Self {
        Self::from_names(NAME_BASICS)
    }

    /// Reports whether the named column is classified numeric.
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.names.contains(column)
    }

    /// Intersects the classification with a header, preserving header
    /// order.
    #[must_use]
    pub fn present_in<'a>(&self, columns: &'a [String]) -> Vec<&'a str> {
        columns
            .iter()
            .filter(|column| self.contains(column))
            .map(String::as_str)
            .collect()
    }

    /// Classified names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of classified columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The union of every standard dump classification.
impl Default for NumericColumns {
    fn default() -> Self {
        Self::from_names(TITLE_BASICS.into_iter().chain(NAME_BASICS))
    }
}
