// Partition path handling for date-partitioned object keys
//
// Keys are laid out Hive-style under a root label:
// {root}/yyyy={year}/mm={month}/dd={day}/{file}

use chrono::{Datelike, NaiveDate};

use crate::error::{RelocateError, Result};

/// Calendar date an invocation targets, parsed from `asof_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionDate {
    date: NaiveDate,
}

impl PartitionDate {
    /// Parse an `asof_date` value (`YYYY-MM-DD`).
    ///
    /// Zero padding is not required on input (`2023-3-7` parses); the
    /// separator and field order are strict, and trailing garbage fails.
    pub fn parse(value: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| {
            RelocateError::InvalidDate {
                value: value.to_string(),
                source,
            }
        })?;
        Ok(Self { date })
    }

    /// Partition prefix for this date under the given root label.
    ///
    /// Month and day are zero-padded to two digits, year to four, whatever
    /// the input padding looked like. No trailing separator: the prefix is
    /// matched against keys with starts-with semantics.
    pub fn prefix_under(&self, root: &str) -> String {
        format!(
            "{}/yyyy={:04}/mm={:02}/dd={:02}",
            root,
            self.date.year(),
            self.date.month(),
            self.date.day()
        )
    }
}

impl std::fmt::Display for PartitionDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.date.format("%Y-%m-%d"))
    }
}

/// Split an object key into its directory portion and final segment.
///
/// Splits on the last `/`; a key without a separator is all final segment.
/// An empty final segment marks a directory placeholder, not a file.
pub fn split_object_key(key: &str) -> (&str, &str) {
    match key.rfind('/') {
        Some(idx) => (&key[..idx], &key[idx + 1..]),
        None => ("", key),
    }
}
