//! Column type classification.
//!
//! Numeric and date detection run independently over the same values, so a
//! column may be flagged as both. Each flag requires a strict majority of
//! the rows: a column where exactly half the values qualify is not flagged.

use crate::types::Cell;
use crate::utils::{numeric_subset, parse_date};

/// Strict majority test: `count > row_count / 2` without float division.
#[inline]
pub(crate) fn is_majority(count: usize, row_count: usize) -> bool {
    count * 2 > row_count
}

/// Finite numbers of the column plus whether they make it a numeric column.
pub(crate) fn infer_numeric(values: &[Cell], row_count: usize) -> (Vec<f64>, bool) {
    let numeric_values = numeric_subset(values);
    let is_numeric = is_majority(numeric_values.len(), row_count);
    (numeric_values, is_numeric)
}

/// Whether most of the column's values are calendar dates.
pub(crate) fn infer_date(values: &[Cell], row_count: usize) -> bool {
    let date_count = values.iter().filter(|v| parse_date(v).is_some()).count();
    is_majority(date_count, row_count)
}
