//! Column analysis for spreadsheet tables.
//!
//! This module provides functionality for profiling a table column by column:
//! - Numeric and date classification
//! - Distinct-value bookkeeping
//! - Descriptive statistics, IQR outliers and correlation

pub mod statistics;
mod type_inference;

use crate::types::{Cell, ColumnDescriptor, ColumnStats, NULL_CELL, Table};
use std::collections::HashSet;
use tracing::{debug, warn};

pub use statistics::{
    ColumnStatistics, IqrFences, correlation, correlation_matrix, find_outliers, iqr_fences,
    population_std, row_aligned_pairs, skewness,
};

/// Column analyzer turning raw rows into per-column descriptors.
pub struct ColumnAnalyzer;

impl ColumnAnalyzer {
    /// Analyze every column of a table.
    ///
    /// Returns one descriptor per header, in header order. Row entries past
    /// the end of a short row are read as `Null`. Never fails: values that do
    /// not parse simply do not count toward the numeric or date subsets.
    pub fn analyze(headers: &[String], rows: &[Vec<Cell>]) -> Vec<ColumnDescriptor> {
        let ragged = rows.iter().filter(|r| r.len() != headers.len()).count();
        if ragged > 0 {
            warn!(
                "{} of {} rows do not match the {} headers; missing entries read as empty",
                ragged,
                rows.len(),
                headers.len()
            );
        }

        headers
            .iter()
            .enumerate()
            .map(|(idx, header)| Self::analyze_column(header, idx, rows))
            .collect()
    }

    /// Analyze a [`Table`].
    pub fn analyze_table(table: &Table) -> Vec<ColumnDescriptor> {
        Self::analyze(&table.headers, &table.rows)
    }

    fn analyze_column(header: &str, idx: usize, rows: &[Vec<Cell>]) -> ColumnDescriptor {
        let row_count = rows.len();
        let values: Vec<Cell> = rows
            .iter()
            .map(|row| row.get(idx).unwrap_or(&NULL_CELL).clone())
            .collect();

        let (numeric_values, is_numeric) = type_inference::infer_numeric(&values, row_count);
        let is_date = type_inference::infer_date(&values, row_count);
        let unique = distinct_values(&values);

        let stats = if is_numeric {
            ColumnStats::from_values(&numeric_values)
        } else {
            None
        };

        debug!(
            "Column '{}': numeric={} date={} unique={} numeric_values={}/{}",
            header,
            is_numeric,
            is_date,
            unique.len(),
            numeric_values.len(),
            row_count
        );

        ColumnDescriptor {
            header: header.to_string(),
            is_numeric,
            is_date,
            unique_count: unique.len(),
            values,
            numeric_values,
            stats,
            unique,
        }
    }
}

/// Distinct cells in first-occurrence order.
pub(crate) fn distinct_values(values: &[Cell]) -> Vec<Cell> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .iter()
        .filter(|v| seen.insert(v.key()))
        .cloned()
        .collect()
}
