//! Report generation module.
//!
//! This module turns analyzed columns into an ordered list of report
//! sections and provides the reader-facing helpers around them.
//!
//! # Sections
//!
//! [`ReportGenerator::generate`] emits, in order and only when the data
//! supports them: `summary`, `stats`, `correlation`, `outliers`,
//! `timeseries`, one `pie-<header>` per categorical column, and `table`.
//!
//! # Example
//!
//! ```rust,ignore
//! use sheet_report::profiler::ColumnAnalyzer;
//! use sheet_report::reporting::{ReportGenerator, table_of_contents};
//!
//! let columns = ColumnAnalyzer::analyze(&headers, &rows);
//! let report = ReportGenerator::default().generate(&columns, &rows);
//!
//! for entry in table_of_contents(&report) {
//!     println!("{} -> #{}", entry.title, entry.id);
//! }
//! ```
//!
//! # Output
//!
//! [`ReportDocument`] bundles a report with its overview text and navigation
//! for JSON output; [`write_report_to_file`] saves it as
//! `<name>_report.json`.

mod generator;
pub mod guide;
mod output;
pub mod sampling;

pub use generator::{
    CORRELATION_ID, OUTLIERS_ID, OutlierRecord, ReportGenerator, SAMPLE_TABLE_ID, STATS_ID,
    SUMMARY_ID, TIMESERIES_ID, categorical_section_id, locate_outliers,
};
pub use guide::{overview_text, section_description, table_of_contents};
pub use output::{ReportDocument, write_report_to_file};
pub use sampling::{sample_indices, sample_size};
