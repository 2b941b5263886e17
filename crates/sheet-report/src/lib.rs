//! Spreadsheet Report Library
//!
//! Turns a rectangular sheet (a header row plus data rows) into an ordered,
//! sectioned analytical report.
//!
//! # Overview
//!
//! This library provides:
//!
//! - **Column Analysis**: Numeric and date classification by strict majority, distinct values
//!   and basic aggregates per column
//! - **Descriptive Statistics**: Median, population standard deviation, skewness and
//!   IQR-based outlier detection
//! - **Correlation**: Pearson coefficients between numeric columns
//! - **Report Generation**: Summary, statistics, correlation, outlier, time series,
//!   distribution and sampled-table sections, each carrying typed chart directives
//! - **Table Loading**: CSV (via Polars) and JSON table files
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sheet_report::{ColumnAnalyzer, ReportGenerator, load_table};
//!
//! let table = load_table("sales.csv")?;
//! let columns = ColumnAnalyzer::analyze_table(&table);
//! let report = ReportGenerator::default().generate(&columns, &table.rows);
//!
//! for section in &report.sections {
//!     println!("{} ({})", section.title, section.id);
//! }
//! ```
//!
//! # Configuration
//!
//! Use [`ReportConfig`] to tune sampling, categorical detection, the outlier
//! fence and correlation pairing:
//!
//! ```rust,ignore
//! use sheet_report::config::*;
//!
//! let config = ReportConfig::builder()
//!     .sample_fraction(0.2)                 // Preview 20% of rows
//!     .categorical_max_unique(12)           // Pie charts for up to 12 distinct values
//!     .iqr_multiplier(3.0)                  // Only flag extreme outliers
//!     .correlation_alignment(CorrelationAlignment::RowAligned)
//!     .sample_seed(42)                      // Reproducible sample table
//!     .build()?;
//!
//! let report = ReportGenerator::new(config).generate(&columns, &rows);
//! ```

pub mod config;
pub mod error;
pub mod profiler;
pub mod reporting;
pub mod source;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, CorrelationAlignment, ReportConfig, ReportConfigBuilder};
pub use error::{ReportError, Result as ReportResult, ResultExt};
pub use profiler::{ColumnAnalyzer, ColumnStatistics};
pub use reporting::{
    OutlierRecord, ReportDocument, ReportGenerator, overview_text, section_description,
    table_of_contents, write_report_to_file,
};
pub use source::load_table;
pub use types::{
    CategoryCount, Cell, ChartDirective, ColumnDescriptor, ColumnStats, ContentItem,
    DisplayTable, Report, Section, Table, TocEntry,
};

/// Analyze every column of a sheet. Shorthand for [`ColumnAnalyzer::analyze`].
pub fn analyze(headers: &[String], rows: &[Vec<Cell>]) -> Vec<ColumnDescriptor> {
    ColumnAnalyzer::analyze(headers, rows)
}

/// Generate a report with the default configuration.
pub fn generate(columns: &[ColumnDescriptor], rows: &[Vec<Cell>]) -> Report {
    ReportGenerator::default().generate(columns, rows)
}
