use crate::error::Result;
use crate::reporting::guide::{overview_text, table_of_contents};
use crate::types::{ColumnDescriptor, Report, TocEntry};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything a frontend needs to render a report: the input it came from,
/// the headline text, navigation and the sections themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub input_file: String,
    pub row_count: usize,
    pub column_count: usize,
    pub overview: String,
    /// Empty unless the report has more than one section.
    pub table_of_contents: Vec<TocEntry>,
    pub report: Report,
}

impl ReportDocument {
    pub fn new(
        input_file: impl Into<String>,
        columns: &[ColumnDescriptor],
        row_count: usize,
        report: Report,
    ) -> Self {
        let table_of_contents = if report.has_navigation() {
            table_of_contents(&report)
        } else {
            Vec::new()
        };

        Self {
            input_file: input_file.into(),
            row_count,
            column_count: columns.len(),
            overview: overview_text(columns, row_count),
            table_of_contents,
            report,
        }
    }
}

/// Write `document` as pretty JSON to `<output_dir>/<base_name>_report.json`,
/// creating the directory when needed.
pub fn write_report_to_file(
    document: &ReportDocument,
    output_dir: &Path,
    base_name: &str,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;

    let report_path = output_dir.join(format!("{}_report.json", base_name));
    let mut file = File::create(&report_path)?;
    file.write_all(serde_json::to_string_pretty(document)?.as_bytes())?;

    info!("Report saved: {}", report_path.display());

    Ok(report_path)
}
