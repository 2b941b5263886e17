use crate::config::{CorrelationAlignment, ReportConfig};
use crate::profiler::statistics::{ColumnStatistics, correlation, correlation_matrix, row_aligned_pairs};
use crate::reporting::sampling::{sample_indices, sample_size, sampler_rng};
use crate::types::{
    CategoryCount, Cell, ChartDirective, ColumnDescriptor, ContentItem, DisplayTable, NULL_CELL,
    Report, Section,
};
use crate::utils::{format_fixed, format_grouped, is_missing, numeric_subset, parse_number};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

// ============================================================================
// Section Ids
// ============================================================================

pub const SUMMARY_ID: &str = "summary";
pub const STATS_ID: &str = "stats";
pub const CORRELATION_ID: &str = "correlation";
pub const OUTLIERS_ID: &str = "outliers";
pub const TIMESERIES_ID: &str = "timeseries";
pub const SAMPLE_TABLE_ID: &str = "table";

/// Id of the distribution section for a categorical column.
pub fn categorical_section_id(header: &str) -> String {
    format!("pie-{}", header)
}

/// One outlier occurrence located in the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierRecord {
    pub column: String,
    pub value: f64,
    /// 1-based sheet row, counting the header row.
    pub row: usize,
}

/// Locate each outlier value at the first row holding exactly that number.
///
/// Repeated outlier values all point at the same (first) row. Row numbers are
/// shifted by two: one for 1-based display and one for the header row.
pub fn locate_outliers(column: &ColumnDescriptor, outliers: &[f64]) -> Vec<OutlierRecord> {
    outliers
        .iter()
        .filter_map(|&value| {
            let idx = column
                .values
                .iter()
                .position(|cell| parse_number(cell) == Some(value))?;
            Some(OutlierRecord {
                column: column.header.clone(),
                value,
                row: idx + 2,
            })
        })
        .collect()
}

// ============================================================================
// Generator
// ============================================================================

/// Assembles the ordered report sections from analyzed columns.
#[derive(Debug, Clone, Default)]
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a generator with a custom configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// The configuration this generator applies.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Build the report for `columns` (from the analyzer) and the raw `rows`.
    ///
    /// Sections appear in a fixed order, each only when its data exists:
    /// summary, statistics, correlation, outliers, time series, one
    /// distribution section per categorical column, and the sampled table.
    /// Empty columns or rows give an empty report.
    ///
    /// Everything except the sampled table is a pure function of the input;
    /// the sample is only reproducible when the config carries a seed.
    pub fn generate(&self, columns: &[ColumnDescriptor], rows: &[Vec<Cell>]) -> Report {
        if columns.is_empty() || rows.is_empty() {
            debug!("No columns or rows; returning an empty report");
            return Report::default();
        }

        let mut sections = vec![Self::summary_section(columns, rows.len())];

        let numeric: Vec<&ColumnDescriptor> = columns.iter().filter(|c| c.is_numeric).collect();
        let statistics: Vec<(&ColumnDescriptor, ColumnStatistics)> = numeric
            .iter()
            .filter_map(|c| {
                ColumnStatistics::with_iqr_multiplier(&c.values, self.config.iqr_multiplier)
                    .map(|s| (*c, s))
            })
            .collect();

        if !statistics.is_empty() {
            sections.push(Self::statistics_section(&statistics));
        }

        if numeric.len() > 1 {
            sections.push(self.correlation_section(&numeric));
        }

        if let Some(section) = Self::outlier_section(&statistics) {
            sections.push(section);
        }

        if let Some(section) = Self::timeseries_section(columns, &numeric) {
            sections.push(section);
        }

        sections.extend(
            columns
                .iter()
                .filter(|c| c.is_categorical(self.config.categorical_max_unique))
                .map(Self::categorical_section),
        );

        sections.push(self.sample_section(columns, rows));

        info!(
            "Generated report: {} sections for {} rows x {} columns",
            sections.len(),
            rows.len(),
            columns.len()
        );

        Report { sections }
    }

    fn summary_section(columns: &[ColumnDescriptor], row_count: usize) -> Section {
        let headers: Vec<&str> = columns.iter().map(|c| c.header.as_str()).collect();
        let mut content = vec![ContentItem::Paragraph(format!(
            "This sheet contains {} rows. The main columns are {}.",
            row_count,
            headers.join(", ")
        ))];

        let missing: Vec<&str> = columns
            .iter()
            .filter(|c| c.values.iter().any(is_missing))
            .map(|c| c.header.as_str())
            .collect();
        if !missing.is_empty() {
            content.push(ContentItem::Paragraph(format!(
                "Columns with missing values: {}.",
                missing.join(", ")
            )));
        }

        Section::new(SUMMARY_ID, "Summary", content)
    }

    fn statistics_section(statistics: &[(&ColumnDescriptor, ColumnStatistics)]) -> Section {
        let headers = [
            "Column", "Sum", "Average", "Median", "Min", "Max", "Std Dev", "Missing", "Skewness",
        ];
        let rows = statistics
            .iter()
            .map(|(column, s)| {
                vec![
                    column.header.clone(),
                    format_grouped(s.sum),
                    format_grouped(s.avg),
                    format_grouped(s.median),
                    format_grouped(s.min),
                    format_grouped(s.max),
                    format_fixed(s.std, 2),
                    s.missing.to_string(),
                    format_fixed(s.skewness, 2),
                ]
            })
            .collect();

        debug!("Statistics section: {} numeric columns", statistics.len());

        Section::new(
            STATS_ID,
            "Key Statistics",
            vec![ContentItem::Table(DisplayTable {
                headers: headers.iter().map(|h| h.to_string()).collect(),
                rows,
            })],
        )
    }

    /// Correlation coefficients between every pair of numeric columns.
    pub fn correlations(&self, numeric: &[&ColumnDescriptor]) -> Vec<Vec<f64>> {
        match self.config.correlation_alignment {
            CorrelationAlignment::Positional => {
                let samples: Vec<Vec<f64>> =
                    numeric.iter().map(|c| numeric_subset(&c.values)).collect();
                correlation_matrix(&samples)
            }
            CorrelationAlignment::RowAligned => numeric
                .iter()
                .map(|a| {
                    numeric
                        .iter()
                        .map(|b| {
                            let (xs, ys) = row_aligned_pairs(&a.values, &b.values);
                            correlation(&xs, &ys)
                        })
                        .collect()
                })
                .collect(),
        }
    }

    fn correlation_section(&self, numeric: &[&ColumnDescriptor]) -> Section {
        let matrix = self.correlations(numeric);

        let mut headers = vec!["-".to_string()];
        headers.extend(numeric.iter().map(|c| c.header.clone()));

        let rows = numeric
            .iter()
            .zip(&matrix)
            .map(|(column, coefficients)| {
                let mut row = vec![column.header.clone()];
                row.extend(coefficients.iter().map(|r| format_fixed(*r, 2)));
                row
            })
            .collect();

        Section::new(
            CORRELATION_ID,
            "Correlation Analysis",
            vec![
                ContentItem::Table(DisplayTable { headers, rows }),
                ContentItem::Paragraph(
                    "Values close to 1 indicate a strong positive correlation, \
                     values close to -1 a strong negative correlation."
                        .to_string(),
                ),
            ],
        )
    }

    fn outlier_section(statistics: &[(&ColumnDescriptor, ColumnStatistics)]) -> Option<Section> {
        let mut records = Vec::new();
        let mut charts = Vec::new();

        for (column, s) in statistics {
            records.extend(locate_outliers(column, &s.outliers));
            if !s.outliers.is_empty() {
                debug!("Column '{}': {} outliers", column.header, s.outliers.len());
                charts.push(ContentItem::Chart(ChartDirective::OutlierBar {
                    header: column.header.clone(),
                    all_values: numeric_subset(&column.values),
                    outlier_values: s.outliers.clone(),
                }));
            }
        }

        if records.is_empty() {
            return None;
        }

        let mut content = vec![ContentItem::Paragraph(
            "The charts below highlight outliers (IQR rule) against the full distribution."
                .to_string(),
        )];
        content.extend(charts);
        content.push(ContentItem::Table(DisplayTable {
            headers: vec!["Column".to_string(), "Value".to_string(), "Row".to_string()],
            rows: records
                .iter()
                .map(|r| vec![r.column.clone(), r.value.to_string(), r.row.to_string()])
                .collect(),
        }));

        Some(Section::new(OUTLIERS_ID, "Outlier Detection", content))
    }

    fn timeseries_section(
        columns: &[ColumnDescriptor],
        numeric: &[&ColumnDescriptor],
    ) -> Option<Section> {
        let date_column = columns.iter().find(|c| c.is_date)?;
        let value_column = numeric.first()?;

        Some(Section::new(
            TIMESERIES_ID,
            "Time Series Analysis",
            vec![
                ContentItem::Paragraph(format!(
                    "Trend of {} over {}.",
                    value_column.header, date_column.header
                )),
                ContentItem::Chart(ChartDirective::TimeSeries {
                    x_header: date_column.header.clone(),
                    y_header: value_column.header.clone(),
                }),
            ],
        ))
    }

    fn categorical_section(column: &ColumnDescriptor) -> Section {
        let mut tally: HashMap<_, usize> = HashMap::with_capacity(column.unique.len());
        for value in &column.values {
            *tally.entry(value.key()).or_insert(0) += 1;
        }

        let counts: Vec<CategoryCount> = column
            .unique
            .iter()
            .map(|value| CategoryCount {
                value: value.clone(),
                count: tally.get(&value.key()).copied().unwrap_or(0),
            })
            .collect();

        let table = DisplayTable {
            headers: vec![column.header.clone(), "Count".to_string()],
            rows: counts
                .iter()
                .map(|c| vec![c.value.to_string(), c.count.to_string()])
                .collect(),
        };

        Section::new(
            categorical_section_id(&column.header),
            format!("{} Distribution", column.header),
            vec![
                ContentItem::Chart(ChartDirective::Pie {
                    header: column.header.clone(),
                    counts,
                }),
                ContentItem::Table(table),
            ],
        )
    }

    fn sample_section(&self, columns: &[ColumnDescriptor], rows: &[Vec<Cell>]) -> Section {
        let size = sample_size(rows.len(), self.config.sample_fraction);
        let picked = sample_indices(rows.len(), size, &mut sampler_rng(&self.config));
        debug!("Sampled rows {:?}", picked);

        let table = DisplayTable {
            headers: columns.iter().map(|c| c.header.clone()).collect(),
            rows: picked
                .iter()
                .map(|&r| {
                    (0..columns.len())
                        .map(|i| rows[r].get(i).unwrap_or(&NULL_CELL).to_string())
                        .collect()
                })
                .collect(),
        };

        Section::new(
            SAMPLE_TABLE_ID,
            format!("Data Sample ({} rows)", size),
            vec![ContentItem::Table(table)],
        )
    }
}
