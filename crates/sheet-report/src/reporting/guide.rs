//! Reader-facing helpers around a generated report: section explanations,
//! navigation entries and the headline overview.

use crate::types::{ColumnDescriptor, Report, TocEntry};
use crate::utils::format_grouped;

/// Explanation shown above a section, keyed by section id.
///
/// Distribution sections (`pie-*`) have no explanation.
pub fn section_description(id: &str) -> Option<&'static str> {
    let text = match id {
        "summary" => {
            "Overview of the whole sheet and of columns with missing values. \
             Use it to judge how complete and reliable the data is at a glance."
        }
        "stats" => {
            "Sum, average, median, minimum, maximum, standard deviation, missing count \
             and skewness (distribution asymmetry) of each numeric column. \
             Helps understand central tendency and the shape of each distribution."
        }
        "correlation" => {
            "Linear relationship (Pearson coefficient) between numeric columns. \
             Values near 1 mean a strong positive relationship, values near -1 a strong negative one."
        }
        "outliers" => {
            "Values outside the normal range by the IQR (interquartile range) rule. \
             Useful to spot data quality problems or unusual events quickly."
        }
        "timeseries" => {
            "Change of a value along the date column. \
             Reveals trends, seasonality and volatility over time."
        }
        "table" => {
            "A random sample of the actual rows. \
             Useful to inspect concrete examples, outliers or missing values directly."
        }
        _ => return None,
    };
    Some(text)
}

/// Navigation entries in section order.
pub fn table_of_contents(report: &Report) -> Vec<TocEntry> {
    report
        .sections
        .iter()
        .map(|s| TocEntry {
            id: s.id.clone(),
            title: s.title.clone(),
        })
        .collect()
}

/// Headline paragraph describing the sheet as a whole.
///
/// Lists numeric columns with their rounded averages and low-cardinality
/// text columns (fewer distinct values than half the row count). Empty when
/// there are no columns.
pub fn overview_text(columns: &[ColumnDescriptor], row_count: usize) -> String {
    if columns.is_empty() {
        return String::new();
    }

    let mut text = format!("There are {} rows in total. ", row_count);

    let numeric: Vec<&ColumnDescriptor> = columns.iter().filter(|c| c.is_numeric).collect();
    if !numeric.is_empty() {
        let names: Vec<&str> = numeric.iter().map(|c| c.header.as_str()).collect();
        let averages: Vec<String> = numeric
            .iter()
            .map(|c| {
                let avg = c.stats.map_or(f64::NAN, |s| s.avg);
                format!("the average of {} is {}", c.header, format_grouped(avg))
            })
            .collect();
        text.push_str(&format!(
            "Numeric columns are {}; {}. ",
            names.join(", "),
            averages.join(", ")
        ));
    }

    let categories: Vec<&str> = columns
        .iter()
        .filter(|c| !c.is_numeric && (c.unique_count as f64) < row_count as f64 / 2.0)
        .map(|c| c.header.as_str())
        .collect();
    if !categories.is_empty() {
        text.push_str(&format!(
            "Categorical columns include {}. ",
            categories.join(", ")
        ));
    }

    text.push_str("Key metrics, charts and tables follow below.");
    text
}
