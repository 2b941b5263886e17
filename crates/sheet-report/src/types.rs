use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Table Input
// ============================================================================

/// A single spreadsheet cell as delivered by the sheet loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Cell {
    /// Empty placeholder. Also stands in for entries missing from short rows.
    #[default]
    Null,
    Number(f64),
    Text(String),
}

/// Shared placeholder for row entries past the end of a short row.
pub(crate) static NULL_CELL: Cell = Cell::Null;

/// Hashable identity of a cell, used for distinct-value bookkeeping.
///
/// Numbers compare by value (`0.0` and `-0.0` are one key, every NaN is one
/// key); text and numbers never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum CellKey<'a> {
    Null,
    Number(u64),
    Text(&'a str),
}

impl Cell {
    /// Build a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub(crate) fn key(&self) -> CellKey<'_> {
        match self {
            Cell::Null => CellKey::Null,
            Cell::Number(n) if n.is_nan() => CellKey::Number(f64::NAN.to_bits()),
            Cell::Number(n) if *n == 0.0 => CellKey::Number(0),
            Cell::Number(n) => CellKey::Number(n.to_bits()),
            Cell::Text(s) => CellKey::Text(s.as_str()),
        }
    }

    /// Whether two cells count as the same distinct value.
    pub fn same_value(&self, other: &Cell) -> bool {
        self.key() == other.key()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

/// A header row plus data rows, already split by the sheet loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows (the header row is not counted).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at `(row, column)`, or `Null` when the row is too short.
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL_CELL)
    }
}

// ============================================================================
// Column Analysis
// ============================================================================

/// Basic aggregates over a column's numeric subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub sum: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnStats {
    /// Aggregate a numeric subset. Returns `None` for an empty subset, where
    /// the average is undefined.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sum: f64 = values.iter().sum();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            sum,
            avg: sum / values.len() as f64,
            min,
            max,
        })
    }
}

/// Per-column classification and statistics produced by the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub header: String,
    /// More than half of the values parse as finite numbers.
    pub is_numeric: bool,
    /// More than half of the values parse as calendar dates.
    pub is_date: bool,
    pub unique_count: usize,
    /// Every raw value of the column, one per row.
    pub values: Vec<Cell>,
    /// Values that parse as finite numbers, in row order.
    pub numeric_values: Vec<f64>,
    /// Present only when `is_numeric`.
    pub stats: Option<ColumnStats>,
    /// Distinct raw values in first-occurrence order.
    pub unique: Vec<Cell>,
}

impl ColumnDescriptor {
    /// Non-numeric column with a small, non-trivial set of distinct values.
    pub fn is_categorical(&self, max_unique: usize) -> bool {
        !self.is_numeric && self.unique_count > 1 && self.unique_count <= max_unique
    }
}

// ============================================================================
// Report Output
// ============================================================================

/// Ordered list of report sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Report {
    pub sections: Vec<Section>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Look up a section by its id.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Navigation is only worth showing with more than one section.
    pub fn has_navigation(&self) -> bool {
        self.sections.len() > 1
    }
}

/// A titled group of renderable items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Stable anchor and description key.
    pub id: String,
    pub title: String,
    pub content: Vec<ContentItem>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: Vec<ContentItem>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content,
        }
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content.iter().filter_map(|item| match item {
            ContentItem::Paragraph(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &DisplayTable> {
        self.content.iter().filter_map(|item| match item {
            ContentItem::Table(table) => Some(table),
            _ => None,
        })
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartDirective> {
        self.content.iter().filter_map(|item| match item {
            ContentItem::Chart(chart) => Some(chart),
            _ => None,
        })
    }
}

/// One renderable item of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ContentItem {
    Paragraph(String),
    Table(DisplayTable),
    Chart(ChartDirective),
}

/// Pre-formatted table shown as-is by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Instruction for the renderer to draw a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ChartDirective {
    /// Share of each distinct value of a categorical column.
    #[serde(rename = "pie")]
    Pie {
        header: String,
        counts: Vec<CategoryCount>,
    },
    /// Numeric column plotted against row order, labelled by the date column.
    #[serde(rename = "timeseries")]
    TimeSeries { x_header: String, y_header: String },
    /// Bar chart of a numeric column with its outliers highlighted.
    #[serde(rename = "outlier-bar")]
    OutlierBar {
        header: String,
        all_values: Vec<f64>,
        outlier_values: Vec<f64>,
    },
}

impl ChartDirective {
    /// Tag the renderer dispatches on.
    pub fn kind(&self) -> &'static str {
        match self {
            ChartDirective::Pie { .. } => "pie",
            ChartDirective::TimeSeries { .. } => "timeseries",
            ChartDirective::OutlierBar { .. } => "outlier-bar",
        }
    }
}

/// Occurrence count of one distinct value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: Cell,
    pub count: usize,
}

/// Navigation entry for a report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub id: String,
    pub title: String,
}

static_assertions::assert_impl_all!(Report: Send, Sync);
static_assertions::assert_impl_all!(ColumnDescriptor: Send, Sync);
