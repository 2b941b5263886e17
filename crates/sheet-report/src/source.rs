//! Loading tables from disk.
//!
//! `.json` files hold a `{"headers": [...], "rows": [[...], ...]}` object whose
//! cells are strings, numbers or `null`. Anything else is read as CSV with the
//! first line as headers. CSV columns are kept as text so that classification
//! stays with the analyzer; empty CSV fields load as [`Cell::Null`].

use crate::error::{ReportError, Result, ResultExt};
use crate::types::{Cell, Table};
use polars::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Load a table from a CSV or JSON file.
pub fn load_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let table = if is_json {
        load_json(path)
    } else {
        load_csv(path)
    }
    .context(format!("Failed to load table from {}", path.display()))?;

    info!(
        "Loaded {}: {} rows x {} columns",
        path.display(),
        table.row_count(),
        table.headers.len()
    );
    Ok(table)
}

fn load_json(path: &Path) -> Result<Table> {
    let text = fs::read_to_string(path).context("Failed to read JSON table")?;
    let table: Table = serde_json::from_str(&text)?;
    ensure_headers(&table)?;
    Ok(table)
}

fn load_csv(path: &Path) -> Result<Table> {
    // Schema inference off: every column comes back as a string column.
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context("Failed to open CSV reader")?
        .finish()
        .context("Failed to parse CSV")?;

    debug!("CSV shape: {:?}", df.shape());
    dataframe_to_table(&df)
}

/// Convert a frame into a [`Table`], rendering each value as text.
///
/// String columns keep their text; other dtypes are rendered with their
/// display form. Nulls become [`Cell::Null`].
pub fn dataframe_to_table(df: &DataFrame) -> Result<Table> {
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let table_columns = df
        .get_columns()
        .iter()
        .map(column_cells)
        .collect::<Result<Vec<Vec<Cell>>>>()?;

    let rows = (0..df.height())
        .map(|r| table_columns.iter().map(|col| col[r].clone()).collect())
        .collect();

    let table = Table::new(headers, rows);
    ensure_headers(&table)?;
    Ok(table)
}

fn column_cells(column: &Column) -> Result<Vec<Cell>> {
    let series = column.as_materialized_series();
    if let Ok(strings) = series.str() {
        return Ok(strings.into_iter().map(Cell::from).collect());
    }

    let cast = series.cast(&DataType::String)?;
    let strings = cast.str()?;
    Ok(strings.into_iter().map(Cell::from).collect())
}

fn ensure_headers(table: &Table) -> Result<()> {
    if table.headers.is_empty() {
        return Err(ReportError::InvalidTable("no header row".to_string()));
    }
    Ok(())
}
