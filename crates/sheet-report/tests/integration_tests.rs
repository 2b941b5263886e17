//! Integration tests for the spreadsheet report generator.
//!
//! These tests load fixture tables from disk and verify the end-to-end
//! behavior of analysis and report generation.

use pretty_assertions::assert_eq;
use sheet_report::{
    Cell, ChartDirective, ColumnAnalyzer, ContentItem, CorrelationAlignment, Report,
    ReportConfig, ReportDocument, ReportGenerator, analyze, generate, load_table,
    section_description, table_of_contents,
};
use std::collections::HashSet;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn section_ids(report: &Report) -> Vec<&str> {
    report.sections.iter().map(|s| s.id.as_str()).collect()
}

fn seeded(seed: u64) -> ReportGenerator {
    ReportGenerator::new(ReportConfig::builder().sample_seed(seed).build().unwrap())
}

// ============================================================================
// Small Sheet Tests
// ============================================================================

#[test]
fn test_small_sheet_end_to_end() {
    let table = load_table(fixtures_path().join("sales.csv")).unwrap();
    let columns = analyze(&table.headers, &table.rows);
    let report = generate(&columns, &table.rows);

    assert_eq!(
        section_ids(&report),
        vec!["summary", "stats", "timeseries", "pie-name", "pie-date", "table"]
    );

    let stats = report.section("stats").unwrap().tables().next().unwrap();
    assert_eq!(stats.rows.len(), 1);
    assert_eq!(stats.rows[0][0], "amount");
    assert_eq!(stats.rows[0][2], "15");

    let timeseries = report.section("timeseries").unwrap();
    assert_eq!(
        timeseries.charts().collect::<Vec<_>>(),
        vec![&ChartDirective::TimeSeries {
            x_header: "date".to_string(),
            y_header: "amount".to_string(),
        }]
    );

    let sample = report.section("table").unwrap().tables().next().unwrap();
    assert_eq!(sample.rows.len(), 1);
}

#[test]
fn test_csv_and_json_sources_agree() {
    let csv = load_table(fixtures_path().join("sales.csv")).unwrap();
    let json = load_table(fixtures_path().join("sales.json")).unwrap();

    let from_csv = ColumnAnalyzer::analyze_table(&csv);
    let from_json = ColumnAnalyzer::analyze_table(&json);

    for (a, b) in from_csv.iter().zip(&from_json) {
        assert_eq!(a.header, b.header);
        assert_eq!(a.is_numeric, b.is_numeric);
        assert_eq!(a.is_date, b.is_date);
        assert_eq!(a.unique_count, b.unique_count);
        assert_eq!(a.numeric_values, b.numeric_values);
    }
    assert_eq!(from_json[1].stats.unwrap().avg, 15.0);
}

// ============================================================================
// Regional Sales Tests
// ============================================================================

#[test]
fn test_regional_sales_sections() {
    let table = load_table(fixtures_path().join("regional_sales.csv")).unwrap();
    assert_eq!(table.row_count(), 23);

    let columns = ColumnAnalyzer::analyze_table(&table);
    let report = seeded(3).generate(&columns, &table.rows);

    assert_eq!(
        section_ids(&report),
        vec![
            "summary",
            "stats",
            "correlation",
            "outliers",
            "timeseries",
            "pie-region",
            "table"
        ]
    );

    let summary: Vec<&str> = report.section("summary").unwrap().paragraphs().collect();
    assert_eq!(
        summary,
        vec![
            "This sheet contains 23 rows. The main columns are region, units, revenue, date.",
            "Columns with missing values: revenue.",
        ]
    );
}

#[test]
fn test_regional_sales_outliers() {
    let table = load_table(fixtures_path().join("regional_sales.csv")).unwrap();
    let columns = ColumnAnalyzer::analyze_table(&table);
    let report = seeded(3).generate(&columns, &table.rows);

    let outliers = report.section("outliers").unwrap();
    let located = outliers.tables().next().unwrap();
    assert_eq!(
        located.rows,
        vec![vec!["units", "500", "19"], vec!["revenue", "6250", "19"]]
    );

    let kinds: Vec<&str> = outliers.charts().map(|c| c.kind()).collect();
    assert_eq!(kinds, vec!["outlier-bar", "outlier-bar"]);

    let Some(ChartDirective::OutlierBar {
        all_values,
        outlier_values,
        ..
    }) = outliers.charts().nth(1)
    else {
        panic!("expected an outlier bar chart for revenue");
    };
    assert_eq!(all_values.len(), 22);
    assert_eq!(outlier_values, &vec![6250.0]);
}

#[test]
fn test_regional_sales_category_counts() {
    let table = load_table(fixtures_path().join("regional_sales.csv")).unwrap();
    let columns = ColumnAnalyzer::analyze_table(&table);
    let report = seeded(3).generate(&columns, &table.rows);

    let section = report.section("pie-region").unwrap();
    assert_eq!(section.title, "region Distribution");
    let counts = section.tables().next().unwrap();
    assert_eq!(
        counts.rows,
        vec![vec!["North", "8"], vec!["South", "8"], vec!["East", "7"]]
    );
}

#[test]
fn test_correlation_alignment_changes_pairing() {
    let table = load_table(fixtures_path().join("regional_sales.csv")).unwrap();
    let columns = ColumnAnalyzer::analyze_table(&table);
    let numeric: Vec<_> = columns.iter().filter(|c| c.is_numeric).collect();

    let positional = ReportGenerator::default().correlations(&numeric);
    let aligned = ReportGenerator::new(
        ReportConfig::builder()
            .correlation_alignment(CorrelationAlignment::RowAligned)
            .build()
            .unwrap(),
    )
    .correlations(&numeric);

    // revenue is units * 12.5 on every row where both exist
    assert!((aligned[0][1] - 1.0).abs() < 1e-9);
    // dropping the blank revenue shifts every later pair by one row
    assert!(positional[0][1] < 0.5);
    assert!((positional[0][0] - 1.0).abs() < 1e-9);
}

#[test]
fn test_sample_table_rows_are_distinct_source_rows() {
    let table = load_table(fixtures_path().join("regional_sales.csv")).unwrap();
    let columns = ColumnAnalyzer::analyze_table(&table);

    for seed in 0..20 {
        let report = seeded(seed).generate(&columns, &table.rows);
        let sample = report.section("table").unwrap();
        assert_eq!(sample.title, "Data Sample (2 rows)");

        let rows = &sample.tables().next().unwrap().rows;
        assert_eq!(rows.len(), 2);
        // every date is unique, so it identifies the source row
        let dates: HashSet<&str> = rows.iter().map(|r| r[3].as_str()).collect();
        assert_eq!(dates.len(), 2);
    }
}

#[test]
fn test_generate_is_pure_apart_from_sample() {
    let table = load_table(fixtures_path().join("regional_sales.csv")).unwrap();
    let columns = ColumnAnalyzer::analyze_table(&table);

    let a = generate(&columns, &table.rows);
    let b = generate(&columns, &table.rows);

    let without_sample = |r: &Report| {
        r.sections
            .iter()
            .filter(|s| s.id != "table")
            .cloned()
            .collect::<Vec<_>>()
    };
    assert_eq!(without_sample(&a), without_sample(&b));
    assert_eq!(seeded(9).generate(&columns, &table.rows), seeded(9).generate(&columns, &table.rows));
}

// ============================================================================
// Degraded Input Tests
// ============================================================================

#[test]
fn test_empty_inputs_give_empty_report() {
    let headers = vec!["a".to_string()];
    let columns = analyze(&headers, &[]);
    assert!(generate(&columns, &[]).is_empty());
    assert!(generate(&[], &[vec![Cell::text("x")]]).is_empty());
}

#[test]
fn test_text_only_sheet() {
    let headers = vec!["city".to_string(), "note".to_string()];
    let rows: Vec<Vec<Cell>> = vec![
        vec![Cell::text("Oslo"), Cell::text("cold")],
        vec![Cell::text("Lima"), Cell::Null],
        vec![Cell::text("Oslo")],
    ];
    let columns = analyze(&headers, &rows);
    let report = seeded(1).generate(&columns, &rows);

    assert_eq!(
        section_ids(&report),
        vec!["summary", "pie-city", "pie-note", "table"]
    );
    let sample = report.section("table").unwrap().tables().next().unwrap();
    assert!(sample.rows.iter().all(|r| r.len() == 2));
}

// ============================================================================
// Reader Guide Tests
// ============================================================================

#[test]
fn test_document_navigation_and_descriptions() {
    let table = load_table(fixtures_path().join("regional_sales.csv")).unwrap();
    let columns = ColumnAnalyzer::analyze_table(&table);
    let report = seeded(5).generate(&columns, &table.rows);

    let toc = table_of_contents(&report);
    assert_eq!(toc.len(), report.sections.len());
    assert_eq!(toc[3].title, "Outlier Detection");

    let described: Vec<&str> = report
        .sections
        .iter()
        .filter(|s| section_description(&s.id).is_some())
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(
        described,
        vec!["summary", "stats", "correlation", "outliers", "timeseries", "table"]
    );

    let document = ReportDocument::new("regional_sales.csv", &columns, table.row_count(), report);
    assert_eq!(document.table_of_contents, toc);
    assert!(document.overview.starts_with("There are 23 rows in total."));
    assert!(document.overview.contains("Categorical columns include region."));
}

#[test]
fn test_report_json_shape() {
    let table = load_table(fixtures_path().join("sales.csv")).unwrap();
    let columns = ColumnAnalyzer::analyze_table(&table);
    let report = seeded(1).generate(&columns, &table.rows);

    let json = serde_json::to_value(&report).unwrap();
    let pie = json["sections"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == "pie-name")
        .unwrap();

    let chart = pie["content"]
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["type"] == "chart")
        .unwrap();
    assert_eq!(chart["value"]["kind"], "pie");
    assert_eq!(chart["value"]["header"], "name");
    assert_eq!(chart["value"]["counts"][0]["value"], "a");
    assert_eq!(chart["value"]["counts"][0]["count"], 1);

    let back: Report = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);

    assert!(matches!(
        report.section("pie-name").unwrap().content[0],
        ContentItem::Chart(ChartDirective::Pie { .. })
    ));
}
