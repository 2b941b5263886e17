//! CLI entry point for the spreadsheet report generator.

use anyhow::{Result, anyhow};
use clap::Parser;
use dotenv::dotenv;
use sheet_report::{
    ChartDirective, ColumnAnalyzer, ContentItem, CorrelationAlignment, DisplayTable,
    ReportConfig, ReportDocument, ReportGenerator, load_table, section_description,
    write_report_to_file,
};
use std::path::Path;
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(
    author = "Sheet Report Team",
    version,
    about = "Analytical reports for spreadsheet tables",
    long_about = "Profiles every column of a CSV or JSON table and prints a sectioned report:\n\
                  summary, key statistics, correlation, outliers, time series,\n\
                  category distributions and a random data sample.\n\n\
                  EXAMPLES:\n  \
                  # Human-readable report\n  \
                  sheet-report -i sales.csv\n\n  \
                  # JSON report on stdout\n  \
                  sheet-report -i sales.csv --json\n\n  \
                  # Reproducible sample, report written to reports/sales_report.json\n  \
                  sheet-report -i sales.csv --seed 42 -r -o reports/"
)]
struct Args {
    /// Path to the CSV or JSON table
    #[arg(short, long)]
    input: String,

    /// Output directory for --emit-report
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Output JSON to stdout instead of the human-readable report
    ///
    /// Disables all logs; only the JSON document is written.
    #[arg(long)]
    json: bool,

    /// Write the JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Seed for the sampled data table
    #[arg(long)]
    seed: Option<u64>,

    /// Share of rows shown in the sampled data table (0.0 - 1.0)
    #[arg(long, default_value = "0.1")]
    sample_fraction: f64,

    /// Largest distinct-value count that still gets a distribution chart
    #[arg(long, default_value = "10")]
    max_categories: usize,

    /// Pair correlation values by row instead of by position
    #[arg(long)]
    row_aligned_correlation: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    // Load environment variables from .env file
    dotenv().ok();

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = build_config(&args)?;

    info!("Loading table from: {}", args.input);
    let table = load_table(&args.input)?;

    let columns = ColumnAnalyzer::analyze_table(&table);
    let generator = ReportGenerator::new(config);
    debug!("Report configuration: {:?}", generator.config());
    let report = generator.generate(&columns, &table.rows);
    if report.is_empty() {
        info!("Table has no rows or columns; the report is empty");
    }

    let document = ReportDocument::new(&args.input, &columns, table.row_count(), report);

    if args.emit_report {
        let base_name = Path::new(&args.input)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sheet");
        match write_report_to_file(&document, Path::new(&args.output), base_name) {
            Ok(path) => info!("Report written to: {}", path.display()),
            Err(e) => {
                error!("Failed to write report: {}", e);
                return Err(anyhow!("Failed to write report: {}", e));
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print_human_readable_report(&document);
    }

    Ok(())
}

fn build_config(args: &Args) -> Result<ReportConfig> {
    let alignment = if args.row_aligned_correlation {
        CorrelationAlignment::RowAligned
    } else {
        CorrelationAlignment::Positional
    };

    let mut builder = ReportConfig::builder()
        .sample_fraction(args.sample_fraction)
        .categorical_max_unique(args.max_categories)
        .correlation_alignment(alignment);

    if let Some(seed) = args.seed {
        builder = builder.sample_seed(seed);
    }

    Ok(builder.build()?)
}

/// Print the report for a terminal.
///
/// Note: This function uses `println!` intentionally for user-facing CLI output.
fn print_human_readable_report(document: &ReportDocument) {
    println!();
    println!("{}", "=".repeat(80));
    println!("SHEET REPORT");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input: {} ({} rows x {} columns)",
        document.input_file, document.row_count, document.column_count
    );
    if !document.overview.is_empty() {
        println!();
        println!("{}", document.overview);
    }
    println!();

    print_contents(document);

    for section in &document.report.sections {
        println!("{}", section.title.to_uppercase());
        println!("{}", "-".repeat(40));
        if let Some(description) = section_description(&section.id) {
            println!("  {}", description);
            println!();
        }

        for item in &section.content {
            match item {
                ContentItem::Paragraph(text) => println!("  {}", text),
                ContentItem::Table(table) => print_table(table),
                ContentItem::Chart(chart) => print_chart(chart),
            }
        }
        println!();
    }

    println!("{}", "=".repeat(80));
}

fn print_contents(document: &ReportDocument) {
    if document.table_of_contents.is_empty() {
        return;
    }
    println!("CONTENTS");
    println!("{}", "-".repeat(40));
    for (i, entry) in document.table_of_contents.iter().enumerate() {
        println!("  {:>2}. {} (#{})", i + 1, entry.title, entry.id);
    }
    println!();
}

fn print_table(table: &DisplayTable) {
    let widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            table
                .rows
                .iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("  {}", render(&table.headers));
    println!("  {}", "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    for row in &table.rows {
        println!("  {}", render(row));
    }
}

fn print_chart(chart: &ChartDirective) {
    match chart {
        ChartDirective::Pie { header, counts } => {
            println!("  [pie chart] {}", header);
            for entry in counts {
                let label = entry.value.to_string();
                let label = if label.is_empty() { "(empty)" } else { label.as_str() };
                println!("    {:<20} {}", label, entry.count);
            }
        }
        ChartDirective::TimeSeries { x_header, y_header } => {
            println!("  [time series] {} over {}", y_header, x_header);
        }
        ChartDirective::OutlierBar {
            header,
            all_values,
            outlier_values,
        } => {
            println!(
                "  [outlier bar chart] {}: {} of {} values highlighted",
                header,
                outlier_values.len(),
                all_values.len()
            );
        }
    }
}
