//! Shared cell parsing and display helpers.
//!
//! Both the analyzer and the report generator classify cells through these
//! functions so a value is never numeric in one place and text in another.

use crate::types::Cell;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// Numeric Parsing
// =============================================================================

/// Parse a cell as a finite number.
///
/// Numbers pass through when finite. Text is trimmed and must be a complete
/// decimal literal (sign, fraction and exponent allowed) or a `0x`/`0o`/`0b`
/// integer literal. Empty text, `Null`, infinities and NaN never parse.
pub fn parse_number(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) => n.is_finite().then_some(*n),
        Cell::Text(s) => parse_number_str(s),
        Cell::Null => None,
    }
}

/// Parse a string as a finite number. See [`parse_number`].
pub fn parse_number_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value = match parse_radix_literal(trimmed) {
        Some(v) => v,
        None => trimmed.parse::<f64>().ok()?,
    };

    value.is_finite().then_some(value)
}

fn parse_radix_literal(s: &str) -> Option<f64> {
    let (digits, radix) = match s.get(..2) {
        Some("0x" | "0X") => (&s[2..], 16),
        Some("0o" | "0O") => (&s[2..], 8),
        Some("0b" | "0B") => (&s[2..], 2),
        _ => return None,
    };
    u64::from_str_radix(digits, radix).ok().map(|v| v as f64)
}

/// Collect the finite numbers of a column in row order.
pub fn numeric_subset(values: &[Cell]) -> Vec<f64> {
    values.iter().filter_map(parse_number).collect()
}

// =============================================================================
// Date Parsing
// =============================================================================

// Google visualization literal, zero-based month: Date(2024,0,31) or Date(2024,0,31,9,30,0)
static GVIZ_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Date\((\d{1,6}),\s*(\d{1,2}),\s*(\d{1,2})(?:,\s*(\d{1,2}),\s*(\d{1,2}),\s*(\d{1,2}))?\)$")
        .expect("Invalid regex: gviz date literal")
});

static YEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{1,2}$").expect("Invalid regex: YYYY-MM"));

static YEAR_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}$").expect("Invalid regex: YYYY"));

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parse a cell as a calendar date or timestamp.
///
/// Only text cells can be dates; a bare number is never read as an epoch
/// offset. The calendar date must exist. A four-digit year (`"2024"`) reads
/// as January 1 of that year, so year columns are both numeric and dates.
pub fn parse_date(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::Text(s) => parse_date_str(s),
        _ => None,
    }
}

/// Parse a string as a calendar date or timestamp. See [`parse_date`].
pub fn parse_date_str(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() || !trimmed.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    if let Some(caps) = GVIZ_DATE.captures(trimmed) {
        let part = |i: usize| -> Option<u32> {
            caps.get(i).map_or(Some(0), |m| m.as_str().parse().ok())
        };
        let year: i32 = caps[1].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, part(2)? + 1, part(3)?)?
            .and_hms_opt(part(4)?, part(5)?, part(6)?);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Some(dt);
    }

    if YEAR_ONLY.is_match(trimmed) {
        return NaiveDate::from_ymd_opt(trimmed.parse().ok()?, 1, 1)?.and_hms_opt(0, 0, 0);
    }

    if YEAR_MONTH.is_match(trimmed) {
        return NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0));
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

// =============================================================================
// Missing Values
// =============================================================================

/// Empty placeholder or exactly-empty text. A numeric zero is not missing.
pub fn is_missing(cell: &Cell) -> bool {
    match cell {
        Cell::Null => true,
        Cell::Text(s) => s.is_empty(),
        Cell::Number(_) => false,
    }
}

// =============================================================================
// Display Formatting
// =============================================================================

/// Round half toward positive infinity, the way dashboards usually round.
pub fn round_half_up(x: f64) -> f64 {
    // f64::round sends negative halves away from zero
    let r = x.round();
    if x - r == 0.5 { r + 1.0 } else { r }
}

/// Round to an integer and group thousands with commas (`12345.6` -> `12,346`).
/// Non-finite values render as `NaN`.
pub fn format_grouped(x: f64) -> String {
    if !x.is_finite() {
        return "NaN".to_string();
    }
    let rounded = round_half_up(x);
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Fixed-point rendering with `decimals` places. Non-finite values render as
/// `NaN`; values that round to zero never show a minus sign.
pub fn format_fixed(x: f64, decimals: usize) -> String {
    if !x.is_finite() {
        return "NaN".to_string();
    }
    let factor = 10f64.powi(decimals as i32);
    // adding 0.0 turns -0.0 into 0.0
    let rounded = (x * factor).round() / factor + 0.0;
    format!("{:.*}", decimals, rounded)
}
