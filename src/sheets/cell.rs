use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;

use super::envelope::{GvizCell, GvizRow};

/// Fallback substituted for text cells that are missing or null.
pub const TEXT_SENTINEL: &str = "N/A";

static DATE_COMPONENTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Positional accessor over one sparse row.
///
/// Column positions come from the per-sheet column tables declared next to
/// each record type. Every accessor applies the fallback policy for its cell
/// kind, so reading a row never fails.
pub struct RowReader<'a> {
    cells: Option<&'a [Option<GvizCell>]>,
}

impl<'a> RowReader<'a> {
    pub fn new(row: &'a GvizRow) -> Self {
        Self {
            cells: row.c.as_deref(),
        }
    }

    fn value(&self, index: usize) -> Option<&'a Value> {
        self.cells?.get(index)?.as_ref()?.v.as_ref()
    }

    /// Text cell: the value rendered as a string, the sentinel when absent.
    pub fn text(&self, index: usize) -> String {
        match self.value(index) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => TEXT_SENTINEL.to_string(),
        }
    }

    /// Numeric cell: the value when numeric, zero otherwise.
    pub fn number(&self, index: usize) -> Decimal {
        match self.value(index) {
            Some(Value::Number(n)) => decimal_from_number(n),
            _ => Decimal::ZERO,
        }
    }

    /// Integer quantity cell, truncating any fractional part.
    pub fn quantity(&self, index: usize) -> i64 {
        match self.value(index) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// Date cell holding a structured `Date(year,month,day)` token.
    ///
    /// Missing or malformed tokens substitute the wall clock at parse time,
    /// matching the upstream feed's observable behavior; callers must
    /// tolerate non-determinism on that path.
    pub fn date(&self, index: usize) -> DateTime<Utc> {
        self.value(index)
            .and_then(Value::as_str)
            .and_then(parse_gviz_date)
            .unwrap_or_else(Utc::now)
    }

    /// Currency cell: numbers pass through; strings are stripped of the
    /// currency symbol and thousands separators and parsed as a decimal;
    /// anything else yields zero.
    pub fn currency(&self, index: usize) -> Decimal {
        match self.value(index) {
            Some(Value::Number(n)) => decimal_from_number(n),
            Some(Value::String(s)) => parse_currency(s),
            _ => Decimal::ZERO,
        }
    }
}

fn decimal_from_number(n: &serde_json::Number) -> Decimal {
    if let Some(i) = n.as_i64() {
        return Decimal::from(i);
    }
    n.as_f64()
        .and_then(Decimal::from_f64_retain)
        .unwrap_or(Decimal::ZERO)
}

/// Parse a `Date(year,month,day)` token. The month component is zero-indexed
/// in the source encoding.
pub fn parse_gviz_date(token: &str) -> Option<DateTime<Utc>> {
    if !token.starts_with("Date(") {
        return None;
    }
    let parts: Vec<u32> = DATE_COMPONENTS
        .find_iter(token)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    if parts.len() != 3 {
        return None;
    }
    Utc.with_ymd_and_hms(parts[0] as i32, parts[1] + 1, parts[2], 0, 0, 0)
        .single()
}

/// Strip `$` and thousands separators, then parse as a decimal.
pub fn parse_currency(raw: &str) -> Decimal {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    cleaned.trim().parse().unwrap_or(Decimal::ZERO)
}
