//! Value-to-text conversion shared by preview and export.

use crate::locale::Locale;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use std::fmt::Write;

/// Where a cell ends up. Preview favours glyphs and counts; exports favour
/// words and full content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Display,
    Export,
}

/// Renders one field value. `None` means the record lacks the field.
///
/// Precedence: missing/null, boolean, list, object, ISO timestamp, then the
/// natural string form.
pub fn format_cell(value: Option<&Value>, style: CellStyle, locale: &Locale) -> String {
    let missing = || match style {
        CellStyle::Display => locale.placeholder.clone(),
        CellStyle::Export => String::new(),
    };

    match value {
        None | Some(Value::Null) => missing(),
        Some(Value::Bool(b)) => match (style, b) {
            (CellStyle::Display, true) => locale.true_glyph.clone(),
            (CellStyle::Display, false) => locale.false_glyph.clone(),
            (CellStyle::Export, true) => locale.yes.clone(),
            (CellStyle::Export, false) => locale.no.clone(),
        },
        Some(Value::Array(items)) => match style {
            CellStyle::Display if items.is_empty() => missing(),
            CellStyle::Display => format!("{} {}", items.len(), locale.items_suffix),
            CellStyle::Export => items.iter().map(list_item).collect::<Vec<_>>().join(", "),
        },
        Some(object @ Value::Object(_)) => object.to_string(),
        Some(Value::String(s)) => format_timestamp(s, locale).unwrap_or_else(|| s.clone()),
        Some(Value::Number(n)) => n.to_string(),
    }
}

fn list_item(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Date-only rendering of an RFC 3339 timestamp (must carry `T` and `Z`).
/// Plain `YYYY-MM-DD` strings are left alone.
fn format_timestamp(s: &str, locale: &Locale) -> Option<String> {
    if !(s.contains('T') && s.contains('Z')) {
        return None;
    }
    let parsed = DateTime::parse_from_rfc3339(s).ok()?;
    Some(format_date(parsed.with_timezone(&Utc).date_naive(), locale))
}

/// Formats a calendar date with the locale pattern, falling back to ISO form
/// when the pattern asks for something a date does not have (e.g. `%H`).
pub(crate) fn format_date(date: NaiveDate, locale: &Locale) -> String {
    let mut out = String::new();
    match write!(out, "{}", date.format(&locale.date_format)) {
        Ok(()) => out,
        Err(_) => date.format("%Y-%m-%d").to_string(),
    }
}
