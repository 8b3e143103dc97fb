//! Tabular preview of a generated report.

use crate::format::{CellStyle, format_cell};
use crate::locale::Locale;
use crate::result::ReportResult;
use serde::Serialize;

/// What the preview pane shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Preview {
    /// The report has no rows; no table, no export actions.
    Empty { title: String, message: String },
    Table(PreviewTable),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewTable {
    pub title: String,
    /// `#` followed by the column labels.
    pub headers: Vec<String>,
    pub rows: Vec<PreviewRow>,
    /// Record and field counts.
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewRow {
    /// 1-based row number.
    pub number: usize,
    pub cells: Vec<String>,
}

impl Preview {
    pub fn is_empty(&self) -> bool {
        matches!(self, Preview::Empty { .. })
    }
}

pub fn render_preview(report: &ReportResult, locale: &Locale) -> Preview {
    let title = format!("{} - {}", locale.preview_title, report.title());
    if report.is_empty() {
        return Preview::Empty {
            title,
            message: locale.empty_state.clone(),
        };
    }

    let columns = report.columns();
    let headers = std::iter::once("#".to_string())
        .chain(columns.iter().map(|c| c.label.clone()))
        .collect();
    let rows = report
        .rows()
        .iter()
        .enumerate()
        .map(|(i, record)| PreviewRow {
            number: i + 1,
            cells: columns
                .iter()
                .map(|c| format_cell(record.get(&c.name), CellStyle::Display, locale))
                .collect(),
        })
        .collect();
    let summary = format!(
        "{}: {} {} • {}: {} {}",
        locale.records_label,
        report.row_count(),
        locale.records_unit,
        locale.fields_label,
        columns.len(),
        locale.fields_unit
    );

    Preview::Table(PreviewTable {
        title,
        headers,
        rows,
        summary,
    })
}
