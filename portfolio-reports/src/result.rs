use crate::export::ExportFormat;
use chrono::{DateTime, Utc};
use portfolio_model::{Record, RecordSchema};
use serde::{Deserialize, Serialize};

/// One output column: the field name and the label shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub label: String,
}

impl Column {
    /// Column for `name`, labelled through `schema`.
    pub fn for_field(schema: &RecordSchema, name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: schema.label(name),
        }
    }
}

/// Snapshot produced by one successful generation.
///
/// Rows and columns are frozen together: later changes to the field
/// selection do not alter a report that has already been produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportResult {
    record_type: String,
    title: String,
    columns: Vec<Column>,
    rows: Vec<Record>,
    generated_at: DateTime<Utc>,
}

impl ReportResult {
    pub fn new(record_type: impl Into<String>, columns: Vec<Column>, rows: Vec<Record>) -> Self {
        let record_type = record_type.into();
        Self {
            title: record_type.clone(),
            record_type,
            columns,
            rows,
            generated_at: Utc::now(),
        }
    }

    /// Overrides the display name (defaults to the record type).
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Formats that can be exported. None for an empty report.
    pub fn available_formats(&self) -> &'static [ExportFormat] {
        if self.is_empty() {
            &[]
        } else {
            &ExportFormat::ALL
        }
    }
}
