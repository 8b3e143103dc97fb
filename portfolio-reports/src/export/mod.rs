//! Export encoders.
//!
//! Every format reads the same [`ReportResult`] snapshot and produces a
//! named, typed blob. Encoders are independent: one failing never affects
//! another, and none of them touches session state.

mod csv;
mod json;
mod pdf;
mod pdf_doc;

pub use self::csv::CsvEncoder;
pub use self::json::JsonEncoder;
pub use self::pdf::PdfEncoder;

use crate::error::{ReportError, Result, ValidationError};
use crate::locale::Locale;
use crate::result::ReportResult;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Pdf, ExportFormat::Json];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Json => "application/json",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// Button label in the UI.
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "تصدير CSV",
            ExportFormat::Json => "تصدير JSON",
            ExportFormat::Pdf => "تصدير PDF",
        }
    }

    fn encoder(self) -> Box<dyn ReportEncoder> {
        match self {
            ExportFormat::Csv => Box::new(CsvEncoder),
            ExportFormat::Json => Box::new(JsonEncoder),
            ExportFormat::Pdf => Box::new(PdfEncoder),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(format!("unknown export format: {other} (expected csv, json or pdf)")),
        }
    }
}

/// Inputs every encoder needs besides the report itself.
#[derive(Debug, Clone)]
pub struct ExportContext {
    /// Date used in the file name and the PDF header.
    pub date: NaiveDate,
    pub locale: Locale,
}

impl ExportContext {
    pub fn new(date: NaiveDate, locale: Locale) -> Self {
        Self { date, locale }
    }

    /// Context dated with today's UTC date.
    pub fn today(locale: Locale) -> Self {
        Self::new(Utc::now().date_naive(), locale)
    }

    /// `<record type>_<YYYY-MM-DD>.<ext>`
    pub fn file_name(&self, report: &ReportResult, format: ExportFormat) -> String {
        format!(
            "{}_{}.{}",
            report.record_type(),
            self.date.format("%Y-%m-%d"),
            format.extension()
        )
    }
}

/// A finished export, ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Failure inside one encoder.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("csv: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializes a report into one format.
pub trait ReportEncoder {
    fn format(&self) -> ExportFormat;

    fn encode(
        &self,
        report: &ReportResult,
        ctx: &ExportContext,
    ) -> std::result::Result<Vec<u8>, EncodeError>;
}

/// Encodes `report` as `format`.
///
/// Refuses an empty report; exports are only offered once there is data.
pub fn export(report: &ReportResult, format: ExportFormat, ctx: &ExportContext) -> Result<ExportArtifact> {
    if report.is_empty() {
        return Err(ValidationError::EmptyReport.into());
    }

    let bytes = format.encoder().encode(report, ctx).map_err(|e| {
        warn!("{format} export of {} failed: {e}", report.record_type());
        ReportError::Encoding {
            format,
            message: e.to_string(),
        }
    })?;

    let file_name = ctx.file_name(report, format);
    debug!("Encoded {file_name} ({} bytes)", bytes.len());
    Ok(ExportArtifact {
        format,
        file_name,
        mime_type: format.mime_type(),
        bytes,
    })
}
