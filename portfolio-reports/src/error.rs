//! Error types for report building and export.

use crate::export::ExportFormat;
use portfolio_store::StoreError;
use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Everything that can go wrong while building or exporting a report.
///
/// All variants are local to the report session: callers turn them into a
/// user notice with [`ReportError::notice`] and carry on.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The action was blocked before any network call.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The record store or schema call failed. Prior state is preserved.
    #[error("transport error: {0}")]
    Transport(#[from] StoreError),

    /// One export format failed to serialize. Other formats are unaffected.
    #[error("{format} encoding failed: {message}")]
    Encoding {
        format: ExportFormat,
        message: String,
    },
}

/// Preconditions checked before a fetch or export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no record type selected")]
    MissingRecordType,

    #[error("no fields selected")]
    NoFieldsSelected,

    #[error("unknown field {field} for record type {record_type}")]
    UnknownField { record_type: String, field: String },

    #[error("field {0} cannot be filtered")]
    NotFilterable(String),

    #[error("a report is already being generated")]
    GenerationInProgress,

    #[error("no report has been generated")]
    NoReport,

    #[error("the report has no rows to export")]
    EmptyReport,
}

impl ReportError {
    /// Generic, user-facing text for this error.
    pub fn notice(&self) -> &'static str {
        match self {
            ReportError::Validation(ValidationError::MissingRecordType) => "يرجى اختيار نوع السجل",
            ReportError::Validation(ValidationError::NoFieldsSelected) => {
                "يرجى اختيار حقل واحد على الأقل"
            }
            ReportError::Validation(ValidationError::GenerationInProgress) => {
                "جاري إنشاء التقرير..."
            }
            ReportError::Validation(ValidationError::NoReport | ValidationError::EmptyReport) => {
                "لا توجد بيانات لعرضها"
            }
            ReportError::Validation(
                ValidationError::UnknownField { .. } | ValidationError::NotFilterable(_),
            ) => "الحقل غير متاح",
            ReportError::Transport(_) => "حدث خطأ أثناء تحميل البيانات، حاول مرة أخرى",
            ReportError::Encoding { .. } => "حدث خطأ أثناء التصدير",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ReportError::Validation(_))
    }
}
