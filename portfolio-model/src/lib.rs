//! Core data model for the teacher portfolio.
//!
//! Defines the types every other crate in the workspace depends on:
//! - [`Record`]: an opaque record as returned by the backend (flat JSON object)
//! - [`RecordSchema`] / [`FieldDescriptor`] / [`FieldKind`]: the shape of a record type
//! - [`BuiltInField`]: the four system-managed fields present on every record type
//! - [`TeacherProfile`], [`Evidence`], [`EvidenceDraft`]: the typed portfolio records
//!
//! Nothing here talks to the backend. Storage lives in `portfolio-store`,
//! report generation in `portfolio-reports`.

mod portfolio;
mod record;
mod schema;

pub use portfolio::{
    Evidence, EvidenceDraft, EvidenceType, PortfolioSection, TeacherProfile, parse_tags,
};
pub use record::Record;
pub use schema::{BuiltInField, FieldDescriptor, FieldKind, RecordSchema};

/// Result type alias using the crate's error type.
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Errors raised while decoding or validating model types.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("invalid schema for {record_type}: {reason}")]
    InvalidSchema { record_type: String, reason: String },

    #[error("validation failed: {0}")]
    Validation(String),
}
