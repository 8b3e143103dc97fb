//! Schema-driven report generation.
//!
//! The pipeline works over any record type without hardcoding fields:
//!
//! 1. [`fields`]: which fields can be selected, and which (at most five) can be filtered
//! 2. [`filters`]: the constraint set and the input widget for each filterable field
//! 3. [`session`]: one report-building session; validates, fetches, and holds the snapshot
//! 4. [`preview`]: the snapshot as display strings in a numbered table
//! 5. [`export`]: the same snapshot as CSV, JSON or PDF bytes
//!
//! Preview and export only ever read a [`ReportResult`], a frozen
//! `(rows, columns)` snapshot that is replaced wholesale on every generation.

pub mod export;
pub mod fields;
pub mod filters;
pub mod preview;
pub mod session;

mod error;
mod format;
mod locale;
mod result;

pub use error::{ReportError, Result, ValidationError};
pub use export::{ExportArtifact, ExportContext, ExportFormat, ReportEncoder, export};
pub use fields::{FieldSelection, SelectableField, filterable_fields, selectable_fields};
pub use filters::{ChoiceOption, FilterInput, FilterSet, InputWidget, filter_widgets, render_input};
pub use format::{CellStyle, format_cell};
pub use locale::Locale;
pub use preview::{Preview, PreviewRow, PreviewTable, render_preview};
pub use result::{Column, ReportResult};
pub use session::{GenerateOutcome, PendingReport, ReportSession, SessionPhase};
