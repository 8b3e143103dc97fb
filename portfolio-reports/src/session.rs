//! Report-building session.
//!
//! A [`ReportSession`] owns everything the user configures for one report:
//! the record type and its schema, the filter set, the field selection and
//! the last [`ReportResult`]. Choosing a record type resets all of it in one
//! step; nothing leaks from one record type into the next.
//!
//! Generation runs in two halves so a front end can keep its event loop
//! responsive while the store answers:
//!
//! ```text
//! begin_generate ──> PendingReport ──> store.list(..) ──> complete_generate
//! ```
//!
//! Each pending report carries a request token. Only the most recent token is
//! applied; answers to superseded requests are discarded.

use crate::error::{ReportError, Result, ValidationError};
use crate::export::{ExportArtifact, ExportContext, ExportFormat, export};
use crate::fields::{FieldSelection, SelectableField, filterable_fields, selectable_fields};
use crate::filters::{FilterSet, InputWidget, filter_widgets};
use crate::locale::Locale;
use crate::preview::{Preview, render_preview};
use crate::result::{Column, ReportResult};
use portfolio_model::{FieldDescriptor, Record, RecordSchema};
use portfolio_store::{Filters, RecordStore, StoreResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Choosing a record type, fields and filters.
    Configuring,
    /// A fetch is in flight.
    Generating,
    /// A report has been produced and can be previewed and exported.
    Preview,
}

/// A fetch that has been started but not yet applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReport {
    token: u64,
    record_type: String,
    filters: Filters,
    columns: Vec<Column>,
}

impl PendingReport {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    /// Query to pass to [`RecordStore::list`].
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutcome {
    /// The response became the current report.
    Applied(Arc<ReportResult>),
    /// The request had been superseded; nothing changed.
    Discarded,
}

/// Everything tied to the current record type.
#[derive(Debug, Clone)]
struct ReportConfig {
    record_type: String,
    schema: Arc<RecordSchema>,
    filters: FilterSet,
    selection: FieldSelection,
    result: Option<Arc<ReportResult>>,
    phase: SessionPhase,
}

impl ReportConfig {
    fn fresh(record_type: &str, schema: Arc<RecordSchema>) -> Self {
        Self {
            record_type: record_type.to_string(),
            schema,
            filters: FilterSet::new(),
            selection: FieldSelection::new(),
            result: None,
            phase: SessionPhase::Configuring,
        }
    }

    fn settled_phase(&self) -> SessionPhase {
        if self.result.is_some() {
            SessionPhase::Preview
        } else {
            SessionPhase::Configuring
        }
    }
}

/// Single-owner state of one report-building session.
#[derive(Debug)]
pub struct ReportSession {
    config: Option<ReportConfig>,
    schemas: HashMap<String, Arc<RecordSchema>>,
    next_token: u64,
    in_flight: Option<u64>,
    locale: Locale,
}

impl Default for ReportSession {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl ReportSession {
    pub fn new(locale: Locale) -> Self {
        Self {
            config: None,
            schemas: HashMap::new(),
            next_token: 0,
            in_flight: None,
            locale,
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    // ── Record type ─────────────────────────────────────────────

    /// Switches to `record_type`, loading its schema on first use.
    ///
    /// On success filters, selection, result and phase are reset together
    /// and any in-flight generation is invalidated. On failure the session
    /// is unchanged.
    pub async fn select_record_type(
        &mut self,
        store: &dyn RecordStore,
        record_type: &str,
    ) -> Result<Arc<RecordSchema>> {
        if record_type.trim().is_empty() {
            return Err(ValidationError::MissingRecordType.into());
        }

        let schema = match self.schemas.get(record_type) {
            Some(schema) => schema.clone(),
            None => {
                let schema = store.schema(record_type).await.map_err(|e| {
                    warn!("Failed to load schema for {record_type}: {e}");
                    ReportError::Transport(e)
                })?;
                debug!(
                    "Loaded schema for {record_type} from {} ({} fields)",
                    store.backend_name(),
                    schema.fields.len()
                );
                let schema = Arc::new(schema);
                self.schemas.insert(record_type.to_string(), schema.clone());
                schema
            }
        };

        self.config = Some(ReportConfig::fresh(record_type, schema.clone()));
        self.in_flight = None;
        Ok(schema)
    }

    pub fn record_type(&self) -> Option<&str> {
        self.config.as_ref().map(|c| c.record_type.as_str())
    }

    pub fn schema(&self) -> Option<&RecordSchema> {
        self.config.as_ref().map(|c| c.schema.as_ref())
    }

    pub fn phase(&self) -> SessionPhase {
        self.config
            .as_ref()
            .map_or(SessionPhase::Configuring, |c| c.phase)
    }

    /// True while a generation is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    // ── Fields and filters ──────────────────────────────────────

    pub fn filterable_fields(&self) -> Vec<&FieldDescriptor> {
        filterable_fields(self.schema())
    }

    pub fn selectable_fields(&self) -> Vec<SelectableField> {
        self.schema().map(selectable_fields).unwrap_or_default()
    }

    pub fn filter_widgets(&self) -> Vec<InputWidget> {
        match &self.config {
            Some(c) => filter_widgets(Some(c.schema.as_ref()), &c.filters, &self.locale),
            None => Vec::new(),
        }
    }

    pub fn filters(&self) -> Option<&FilterSet> {
        self.config.as_ref().map(|c| &c.filters)
    }

    pub fn selected_fields(&self) -> &[String] {
        self.config
            .as_ref()
            .map(|c| c.selection.as_slice())
            .unwrap_or(&[])
    }

    /// Sets (or with an empty value, clears) the constraint on `field`.
    /// Only fields offered by the filter builder are accepted.
    pub fn set_filter(&mut self, field: &str, value: &str) -> Result<&FilterSet> {
        let config = self
            .config
            .as_mut()
            .ok_or(ValidationError::MissingRecordType)?;
        let offered = filterable_fields(Some(config.schema.as_ref()))
            .iter()
            .any(|f| f.name == field);
        if !offered {
            return Err(ValidationError::NotFilterable(field.to_string()).into());
        }
        Ok(config.filters.set(field, value))
    }

    /// Toggles `field` in the selection. Returns whether it is now selected.
    pub fn toggle_field(&mut self, field: &str) -> Result<bool> {
        let config = self
            .config
            .as_mut()
            .ok_or(ValidationError::MissingRecordType)?;
        if !config.schema.is_known_field(field) {
            return Err(ValidationError::UnknownField {
                record_type: config.record_type.clone(),
                field: field.to_string(),
            }
            .into());
        }
        Ok(config.selection.toggle(field))
    }

    // ── Generation ──────────────────────────────────────────────

    /// Validates the configuration and starts a generation.
    ///
    /// Nothing changes when validation fails.
    pub fn begin_generate(&mut self) -> Result<PendingReport> {
        let config = self
            .config
            .as_mut()
            .ok_or(ValidationError::MissingRecordType)?;
        if config.selection.is_empty() {
            return Err(ValidationError::NoFieldsSelected.into());
        }
        if self.in_flight.is_some() {
            return Err(ValidationError::GenerationInProgress.into());
        }

        self.next_token += 1;
        let token = self.next_token;
        self.in_flight = Some(token);
        config.phase = SessionPhase::Generating;

        let columns = config
            .selection
            .as_slice()
            .iter()
            .map(|name| Column::for_field(&config.schema, name))
            .collect();
        debug!(
            "Generating {} report #{token} with {} filters",
            config.record_type,
            config.filters.len()
        );
        Ok(PendingReport {
            token,
            record_type: config.record_type.clone(),
            filters: config.filters.to_query(),
            columns,
        })
    }

    /// Applies the store's answer to `pending`.
    ///
    /// A superseded request is discarded whatever its outcome. A failed
    /// current request leaves the previous report in place.
    pub fn complete_generate(
        &mut self,
        pending: PendingReport,
        response: StoreResult<Vec<Record>>,
    ) -> Result<GenerateOutcome> {
        if self.in_flight != Some(pending.token) {
            debug!("Discarding stale {} report #{}", pending.record_type, pending.token);
            return Ok(GenerateOutcome::Discarded);
        }
        self.in_flight = None;

        let Some(config) = self.config.as_mut() else {
            return Ok(GenerateOutcome::Discarded);
        };

        match response {
            Ok(rows) => {
                info!(
                    "Generated {} report: {} rows, {} columns",
                    pending.record_type,
                    rows.len(),
                    pending.columns.len()
                );
                let result = Arc::new(ReportResult::new(
                    pending.record_type,
                    pending.columns,
                    rows,
                ));
                config.result = Some(result.clone());
                config.phase = SessionPhase::Preview;
                Ok(GenerateOutcome::Applied(result))
            }
            Err(e) => {
                warn!("Failed to fetch {} records: {e}", pending.record_type);
                config.phase = config.settled_phase();
                Err(ReportError::Transport(e))
            }
        }
    }

    /// Validates, fetches with the current filters, and installs the result.
    pub async fn generate(&mut self, store: &dyn RecordStore) -> Result<Arc<ReportResult>> {
        let pending = self.begin_generate()?;
        let response = store.list(pending.record_type(), pending.filters()).await;
        match self.complete_generate(pending, response)? {
            GenerateOutcome::Applied(result) => Ok(result),
            // Nothing can supersede the request while `self` is borrowed.
            GenerateOutcome::Discarded => Err(ValidationError::NoReport.into()),
        }
    }

    // ── Preview and export ──────────────────────────────────────

    pub fn result(&self) -> Option<&Arc<ReportResult>> {
        self.config.as_ref().and_then(|c| c.result.as_ref())
    }

    pub fn preview(&self) -> Option<Preview> {
        self.result().map(|r| render_preview(r, &self.locale))
    }

    /// Formats offered for the current report. Empty without rows.
    pub fn available_formats(&self) -> &'static [ExportFormat] {
        self.result().map(|r| r.available_formats()).unwrap_or(&[])
    }

    /// Exports the current report, dated `ctx.date`.
    pub fn export(&self, format: ExportFormat, ctx: &ExportContext) -> Result<ExportArtifact> {
        let result = self.result().ok_or(ValidationError::NoReport)?;
        export(result, format, ctx)
    }

    /// Exports the current report dated today, with the session locale.
    pub fn export_today(&self, format: ExportFormat) -> Result<ExportArtifact> {
        self.export(format, &ExportContext::today(self.locale.clone()))
    }
}
