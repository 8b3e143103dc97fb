//! In-process backend.
//!
//! Holds schemas, records and uploaded files in memory. Used by tests, by
//! the CLI's `--fixture` mode, and anywhere a hosted backend is not wanted.

use crate::backend::{FileStore, Filters, RecordStore, UploadedFile};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use portfolio_model::{
    BuiltInField, Evidence, FieldKind, Record, RecordSchema, TeacherProfile,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

const DEFAULT_USER: &str = "teacher@portfolio.local";

#[derive(Default)]
struct MemoryState {
    schemas: HashMap<String, RecordSchema>,
    records: HashMap<String, Vec<Record>>,
    files: HashMap<String, Vec<u8>>,
}

/// Shape of a fixture file: JSON-schema-like descriptions plus seed records.
#[derive(Debug, Default, Deserialize)]
struct Fixture {
    #[serde(default)]
    schemas: Map<String, Value>,
    #[serde(default)]
    records: HashMap<String, Vec<Record>>,
}

/// In-memory [`RecordStore`] and [`FileStore`].
pub struct MemoryBackend {
    state: RwLock<MemoryState>,
    user: String,
    offline: AtomicBool,
    list_calls: AtomicUsize,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Empty backend with no record types.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState::default()),
            user: DEFAULT_USER.to_string(),
            offline: AtomicBool::new(false),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Backend with the `TeacherProfile` and `Evidence` types registered.
    pub fn with_portfolio_schemas() -> Self {
        let mut state = MemoryState::default();
        for schema in [TeacherProfile::schema(), Evidence::schema()] {
            state.records.insert(schema.record_type.clone(), Vec::new());
            state.schemas.insert(schema.record_type.clone(), schema);
        }
        Self {
            state: RwLock::new(state),
            ..Self::new()
        }
    }

    /// Builds a backend from a fixture document:
    /// `{"schemas": {"<Type>": {"properties": {...}}}, "records": {"<Type>": [...]}}`.
    ///
    /// Record types that only appear under `records` get an empty schema.
    pub fn from_fixture(fixture: Value) -> StoreResult<Self> {
        let fixture: Fixture = serde_json::from_value(fixture)?;
        let mut state = MemoryState::default();

        for (record_type, schema) in &fixture.schemas {
            let schema = RecordSchema::from_json(record_type.clone(), schema)?;
            state.schemas.insert(record_type.clone(), schema);
            state.records.entry(record_type.clone()).or_default();
        }
        for (record_type, records) in fixture.records {
            state
                .schemas
                .entry(record_type.clone())
                .or_insert_with(|| RecordSchema::new(record_type.clone(), Vec::new()));
            state.records.entry(record_type).or_default().extend(records);
        }

        debug!(
            "Loaded fixture with {} record types",
            state.schemas.len()
        );
        Ok(Self {
            state: RwLock::new(state),
            ..Self::new()
        })
    }

    /// Reads a fixture from a JSON file. See [`MemoryBackend::from_fixture`].
    pub fn from_fixture_file(path: &Path) -> StoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_fixture(serde_json::from_str(&text)?)
    }

    /// Sets the value stamped into `created_by` on new records.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Registers (or replaces) a record type.
    pub async fn register_schema(&self, schema: RecordSchema) {
        let mut state = self.state.write().await;
        state.records.entry(schema.record_type.clone()).or_default();
        state.schemas.insert(schema.record_type.clone(), schema);
    }

    /// Inserts records verbatim, without stamping built-in fields.
    pub async fn seed(&self, record_type: &str, records: Vec<Record>) -> StoreResult<()> {
        let mut state = self.state.write().await;
        if !state.schemas.contains_key(record_type) {
            return Err(StoreError::NotFound(format!("record type {record_type}")));
        }
        state
            .records
            .entry(record_type.to_string())
            .or_default()
            .extend(records);
        Ok(())
    }

    /// Simulates losing connectivity: every call fails with `Transport`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of `list` queries served so far (including failed ones).
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Bytes of a previously uploaded file.
    pub async fn file(&self, file_url: &str) -> Option<Vec<u8>> {
        self.state.read().await.files.get(file_url).cloned()
    }

    fn ensure_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("backend unreachable".to_string()));
        }
        Ok(())
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn unknown_type(record_type: &str) -> StoreError {
    StoreError::NotFound(format!("record type {record_type}"))
}

/// Store-side matching. Enumerated values match exactly and case-sensitively,
/// text matches as a case-insensitive substring, numbers are compared after
/// coercing the constraint, and dates match on their `YYYY-MM-DD` prefix.
fn matches(record: &Record, schema: &RecordSchema, filters: &Filters) -> bool {
    filters.iter().all(|(field, wanted)| {
        let Some(actual) = record.get(field) else {
            return false;
        };
        let kind = schema.field(field).map(|f| f.kind);
        match (kind, wanted) {
            (_, Value::Null) => true,
            (Some(FieldKind::Text), Value::String(needle)) => actual
                .as_str()
                .is_some_and(|hay| hay.to_lowercase().contains(&needle.to_lowercase())),
            (Some(FieldKind::Number), Value::String(raw)) => match raw.trim().parse::<f64>() {
                Ok(n) => actual.as_f64() == Some(n),
                Err(_) => false,
            },
            (Some(FieldKind::Date), Value::String(day)) => {
                actual.as_str().is_some_and(|d| d.starts_with(day.as_str()))
            }
            (Some(FieldKind::Array), Value::String(item)) => actual
                .as_array()
                .is_some_and(|items| items.iter().any(|v| v.as_str() == Some(item.as_str()))),
            (Some(FieldKind::Boolean), Value::String(raw)) => {
                actual.as_bool().map(|b| b.to_string()).as_deref() == Some(raw.as_str())
            }
            (Some(FieldKind::Enumerated | FieldKind::Object) | None, Value::String(s)) => {
                actual.as_str() == Some(s.as_str())
            }
            (_, other) => actual == other,
        }
    })
}

#[async_trait]
impl RecordStore for MemoryBackend {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn schema(&self, record_type: &str) -> StoreResult<RecordSchema> {
        self.ensure_online()?;
        self.state
            .read()
            .await
            .schemas
            .get(record_type)
            .cloned()
            .ok_or_else(|| unknown_type(record_type))
    }

    async fn list(&self, record_type: &str, filters: &Filters) -> StoreResult<Vec<Record>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;
        let state = self.state.read().await;
        let schema = state
            .schemas
            .get(record_type)
            .ok_or_else(|| unknown_type(record_type))?;
        let records = state.records.get(record_type).map(Vec::as_slice).unwrap_or(&[]);

        Ok(records
            .iter()
            .filter(|r| matches(r, schema, filters))
            .cloned()
            .collect())
    }

    async fn create(&self, record_type: &str, data: Map<String, Value>) -> StoreResult<Record> {
        self.ensure_online()?;
        let mut state = self.state.write().await;
        if !state.schemas.contains_key(record_type) {
            return Err(unknown_type(record_type));
        }

        let now = now_timestamp();
        let mut fields = Map::new();
        fields.insert(BuiltInField::Id.name().into(), Value::String(Uuid::now_v7().to_string()));
        fields.insert(BuiltInField::CreatedDate.name().into(), Value::String(now.clone()));
        fields.insert(BuiltInField::UpdatedDate.name().into(), Value::String(now));
        fields.insert(BuiltInField::CreatedBy.name().into(), Value::String(self.user.clone()));
        for (key, value) in data {
            if BuiltInField::from_name(&key).is_none() {
                fields.insert(key, value);
            }
        }

        let record = Record::new(fields);
        state
            .records
            .entry(record_type.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        record_type: &str,
        id: &str,
        data: Map<String, Value>,
    ) -> StoreResult<Record> {
        self.ensure_online()?;
        let mut state = self.state.write().await;
        let records = state
            .records
            .get_mut(record_type)
            .ok_or_else(|| unknown_type(record_type))?;
        let existing = records
            .iter_mut()
            .find(|r| r.id() == Some(id))
            .ok_or_else(|| StoreError::NotFound(format!("{record_type} {id}")))?;

        let mut fields = existing.fields().clone();
        for (key, value) in data {
            if BuiltInField::from_name(&key).is_none() {
                fields.insert(key, value);
            }
        }
        fields.insert(
            BuiltInField::UpdatedDate.name().into(),
            Value::String(now_timestamp()),
        );
        *existing = Record::new(fields);
        Ok(existing.clone())
    }

    async fn delete(&self, record_type: &str, id: &str) -> StoreResult<()> {
        self.ensure_online()?;
        let mut state = self.state.write().await;
        let records = state
            .records
            .get_mut(record_type)
            .ok_or_else(|| unknown_type(record_type))?;
        let before = records.len();
        records.retain(|r| r.id() != Some(id));
        if records.len() == before {
            return Err(StoreError::NotFound(format!("{record_type} {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl FileStore for MemoryBackend {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> StoreResult<UploadedFile> {
        self.ensure_online()?;
        let file_url = format!("memory://files/{}/{}", Uuid::now_v7(), file_name);
        self.state.write().await.files.insert(file_url.clone(), bytes);
        Ok(UploadedFile { file_url })
    }
}
