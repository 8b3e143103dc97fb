//! Backend abstraction traits.
//!
//! Everything above this crate talks to the backend through these traits,
//! so the report pipeline and the portfolio services work the same against
//! the in-memory store and the hosted service.

use crate::error::StoreResult;
use async_trait::async_trait;
use portfolio_model::{Record, RecordSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Equality-style constraints keyed by field name. Empty means "everything".
/// How each value is matched (exact, substring, numeric) is up to the store.
pub type Filters = Map<String, Value>;

/// Result of a file upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub file_url: String,
}

/// Schema introspection and record CRUD.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short name of the backend, for logs.
    fn backend_name(&self) -> &'static str;

    /// Describes the fields of a record type.
    /// Fails with `NotFound` if the type is unknown.
    async fn schema(&self, record_type: &str) -> StoreResult<RecordSchema>;

    /// Lists every record of a type that satisfies `filters`, in store order.
    /// No pagination: the full matching set is returned.
    async fn list(&self, record_type: &str, filters: &Filters) -> StoreResult<Vec<Record>>;

    /// Creates a record. The store assigns the built-in fields.
    async fn create(&self, record_type: &str, data: Map<String, Value>) -> StoreResult<Record>;

    /// Merges `data` into an existing record.
    async fn update(
        &self,
        record_type: &str,
        id: &str,
        data: Map<String, Value>,
    ) -> StoreResult<Record>;

    /// Deletes a record by id.
    async fn delete(&self, record_type: &str, id: &str) -> StoreResult<()>;
}

/// File upload for evidence attachments.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> StoreResult<UploadedFile>;
}
