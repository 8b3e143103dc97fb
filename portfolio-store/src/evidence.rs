//! Evidence bank: attachments and links grouped by portfolio section.

use crate::backend::{FileStore, Filters, RecordStore};
use crate::error::StoreResult;
use portfolio_model::{Evidence, EvidenceDraft};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Evidence CRUD plus file upload.
pub struct EvidenceBank {
    records: Arc<dyn RecordStore>,
    files: Arc<dyn FileStore>,
}

impl EvidenceBank {
    pub fn new(records: Arc<dyn RecordStore>, files: Arc<dyn FileStore>) -> Self {
        Self { records, files }
    }

    /// Uploads an attachment and returns its public URL, ready to be put
    /// into `EvidenceDraft::file_url`.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> StoreResult<String> {
        debug!("Uploading {file_name} ({} bytes)", bytes.len());
        let uploaded = self.files.upload(file_name, bytes).await?;
        Ok(uploaded.file_url)
    }

    /// Validates a draft and stores it.
    pub async fn add(&self, draft: EvidenceDraft) -> StoreResult<Evidence> {
        let data = draft.into_data()?;
        let record = self.records.create(Evidence::RECORD_TYPE, data).await?;
        let evidence = Evidence::from_record(record)?;
        info!("Added evidence {} to {}", evidence.id, evidence.section_key);
        Ok(evidence)
    }

    /// Evidence for one section, in store order.
    pub async fn list(&self, section_key: &str) -> StoreResult<Vec<Evidence>> {
        let mut filters = Filters::new();
        filters.insert("section_key".into(), Value::String(section_key.to_string()));
        self.list_matching(&filters).await
    }

    /// Every evidence record regardless of section.
    pub async fn list_all(&self) -> StoreResult<Vec<Evidence>> {
        self.list_matching(&Filters::new()).await
    }

    async fn list_matching(&self, filters: &Filters) -> StoreResult<Vec<Evidence>> {
        self.records
            .list(Evidence::RECORD_TYPE, filters)
            .await?
            .into_iter()
            .map(|r| Evidence::from_record(r).map_err(Into::into))
            .collect()
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.records.delete(Evidence::RECORD_TYPE, id).await?;
        info!("Deleted evidence {id}");
        Ok(())
    }
}
