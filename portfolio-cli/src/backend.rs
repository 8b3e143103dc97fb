use crate::config::BackendConfig;
use anyhow::{Context, Result};
use portfolio_model::{Evidence, TeacherProfile};
use portfolio_store::{FileStore, HttpBackend, MemoryBackend, RecordStore};
use std::sync::Arc;
use tracing::info;

/// The record and file stores commands run against.
pub struct Backends {
    pub records: Arc<dyn RecordStore>,
    pub files: Arc<dyn FileStore>,
}

impl Backends {
    /// Fixture-backed memory store when a fixture is configured, the HTTP
    /// backend otherwise.
    pub async fn connect(config: &BackendConfig) -> Result<Self> {
        match &config.fixture {
            Some(path) => {
                let memory = MemoryBackend::from_fixture_file(path)
                    .with_context(|| format!("Failed to load fixture {}", path.display()))?;
                // Portfolio types a fixture leaves undeclared get their
                // built-in schemas; seeded records are kept.
                for schema in [TeacherProfile::schema(), Evidence::schema()] {
                    let declared = memory
                        .schema(&schema.record_type)
                        .await
                        .is_ok_and(|s| !s.fields.is_empty());
                    if !declared {
                        memory.register_schema(schema).await;
                    }
                }
                info!("Serving records from fixture {}", path.display());
                let memory = Arc::new(memory);
                Ok(Self {
                    records: memory.clone(),
                    files: memory,
                })
            }
            None => {
                let http = HttpBackend::new(config.http.clone())
                    .context("Failed to create backend client")?;
                info!("Using backend at {}", config.http.base_url);
                let http = Arc::new(http);
                Ok(Self {
                    records: http.clone(),
                    files: http,
                })
            }
        }
    }

    pub fn from_memory(memory: Arc<MemoryBackend>) -> Self {
        Self {
            records: memory.clone(),
            files: memory,
        }
    }
}
