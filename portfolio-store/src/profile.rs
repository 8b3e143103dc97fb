//! Teacher profile persistence.

use crate::backend::{Filters, RecordStore};
use crate::error::StoreResult;
use portfolio_model::TeacherProfile;
use std::sync::Arc;
use tracing::info;

/// Loads and saves the single `TeacherProfile` record that backs every
/// portfolio tab.
pub struct ProfileService {
    store: Arc<dyn RecordStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// The first stored profile, or `None` when the teacher has not created one yet.
    pub async fn load(&self) -> StoreResult<Option<TeacherProfile>> {
        let records = self
            .store
            .list(TeacherProfile::RECORD_TYPE, &Filters::new())
            .await?;
        records
            .into_iter()
            .next()
            .map(TeacherProfile::from_record)
            .transpose()
            .map_err(Into::into)
    }

    /// Updates the profile when it already has an id, creates it otherwise.
    /// Returns the profile as stored by the backend.
    pub async fn save(&self, profile: &TeacherProfile) -> StoreResult<TeacherProfile> {
        let data = profile.to_data()?;
        let record = match &profile.id {
            Some(id) => {
                self.store
                    .update(TeacherProfile::RECORD_TYPE, id, data)
                    .await?
            }
            None => self.store.create(TeacherProfile::RECORD_TYPE, data).await?,
        };
        let saved = TeacherProfile::from_record(record)?;
        info!("Saved teacher profile {}", saved.id.as_deref().unwrap_or("?"));
        Ok(saved)
    }
}
