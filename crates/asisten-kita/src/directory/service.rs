use std::sync::Arc;

use serde_json::json;

use crate::search::{worker_query, Page, SearchParams, WorkerFilters};
use crate::store::{
    collections, document_id, fields, from_document, DocumentStore, StoreError,
};

use super::domain::{
    NewWorkerProfile, ProfileRuleViolation, WorkerProfile, WorkerStatus, WorkerSummary,
};

/// Directory of worker profiles backed by the document store.
pub struct WorkerDirectoryService<S> {
    store: Arc<S>,
}

impl<S> WorkerDirectoryService<S>
where
    S: DocumentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Search profiles and map each hit into the list-item shape.
    pub fn search(
        &self,
        params: &SearchParams<WorkerFilters>,
    ) -> Result<Page<WorkerSummary>, DirectoryError> {
        let queries = worker_query(params);
        let result = self.store.list(collections::WORKER_PROFILES, &queries)?;

        let mut items = Vec::with_capacity(result.documents.len());
        for document in result.documents {
            let id = document_id(&document);
            let summary = from_document::<WorkerSummary>(document)
                .map_err(|source| DirectoryError::Malformed { id, source })?;
            items.push(summary);
        }

        Ok(Page::new(
            items,
            result.total,
            params.clamped_limit(),
            params.offset,
        ))
    }

    pub fn get(&self, worker_id: &str) -> Result<WorkerProfile, DirectoryError> {
        let document = self.store.get(collections::WORKER_PROFILES, worker_id)?;
        from_document(document).map_err(|source| DirectoryError::Malformed {
            id: worker_id.to_string(),
            source,
        })
    }

    /// Create the profile written at signup completion. Verification and
    /// rating state always start from platform defaults.
    pub fn register(&self, profile: NewWorkerProfile) -> Result<WorkerProfile, DirectoryError> {
        profile.validate()?;
        let mut data = self.editable_fields(&profile);
        data.append(&mut fields(json!({
            "is_verified": false,
            "rating_avg": 0.0,
            "rating_count": 0,
            "status": WorkerStatus::Active,
        })));

        let stored = self.store.create(collections::WORKER_PROFILES, None, data)?;
        let id = document_id(&stored);
        from_document(stored).map_err(|source| DirectoryError::Malformed { id, source })
    }

    /// Replace the editable fields of an existing profile.
    pub fn update_profile(
        &self,
        worker_id: &str,
        profile: NewWorkerProfile,
    ) -> Result<WorkerProfile, DirectoryError> {
        profile.validate()?;
        let data = self.editable_fields(&profile);
        let stored = self
            .store
            .update(collections::WORKER_PROFILES, worker_id, data)?;
        from_document(stored).map_err(|source| DirectoryError::Malformed {
            id: worker_id.to_string(),
            source,
        })
    }

    fn editable_fields(&self, profile: &NewWorkerProfile) -> crate::store::Document {
        fields(json!({
            "name": profile.name.trim(),
            "avatar_id": profile.avatar_id,
            "age": profile.age,
            "gender": profile.gender,
            "education": profile.education,
            "skills": profile.skills,
            "job_types": profile.job_types,
            "work_arrangements": profile.work_arrangements,
            "experience_years": profile.experience_years,
            "city": profile.city,
            "district": profile.district,
            "rate_min": profile.rate_min,
            "rate_max": profile.rate_max,
            "rate_unit": profile.rate_unit,
        }))
    }
}

/// Failures raised by the worker directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Rule(#[from] ProfileRuleViolation),
    #[error("worker profile {id} is malformed: {source}")]
    Malformed {
        id: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}
