use std::sync::Arc;

use serde_json::{json, Value};
use tracing::warn;

use crate::search::{listing_query, ListingFilters, Page, SearchParams};
use crate::store::{
    collections, document_id, fields, from_document, DocumentStore, StoreError,
};

use super::domain::{
    JobPosting, NewPosting, PostingRuleViolation, PostingStatus, PostingSummary,
};

/// Job board for lowongan documents.
pub struct JobBoardService<S> {
    store: Arc<S>,
}

impl<S> JobBoardService<S>
where
    S: DocumentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Search postings and map each hit into the list-item shape.
    pub fn search(
        &self,
        params: &SearchParams<ListingFilters>,
    ) -> Result<Page<PostingSummary>, ListingError> {
        let queries = listing_query(params);
        let result = self.store.list(collections::LOWONGAN, &queries)?;

        let mut items = Vec::with_capacity(result.documents.len());
        for document in result.documents {
            let id = document_id(&document);
            let summary = from_document::<PostingSummary>(document)
                .map_err(|source| ListingError::Malformed { id, source })?;
            items.push(summary);
        }

        Ok(Page::new(
            items,
            result.total,
            params.clamped_limit(),
            params.offset,
        ))
    }

    pub fn get(&self, lowongan_id: &str) -> Result<JobPosting, ListingError> {
        let document = self.store.get(collections::LOWONGAN, lowongan_id)?;
        from_document(document).map_err(|source| ListingError::Malformed {
            id: lowongan_id.to_string(),
            source,
        })
    }

    /// Draft a new lowongan for an employer. Counters start at zero and the
    /// posting stays invisible to search until published.
    pub fn create(&self, owner: &str, posting: NewPosting) -> Result<JobPosting, ListingError> {
        if owner.trim().is_empty() {
            return Err(ListingError::MissingOwner);
        }
        posting.validate()?;

        let data = fields(json!({
            "title": posting.title.trim(),
            "description": posting.description,
            "city": posting.city,
            "education": posting.education,
            "gender": posting.gender,
            "job_types": posting.job_types,
            "skills": posting.skills,
            "work_arrangements": posting.work_arrangements,
            "salary_min": posting.salary_min,
            "salary_max": posting.salary_max,
            "rate_unit": posting.rate_unit,
            "user_id": owner,
            "status": PostingStatus::Draft,
            "is_active": false,
            "views_count": 0,
            "applications_count": 0,
        }));

        let stored = self.store.create(collections::LOWONGAN, None, data)?;
        let id = document_id(&stored);
        from_document(stored).map_err(|source| ListingError::Malformed { id, source })
    }

    /// Move a draft to published and make it visible to search.
    pub fn publish(&self, lowongan_id: &str) -> Result<JobPosting, ListingError> {
        self.transition(
            lowongan_id,
            PostingStatus::Draft,
            PostingStatus::Published,
            true,
            "publish",
        )
    }

    /// Close a published lowongan; closed postings never reopen.
    pub fn close(&self, lowongan_id: &str) -> Result<JobPosting, ListingError> {
        self.transition(
            lowongan_id,
            PostingStatus::Published,
            PostingStatus::Closed,
            false,
            "close",
        )
    }

    fn transition(
        &self,
        lowongan_id: &str,
        expected: PostingStatus,
        next: PostingStatus,
        active: bool,
        action: &'static str,
    ) -> Result<JobPosting, ListingError> {
        let posting = self.get(lowongan_id)?;
        if posting.status != expected {
            return Err(ListingError::InvalidStatus {
                from: posting.status,
                action,
            });
        }

        let stored = self.store.update(
            collections::LOWONGAN,
            lowongan_id,
            fields(json!({ "status": next, "is_active": active })),
        )?;
        from_document(stored).map_err(|source| ListingError::Malformed {
            id: lowongan_id.to_string(),
            source,
        })
    }

    /// Best-effort view counter; a failed bump never surfaces to the caller.
    pub fn record_view(&self, lowongan_id: &str) {
        if let Err(err) = self.bump_views(lowongan_id) {
            warn!(lowongan_id = %lowongan_id, error = %err, "view counter update failed");
        }
    }

    // read-add-write; concurrent viewers can lose an increment
    fn bump_views(&self, lowongan_id: &str) -> Result<(), StoreError> {
        let document = self.store.get(collections::LOWONGAN, lowongan_id)?;
        let views = document
            .get("views_count")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        self.store.update(
            collections::LOWONGAN,
            lowongan_id,
            fields(json!({ "views_count": views + 1 })),
        )?;
        Ok(())
    }
}

/// Failures raised by the job board.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error(transparent)]
    Rule(#[from] PostingRuleViolation),
    #[error("posting owner is required")]
    MissingOwner,
    #[error("cannot {action} a posting in status {from:?}")]
    InvalidStatus {
        from: PostingStatus,
        action: &'static str,
    },
    #[error("job posting {id} is malformed: {source}")]
    Malformed {
        id: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}
