use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::warn;

use crate::directory::WorkerSummary;
use crate::search::Page;
use crate::store::{
    collections, document_id, fields, from_document, DocumentStore, Predicate, StoreError,
};

use super::domain::{
    Application, ApplicationQuery, ApplicationStatus, ApplicationWithProfile, NewApplication,
    TransitionPolicy,
};

/// Lifecycle manager for job applications.
pub struct ApplicationService<S> {
    store: Arc<S>,
    policy: TransitionPolicy,
}

impl<S> ApplicationService<S>
where
    S: DocumentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_policy(store, TransitionPolicy::default())
    }

    pub fn with_policy(store: Arc<S>, policy: TransitionPolicy) -> Self {
        Self { store, policy }
    }

    /// Submit a worker's application for a lowongan.
    ///
    /// The duplicate lookup and the write are two separate store round trips;
    /// concurrent submissions for the same pair can both pass the lookup. The
    /// store serializes at the document level, and a conflict it reports is
    /// surfaced as the same duplicate error.
    pub fn apply(&self, input: NewApplication) -> Result<Application, ApplicationError> {
        if input.lowongan_id.trim().is_empty() || input.art_user_id.trim().is_empty() {
            return Err(ApplicationError::MissingReference);
        }

        if self
            .check_existing(&input.lowongan_id, &input.art_user_id)?
            .is_some()
        {
            return Err(ApplicationError::AlreadyApplied);
        }

        let data = fields(json!({
            "lowongan_id": input.lowongan_id,
            "art_user_id": input.art_user_id,
            "status": ApplicationStatus::Pending,
            "message": input.message,
            "applied_at": Utc::now(),
        }));

        let stored = match self.store.create(collections::APPLICATIONS, None, data) {
            Ok(document) => document,
            Err(StoreError::Conflict) => return Err(ApplicationError::AlreadyApplied),
            Err(err) => return Err(err.into()),
        };

        let id = document_id(&stored);
        let application: Application =
            from_document(stored).map_err(|source| ApplicationError::Malformed { id, source })?;

        self.record_application(&application.lowongan_id);
        Ok(application)
    }

    /// Applications-count bump is fire-and-forget; a miss leaves the counter
    /// stale but never fails the submission.
    fn record_application(&self, lowongan_id: &str) {
        if let Err(err) = self.bump_applications_count(lowongan_id) {
            warn!(lowongan_id = %lowongan_id, error = %err, "applications counter update failed");
        }
    }

    // read-add-write; concurrent applies can lose an increment
    fn bump_applications_count(&self, lowongan_id: &str) -> Result<(), StoreError> {
        let document = self.store.get(collections::LOWONGAN, lowongan_id)?;
        let count = document
            .get("applications_count")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        self.store.update(
            collections::LOWONGAN,
            lowongan_id,
            fields(json!({ "applications_count": count + 1 })),
        )?;
        Ok(())
    }

    /// Owner decision: accept the applicant.
    pub fn accept(&self, application_id: &str) -> Result<Application, ApplicationError> {
        self.transition(application_id, ApplicationStatus::Accepted)
    }

    /// Owner decision: reject the applicant.
    pub fn reject(&self, application_id: &str) -> Result<Application, ApplicationError> {
        self.transition(application_id, ApplicationStatus::Rejected)
    }

    /// Applicant decision: withdraw the application.
    pub fn withdraw(&self, application_id: &str) -> Result<Application, ApplicationError> {
        self.transition(application_id, ApplicationStatus::Withdrawn)
    }

    fn transition(
        &self,
        application_id: &str,
        to: ApplicationStatus,
    ) -> Result<Application, ApplicationError> {
        let current = self.get(application_id)?;
        if self.policy == TransitionPolicy::PendingOnly && current.status.is_terminal() {
            return Err(ApplicationError::InvalidTransition {
                from: current.status,
                to,
            });
        }

        let stored = self.store.update(
            collections::APPLICATIONS,
            application_id,
            fields(json!({ "status": to })),
        )?;
        let id = document_id(&stored);
        from_document(stored).map_err(|source| ApplicationError::Malformed { id, source })
    }

    pub fn get(&self, application_id: &str) -> Result<Application, ApplicationError> {
        let document = self.store.get(collections::APPLICATIONS, application_id)?;
        from_document(document).map_err(|source| ApplicationError::Malformed {
            id: application_id.to_string(),
            source,
        })
    }

    /// Admin-only removal. Everyday flows end at a terminal status instead;
    /// the counter on the parent lowongan is left as-is.
    pub fn delete(&self, application_id: &str) -> Result<(), ApplicationError> {
        self.store.delete(collections::APPLICATIONS, application_id)?;
        Ok(())
    }

    /// Idempotent, side-effect-free lookup for the (lowongan, worker) pair.
    /// Feeds both the duplicate precondition and the "already applied" UI
    /// state.
    pub fn check_existing(
        &self,
        lowongan_id: &str,
        art_user_id: &str,
    ) -> Result<Option<Application>, ApplicationError> {
        let queries = [
            Predicate::limit(1),
            Predicate::offset(0),
            Predicate::equal("lowongan_id", lowongan_id),
            Predicate::equal("art_user_id", art_user_id),
        ];
        let result = self.store.list(collections::APPLICATIONS, &queries)?;

        match result.documents.into_iter().next() {
            Some(document) => {
                let id = document_id(&document);
                let application = from_document(document)
                    .map_err(|source| ApplicationError::Malformed { id, source })?;
                Ok(Some(application))
            }
            None => Ok(None),
        }
    }

    /// List applications filtered by worker, lowongan, and/or status set.
    /// Defaults to newest submissions first.
    pub fn list(&self, query: &ApplicationQuery) -> Result<Page<Application>, ApplicationError> {
        let mut queries = vec![
            Predicate::limit(query.clamped_limit()),
            Predicate::offset(query.offset),
        ];
        if let Some(worker) = &query.art_user_id {
            queries.push(Predicate::equal("art_user_id", worker.as_str()));
        }
        if let Some(lowongan) = &query.lowongan_id {
            queries.push(Predicate::equal("lowongan_id", lowongan.as_str()));
        }
        if !query.statuses.is_empty() {
            queries.push(Predicate::contains_any(
                "status",
                query.statuses.iter().map(|status| json!(status)).collect(),
            ));
        }
        queries.push(match &query.sort {
            Some(spec) => match spec.direction {
                crate::search::SortDirection::Asc => Predicate::order_asc(&spec.field),
                crate::search::SortDirection::Desc => Predicate::order_desc(&spec.field),
            },
            None => Predicate::order_desc("applied_at"),
        });

        let result = self.store.list(collections::APPLICATIONS, &queries)?;
        let mut items = Vec::with_capacity(result.documents.len());
        for document in result.documents {
            let id = document_id(&document);
            let application = from_document(document)
                .map_err(|source| ApplicationError::Malformed { id, source })?;
            items.push(application);
        }

        Ok(Page::new(
            items,
            result.total,
            query.clamped_limit(),
            query.offset,
        ))
    }

    pub fn list_for_worker(
        &self,
        art_user_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Page<Application>, ApplicationError> {
        self.list(&ApplicationQuery::for_worker(art_user_id, limit, offset))
    }

    pub fn list_for_job(
        &self,
        lowongan_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Page<Application>, ApplicationError> {
        self.list(&ApplicationQuery::for_job(lowongan_id, limit, offset))
    }

    /// Join a page of a lowongan's applications with applicant summaries in
    /// one batch fetch. A missing or unreadable profile degrades that row to
    /// `worker: None`; the page itself still succeeds.
    pub fn list_for_job_with_profiles(
        &self,
        lowongan_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Page<ApplicationWithProfile>, ApplicationError> {
        let page = self.list_for_job(lowongan_id, limit, offset)?;
        let profiles = self.fetch_profiles(&page.items);
        Ok(page.map(|application| {
            let worker = profiles.get(&application.art_user_id).cloned();
            ApplicationWithProfile {
                application,
                worker,
            }
        }))
    }

    fn fetch_profiles(&self, applications: &[Application]) -> HashMap<String, WorkerSummary> {
        let ids: BTreeSet<&str> = applications
            .iter()
            .map(|application| application.art_user_id.as_str())
            .collect();
        if ids.is_empty() {
            return HashMap::new();
        }

        let queries = [
            Predicate::limit(ids.len()),
            Predicate::offset(0),
            Predicate::contains_any(
                "id",
                ids.iter().map(|id| Value::String(id.to_string())).collect(),
            ),
        ];
        let result = match self.store.list(collections::WORKER_PROFILES, &queries) {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "worker profile join failed; returning bare applications");
                return HashMap::new();
            }
        };

        let mut profiles = HashMap::new();
        for document in result.documents {
            match from_document::<WorkerSummary>(document) {
                Ok(summary) => {
                    profiles.insert(summary.id.clone(), summary);
                }
                Err(err) => warn!(error = %err, "skipping malformed worker profile in join"),
            }
        }
        profiles
    }
}

/// Failures raised by the application lifecycle manager. `AlreadyApplied` is
/// the business-rule rejection the UI renders as "sudah melamar"; transport
/// failures stay in `Store`.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("both lowongan_id and art_user_id are required")]
    MissingReference,
    #[error("an application for this lowongan already exists")]
    AlreadyApplied,
    #[error("cannot move an application from {from:?} to {to:?}")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error("application {id} is malformed: {source}")]
    Malformed {
        id: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}
