use std::sync::Arc;

use serde_json::json;

use crate::applications::service::ApplicationService;
use crate::applications::TransitionPolicy;
use crate::store::{
    collections, fields, Document, DocumentStore, ListResult, MemoryStore, Predicate, StoreError,
};

pub(super) const LOWONGAN_ID: &str = "low-001";
pub(super) const WORKER_ID: &str = "art-001";
pub(super) const OTHER_WORKER_ID: &str = "art-002";

/// Store preloaded with one published lowongan and two worker profiles.
pub(super) fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .create(
            collections::LOWONGAN,
            Some(LOWONGAN_ID),
            fields(json!({
                "title": "ART menginap untuk keluarga kecil",
                "city": "Malang",
                "user_id": "user-001",
                "status": "published",
                "is_active": true,
                "views_count": 0,
                "applications_count": 0,
            })),
        )
        .expect("seed lowongan");

    for (id, name, rating) in [(WORKER_ID, "Siti Rahayu", 4.8), (OTHER_WORKER_ID, "Dewi Lestari", 4.2)] {
        store
            .create(
                collections::WORKER_PROFILES,
                Some(id),
                fields(json!({
                    "name": name,
                    "city": "Malang",
                    "skills": ["memasak", "menyetrika"],
                    "is_verified": true,
                    "rating_avg": rating,
                    "rating_count": 12,
                    "status": "active",
                })),
            )
            .expect("seed worker profile");
    }
    store
}

pub(super) fn build_service() -> (ApplicationService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(seeded_store());
    (ApplicationService::new(store.clone()), store)
}

pub(super) fn build_strict_service() -> (ApplicationService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(seeded_store());
    (
        ApplicationService::with_policy(store.clone(), TransitionPolicy::PendingOnly),
        store,
    )
}

pub(super) fn applications_count(store: &MemoryStore) -> u64 {
    store
        .get(collections::LOWONGAN, LOWONGAN_ID)
        .expect("lowongan present")
        .get("applications_count")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0)
}

/// Store double whose lowongan updates always fail, so the counter bump can
/// be broken without touching the application write path.
pub(super) struct CounterFailStore {
    pub(super) inner: MemoryStore,
}

impl DocumentStore for CounterFailStore {
    fn list(&self, collection: &str, queries: &[Predicate]) -> Result<ListResult, StoreError> {
        self.inner.list(collection, queries)
    }

    fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        self.inner.get(collection, id)
    }

    fn create(
        &self,
        collection: &str,
        id: Option<&str>,
        data: Document,
    ) -> Result<Document, StoreError> {
        self.inner.create(collection, id, data)
    }

    fn update(&self, collection: &str, id: &str, data: Document) -> Result<Document, StoreError> {
        if collection == collections::LOWONGAN {
            return Err(StoreError::Server("write quorum lost".to_string()));
        }
        self.inner.update(collection, id, data)
    }

    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.inner.delete(collection, id)
    }
}

/// Store double that reports every create as a conflict, standing in for a
/// backend with a compound unique index on (lowongan, worker).
pub(super) struct ConflictStore;

impl DocumentStore for ConflictStore {
    fn list(&self, _collection: &str, _queries: &[Predicate]) -> Result<ListResult, StoreError> {
        Ok(ListResult::default())
    }

    fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        Err(StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })
    }

    fn create(
        &self,
        _collection: &str,
        _id: Option<&str>,
        _data: Document,
    ) -> Result<Document, StoreError> {
        Err(StoreError::Conflict)
    }

    fn update(&self, _collection: &str, _id: &str, _data: Document) -> Result<Document, StoreError> {
        Err(StoreError::Server("read only".to_string()))
    }

    fn delete(&self, _collection: &str, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Server("read only".to_string()))
    }
}

/// Store double whose worker-profile reads fail, for exercising join
/// degradation.
pub(super) struct ProfileFailStore {
    pub(super) inner: MemoryStore,
}

impl DocumentStore for ProfileFailStore {
    fn list(&self, collection: &str, queries: &[Predicate]) -> Result<ListResult, StoreError> {
        if collection == collections::WORKER_PROFILES {
            return Err(StoreError::Timeout);
        }
        self.inner.list(collection, queries)
    }

    fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        if collection == collections::WORKER_PROFILES {
            return Err(StoreError::Timeout);
        }
        self.inner.get(collection, id)
    }

    fn create(
        &self,
        collection: &str,
        id: Option<&str>,
        data: Document,
    ) -> Result<Document, StoreError> {
        self.inner.create(collection, id, data)
    }

    fn update(&self, collection: &str, id: &str, data: Document) -> Result<Document, StoreError> {
        self.inner.update(collection, id, data)
    }

    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.inner.delete(collection, id)
    }
}
