use crate::infra::AppState;
use asisten_kita::applications::{application_router, ApplicationService};
use asisten_kita::directory::{worker_router, WorkerDirectoryService};
use asisten_kita::error::AppError;
use asisten_kita::listings::{listing_router, JobBoardService};
use asisten_kita::store::{collections, DocumentStore, MemoryStore, Predicate};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct OverviewResponse {
    pub(crate) workers: usize,
    pub(crate) lowongan: usize,
    pub(crate) applications: usize,
}

pub(crate) fn with_marketplace_routes<S>(
    workers: Arc<WorkerDirectoryService<S>>,
    listings: Arc<JobBoardService<S>>,
    applications: Arc<ApplicationService<S>>,
) -> axum::Router
where
    S: DocumentStore + 'static,
{
    worker_router(workers)
        .merge(listing_router(listings))
        .merge(application_router(applications))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/overview", axum::routing::get(overview_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn overview_endpoint(
    Extension(store): Extension<Arc<MemoryStore>>,
) -> Result<Json<OverviewResponse>, AppError> {
    let head = [Predicate::limit(1), Predicate::offset(0)];
    let workers = store.list(collections::WORKER_PROFILES, &head)?.total;
    let lowongan = store.list(collections::LOWONGAN, &head)?.total;
    let applications = store.list(collections::APPLICATIONS, &head)?.total;

    Ok(Json(OverviewResponse {
        workers,
        lowongan,
        applications,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::seed_marketplace;

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body.get("status"), Some(&json!("ok")));
    }

    #[tokio::test]
    async fn overview_counts_seeded_collections() {
        let store = Arc::new(MemoryStore::new());
        seed_marketplace(&store).expect("seed succeeds");

        let Json(body) = overview_endpoint(Extension(store))
            .await
            .expect("overview builds");

        assert_eq!(body.workers, 5);
        assert_eq!(body.lowongan, 2);
        assert_eq!(body.applications, 0);
    }
}
