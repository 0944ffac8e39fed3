use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use crate::error::store_error_response;
use crate::search::{SearchParams, WorkerFilters};
use crate::store::DocumentStore;

use super::domain::NewWorkerProfile;
use super::service::{DirectoryError, WorkerDirectoryService};

/// Router builder exposing the worker directory endpoints.
pub fn worker_router<S>(service: Arc<WorkerDirectoryService<S>>) -> Router
where
    S: DocumentStore + 'static,
{
    Router::new()
        .route("/api/v1/workers/search", post(search_handler::<S>))
        .route("/api/v1/workers", post(register_handler::<S>))
        .route(
            "/api/v1/workers/:worker_id",
            get(detail_handler::<S>).put(update_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn search_handler<S>(
    State(service): State<Arc<WorkerDirectoryService<S>>>,
    axum::Json(params): axum::Json<SearchParams<WorkerFilters>>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.search(&params) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(error) => directory_error_response(error),
    }
}

pub(crate) async fn register_handler<S>(
    State(service): State<Arc<WorkerDirectoryService<S>>>,
    axum::Json(profile): axum::Json<NewWorkerProfile>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.register(profile) {
        Ok(created) => (StatusCode::CREATED, axum::Json(created)).into_response(),
        Err(error) => directory_error_response(error),
    }
}

pub(crate) async fn update_handler<S>(
    State(service): State<Arc<WorkerDirectoryService<S>>>,
    Path(worker_id): Path<String>,
    axum::Json(profile): axum::Json<NewWorkerProfile>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.update_profile(&worker_id, profile) {
        Ok(updated) => (StatusCode::OK, axum::Json(updated)).into_response(),
        Err(error) => directory_error_response(error),
    }
}

pub(crate) async fn detail_handler<S>(
    State(service): State<Arc<WorkerDirectoryService<S>>>,
    Path(worker_id): Path<String>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.get(&worker_id) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => directory_error_response(error),
    }
}

fn directory_error_response(error: DirectoryError) -> Response {
    match error {
        DirectoryError::Rule(violation) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(json!({ "error": violation.to_string() })),
        )
            .into_response(),
        DirectoryError::Store(err) => store_error_response(&err),
        DirectoryError::Malformed { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
    }
}
