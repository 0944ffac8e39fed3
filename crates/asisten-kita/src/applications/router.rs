use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::store_error_response;
use crate::search::DEFAULT_PAGE_SIZE;
use crate::store::DocumentStore;

use super::domain::NewApplication;
use super::service::{ApplicationError, ApplicationService};

/// Router builder exposing the application lifecycle endpoints.
pub fn application_router<S>(service: Arc<ApplicationService<S>>) -> Router
where
    S: DocumentStore + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(apply_handler::<S>))
        .route("/api/v1/applications/check", get(check_handler::<S>))
        .route(
            "/api/v1/applications/:application_id/accept",
            post(accept_handler::<S>),
        )
        .route(
            "/api/v1/applications/:application_id/reject",
            post(reject_handler::<S>),
        )
        .route(
            "/api/v1/applications/:application_id/withdraw",
            post(withdraw_handler::<S>),
        )
        .route(
            "/api/v1/workers/:worker_id/applications",
            get(worker_applications_handler::<S>),
        )
        .route(
            "/api/v1/lowongan/:lowongan_id/applications",
            get(job_applications_handler::<S>),
        )
        .route(
            "/api/v1/lowongan/:lowongan_id/applicants",
            get(job_applicants_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckParams {
    pub(crate) lowongan_id: String,
    pub(crate) art_user_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageParams {
    #[serde(default = "default_limit")]
    pub(crate) limit: usize,
    #[serde(default)]
    pub(crate) offset: usize,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_SIZE
}

pub(crate) async fn apply_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    axum::Json(input): axum::Json<NewApplication>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.apply(input) {
        Ok(application) => (StatusCode::CREATED, axum::Json(application)).into_response(),
        Err(ApplicationError::AlreadyApplied) => {
            let payload = json!({ "error": "Anda sudah melamar lowongan ini." });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(error) => application_error_response(error),
    }
}

pub(crate) async fn check_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    Query(params): Query<CheckParams>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.check_existing(&params.lowongan_id, &params.art_user_id) {
        Ok(existing) => {
            let payload = json!({
                "applied": existing.is_some(),
                "application": existing,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => application_error_response(error),
    }
}

pub(crate) async fn accept_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    Path(application_id): Path<String>,
) -> Response
where
    S: DocumentStore + 'static,
{
    transition_response(service.accept(&application_id))
}

pub(crate) async fn reject_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    Path(application_id): Path<String>,
) -> Response
where
    S: DocumentStore + 'static,
{
    transition_response(service.reject(&application_id))
}

pub(crate) async fn withdraw_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    Path(application_id): Path<String>,
) -> Response
where
    S: DocumentStore + 'static,
{
    transition_response(service.withdraw(&application_id))
}

pub(crate) async fn worker_applications_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    Path(worker_id): Path<String>,
    Query(page): Query<PageParams>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.list_for_worker(&worker_id, page.limit, page.offset) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(error) => application_error_response(error),
    }
}

pub(crate) async fn job_applications_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    Path(lowongan_id): Path<String>,
    Query(page): Query<PageParams>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.list_for_job(&lowongan_id, page.limit, page.offset) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(error) => application_error_response(error),
    }
}

pub(crate) async fn job_applicants_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    Path(lowongan_id): Path<String>,
    Query(page): Query<PageParams>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.list_for_job_with_profiles(&lowongan_id, page.limit, page.offset) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(error) => application_error_response(error),
    }
}

fn transition_response(result: Result<super::domain::Application, ApplicationError>) -> Response {
    match result {
        Ok(application) => (StatusCode::OK, axum::Json(application)).into_response(),
        Err(error) => application_error_response(error),
    }
}

fn application_error_response(error: ApplicationError) -> Response {
    match error {
        ApplicationError::AlreadyApplied => (
            StatusCode::CONFLICT,
            axum::Json(json!({ "error": "Anda sudah melamar lowongan ini." })),
        )
            .into_response(),
        ApplicationError::MissingReference => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
        ApplicationError::InvalidTransition { .. } => (
            StatusCode::CONFLICT,
            axum::Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
        ApplicationError::Store(err) => store_error_response(&err),
        ApplicationError::Malformed { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
    }
}
