use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::store_error_response;
use crate::search::{ListingFilters, SearchParams};
use crate::store::DocumentStore;

use super::domain::NewPosting;
use super::service::{JobBoardService, ListingError};

/// Router builder exposing the lowongan endpoints.
pub fn listing_router<S>(service: Arc<JobBoardService<S>>) -> Router
where
    S: DocumentStore + 'static,
{
    Router::new()
        .route("/api/v1/lowongan/search", post(search_handler::<S>))
        .route("/api/v1/lowongan", post(create_handler::<S>))
        .route("/api/v1/lowongan/:lowongan_id", get(detail_handler::<S>))
        .route(
            "/api/v1/lowongan/:lowongan_id/publish",
            post(publish_handler::<S>),
        )
        .route(
            "/api/v1/lowongan/:lowongan_id/close",
            post(close_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatePostingRequest {
    pub(crate) user_id: String,
    #[serde(flatten)]
    pub(crate) posting: NewPosting,
}

pub(crate) async fn search_handler<S>(
    State(service): State<Arc<JobBoardService<S>>>,
    axum::Json(params): axum::Json<SearchParams<ListingFilters>>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.search(&params) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(error) => listing_error_response(error),
    }
}

pub(crate) async fn create_handler<S>(
    State(service): State<Arc<JobBoardService<S>>>,
    axum::Json(request): axum::Json<CreatePostingRequest>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.create(&request.user_id, request.posting) {
        Ok(created) => (StatusCode::CREATED, axum::Json(created)).into_response(),
        Err(error) => listing_error_response(error),
    }
}

pub(crate) async fn detail_handler<S>(
    State(service): State<Arc<JobBoardService<S>>>,
    Path(lowongan_id): Path<String>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.get(&lowongan_id) {
        Ok(posting) => {
            service.record_view(&lowongan_id);
            (StatusCode::OK, axum::Json(posting)).into_response()
        }
        Err(error) => listing_error_response(error),
    }
}

pub(crate) async fn publish_handler<S>(
    State(service): State<Arc<JobBoardService<S>>>,
    Path(lowongan_id): Path<String>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.publish(&lowongan_id) {
        Ok(posting) => (StatusCode::OK, axum::Json(posting)).into_response(),
        Err(error) => listing_error_response(error),
    }
}

pub(crate) async fn close_handler<S>(
    State(service): State<Arc<JobBoardService<S>>>,
    Path(lowongan_id): Path<String>,
) -> Response
where
    S: DocumentStore + 'static,
{
    match service.close(&lowongan_id) {
        Ok(posting) => (StatusCode::OK, axum::Json(posting)).into_response(),
        Err(error) => listing_error_response(error),
    }
}

fn listing_error_response(error: ListingError) -> Response {
    match error {
        ListingError::Rule(violation) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(json!({ "error": violation.to_string() })),
        )
            .into_response(),
        ListingError::MissingOwner => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
        ListingError::InvalidStatus { .. } => (
            StatusCode::CONFLICT,
            axum::Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
        ListingError::Store(err) => store_error_response(&err),
        ListingError::Malformed { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
    }
}
