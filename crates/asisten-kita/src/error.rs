use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::config::ConfigError;
use crate::store::StoreError;
use crate::telemetry::TelemetryError;

/// Top-level failure for the service binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Store(err) => (store_status(err), err.user_message().to_string()),
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

/// Fixed category-to-status table for failures coming back from the store.
pub fn store_status(error: &StoreError) -> StatusCode {
    match error {
        StoreError::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
        StoreError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        StoreError::Unauthorized => StatusCode::UNAUTHORIZED,
        StoreError::Forbidden => StatusCode::FORBIDDEN,
        StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        StoreError::Conflict => StatusCode::CONFLICT,
        StoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        StoreError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON error response carrying the localized user-facing message for a
/// store failure. Routers use this for every transport-level error so the
/// UI never has to translate raw store output.
pub fn store_error_response(error: &StoreError) -> Response {
    (
        store_status(error),
        Json(json!({ "error": error.user_message() })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_categories_map_to_expected_statuses() {
        assert_eq!(
            store_status(&StoreError::Network("dns".to_string())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(store_status(&StoreError::Timeout), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            store_status(&StoreError::Unauthorized),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(store_status(&StoreError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            store_status(&StoreError::NotFound {
                collection: "lowongan".to_string(),
                id: "x".to_string()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(store_status(&StoreError::Conflict), StatusCode::CONFLICT);
        assert_eq!(
            store_status(&StoreError::Validation("bad".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            store_status(&StoreError::Server("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
