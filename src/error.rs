use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::validation::FieldErrors;

/// Process-wide error surface for the HTTP handlers. Distinguished
/// errors carry their own status code and message; anything else is
/// collapsed into a generic 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("validation failed")]
    Validation(FieldErrors),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

#[derive(Debug, Serialize)]
struct ValidationErrorBody {
    status: &'static str,
    code: &'static str,
    details: FieldErrors,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorBody {
                    status: "error",
                    code: "VALIDATION_ERROR",
                    details,
                }),
            )
                .into_response(),
            ApiError::Internal(err) => {
                error!(error = %err, "unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn status_and_body(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_carries_status_and_message() {
        let (status, body) = status_and_body(ApiError::NotFound("id not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "id not found");
    }

    #[tokio::test]
    async fn validation_body_shape() {
        let mut errors = FieldErrors::default();
        errors.push("email", "must be a valid email address");

        let (status, body) = status_and_body(ApiError::Validation(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["email"][0], "must be a valid email address");
    }

    #[tokio::test]
    async fn other_failures_are_a_generic_500() {
        let err = ApiError::from(anyhow::anyhow!("connection refused"));
        let (status, body) = status_and_body(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "internal server error");
    }
}
