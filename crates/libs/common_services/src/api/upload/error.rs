use crate::storage::StorageError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid request body: {}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    #[error("fileName and fileType are required")]
    MissingFields,

    #[error("Only image files are allowed (JPEG, PNG, WebP, HEIC)")]
    UnsupportedType(String),

    #[error("storage credentials are not configured")]
    NotConfigured,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidBody(rejection) => (rejection.status(), self.to_string()),
            Self::MissingFields => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::UnsupportedType(file_type) => {
                warn!("Rejected upload of type {file_type}");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            Self::NotConfigured | Self::Storage(_) => {
                error!("Upload URL error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate upload URL".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
