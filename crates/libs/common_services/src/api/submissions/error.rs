use crate::database::DbError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Invalid request body: {}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("photoUrl must be an http(s) URL")]
    InvalidPhotoUrl(String),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Submission {0} not found")]
    NotFound(Uuid),

    #[error("database error: {0}")]
    Database(#[from] DbError),
}

impl IntoResponse for SubmissionError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidBody(rejection) => (rejection.status(), self.to_string()),
            Self::MissingFields(_) | Self::InvalidEmail => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            Self::InvalidPhotoUrl(url) => {
                warn!("Rejected submission photo url {url}");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            Self::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Self::Database(_) => {
                error!("Submission error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to save submission".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
