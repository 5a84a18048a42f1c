use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common_types::{GalleryPhotosResponse, Photo};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("database error: {0}")]
    Database(#[from] DbError),
}

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        error!("Gallery photos fetch error: {}", self);

        let empty = GalleryPhotosResponse::default();
        let body = Json(json!({
            "error": "Failed to fetch gallery photos",
            "photos": Vec::<Photo>::new(),
            "stats": empty.stats,
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
