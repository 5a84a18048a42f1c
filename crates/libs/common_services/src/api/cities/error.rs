use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum CitiesError {
    #[error("database error: {0}")]
    Database(#[from] DbError),
}

impl IntoResponse for CitiesError {
    fn into_response(self) -> Response {
        error!("Cities fetch error: {}", self);

        let body = Json(json!({
            "error": "Failed to fetch cities",
            "cities": Vec::<String>::new(),
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
