use crate::api_state::ApiState;
use crate::submissions::handlers::{
    patch_submission_email_handler, post_submission_handler, post_upload_url_handler,
};
use axum::{
    Router,
    routing::{patch, post},
};

pub fn submissions_public_router() -> Router<ApiState> {
    Router::new()
        .route("/api/upload-url", post(post_upload_url_handler))
        .route("/api/submissions", post(post_submission_handler))
        .route(
            "/api/submissions/{submission_id}/email",
            patch(patch_submission_email_handler),
        )
}
