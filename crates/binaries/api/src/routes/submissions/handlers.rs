use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common_services::api::submissions::error::SubmissionError;
use common_services::api::submissions::service::{attach_email, create_submission};
use common_services::api::upload::error::UploadError;
use common_services::api::upload::service::issue_upload_url;
use common_services::storage::R2Client;
use common_types::{
    AttachEmailRequest, CreateSubmissionResponse, NewSubmission, UploadUrlRequest,
    UploadUrlResponse,
};
use sqlx::PgPool;
use uuid::Uuid;

/// Get a presigned URL to upload a photo straight to object storage.
///
/// The browser must `PUT` the file with the same `Content-Type` it declared here.
#[utoipa::path(
    post,
    path = "/api/upload-url",
    tag = "Submissions",
    request_body = UploadUrlRequest,
    responses(
        (status = 200, description = "Upload slot issued.", body = UploadUrlResponse),
        (status = 400, description = "Missing fields, malformed body or not an image."),
        (status = 500, description = "The upload URL could not be generated."),
    )
)]
pub async fn post_upload_url_handler(
    State(storage): State<R2Client>,
    payload: Result<Json<UploadUrlRequest>, JsonRejection>,
) -> Result<Json<UploadUrlResponse>, UploadError> {
    let Json(payload) = payload?;
    Ok(Json(issue_upload_url(&storage, payload)?))
}

/// Store a new place submission. Email is attached separately.
#[utoipa::path(
    post,
    path = "/api/submissions",
    tag = "Submissions",
    request_body = NewSubmission,
    responses(
        (status = 201, description = "Submission stored.", body = CreateSubmissionResponse),
        (status = 400, description = "A required field is missing or invalid."),
        (status = 500, description = "A database error occurred."),
    )
)]
pub async fn post_submission_handler(
    State(pool): State<PgPool>,
    payload: Result<Json<NewSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateSubmissionResponse>), SubmissionError> {
    let Json(payload) = payload?;
    let created = create_submission(&pool, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Attach a contact email to a submission.
#[utoipa::path(
    patch,
    path = "/api/submissions/{submission_id}/email",
    tag = "Submissions",
    params(
        ("submission_id" = Uuid, Path, description = "Id returned when the submission was stored.")
    ),
    request_body = AttachEmailRequest,
    responses(
        (status = 204, description = "Email saved."),
        (status = 400, description = "Not a valid email address."),
        (status = 404, description = "No such submission."),
        (status = 500, description = "A database error occurred."),
    )
)]
pub async fn patch_submission_email_handler(
    State(pool): State<PgPool>,
    Path(submission_id): Path<Uuid>,
    payload: Result<Json<AttachEmailRequest>, JsonRejection>,
) -> Result<StatusCode, SubmissionError> {
    let Json(payload) = payload?;
    attach_email(&pool, submission_id, &payload.email).await?;
    Ok(StatusCode::NO_CONTENT)
}
