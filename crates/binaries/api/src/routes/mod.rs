pub mod gallery;
pub mod root;
pub mod scalar_config;
pub mod submissions;

use crate::api_state::ApiState;
use crate::gallery::router::gallery_public_router;
use crate::root::router::root_public_router;
use crate::scalar_config::get_custom_html;
use crate::submissions::router::submissions_public_router;
use axum::Router;
use tower_http::{LatencyUnit, trace::TraceLayer};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

// --- API Documentation ---
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Places Gallery API",
        description = "Browse and submit photos of meaningful places."
    ),
    paths(
        root::handlers::root,
        root::handlers::health,
        // Gallery handlers
        gallery::handlers::get_cities_handler,
        gallery::handlers::get_gallery_photos_handler,
        gallery::handlers::get_countries_handler,
        // Submission handlers
        submissions::handlers::post_upload_url_handler,
        submissions::handlers::post_submission_handler,
        submissions::handlers::patch_submission_email_handler,
    ),
    components(
        schemas(
            common_types::Photo,
            common_types::GalleryStats,
            common_types::GalleryPhotosResponse,
            common_types::CitiesResponse,
            common_types::UploadUrlRequest,
            common_types::UploadUrlResponse,
            common_types::NewSubmission,
            common_types::CreateSubmissionResponse,
            common_types::AttachEmailRequest,
            common_types::countries::Country,
            common_types::countries::Region,
        ),
    ),
    tags(
        (name = "Places", description = "Meaningful places gallery API"),
        (name = "Gallery", description = "Browsing approved photos"),
        (name = "Submissions", description = "Uploading and submitting a place")
    )
)]
struct ApiDoc;

// --- Router Construction ---
pub fn create_router(state: ApiState) -> Router {
    let openapi = ApiDoc::openapi();
    let docs = match get_custom_html(&openapi) {
        Ok(html) => Scalar::with_url("/docs", openapi).custom_html(html),
        Err(e) => {
            warn!("Falling back to the default docs page: {e}");
            Scalar::with_url("/docs", openapi)
        }
    };

    Router::new()
        .merge(docs)
        .merge(root_public_router())
        .merge(gallery_public_router())
        .merge(submissions_public_router())
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().on_response(
                tower_http::trace::DefaultOnResponse::new()
                    .level(tracing::Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
        )
}
