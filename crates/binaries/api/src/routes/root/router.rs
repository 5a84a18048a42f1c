use crate::api_state::ApiState;
use crate::root::handlers::{health, root};
use axum::{Router, routing::get};

pub fn root_public_router() -> Router<ApiState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}
