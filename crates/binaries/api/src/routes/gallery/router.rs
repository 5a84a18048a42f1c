use crate::api_state::ApiState;
use crate::gallery::handlers::{
    get_cities_handler, get_countries_handler, get_gallery_photos_handler,
};
use axum::{Router, routing::get};

pub fn gallery_public_router() -> Router<ApiState> {
    Router::new()
        .route("/api/cities", get(get_cities_handler))
        .route("/api/gallery-photos", get(get_gallery_photos_handler))
        .route("/api/countries", get(get_countries_handler))
}
