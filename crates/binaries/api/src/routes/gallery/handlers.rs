use app_state::GallerySettings;
use axum::Json;
use axum::extract::{Query, State};
use common_services::api::cities::error::CitiesError;
use common_services::api::cities::service::list_cities;
use common_services::api::gallery::error::GalleryError;
use common_services::api::gallery::service::gallery_photos;
use common_types::countries::{self, Country};
use common_types::{CitiesResponse, GalleryPhotosParams, GalleryPhotosResponse};
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::IntoParams;

/// List the cities that have approved photos.
#[utoipa::path(
    get,
    path = "/api/cities",
    tag = "Gallery",
    responses(
        (status = 200, description = "Distinct cities, sorted.", body = CitiesResponse),
        (status = 500, description = "The cities could not be loaded."),
    )
)]
pub async fn get_cities_handler(
    State(pool): State<PgPool>,
) -> Result<Json<CitiesResponse>, CitiesError> {
    Ok(Json(list_cities(&pool).await?))
}

/// Photos for the gallery.
///
/// Without a city: featured photos topped up with the latest ones. With a
/// city: the newest photos from that city.
#[utoipa::path(
    get,
    path = "/api/gallery-photos",
    tag = "Gallery",
    params(GalleryPhotosParams),
    responses(
        (status = 200, description = "Photos and counts.", body = GalleryPhotosResponse),
        (status = 500, description = "The photos could not be loaded."),
    )
)]
pub async fn get_gallery_photos_handler(
    State(pool): State<PgPool>,
    State(settings): State<GallerySettings>,
    Query(params): Query<GalleryPhotosParams>,
) -> Result<Json<GalleryPhotosResponse>, GalleryError> {
    let response = gallery_photos(&pool, &settings, params.city_filter()).await?;
    Ok(Json(response))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CountriesQuery {
    /// Case-insensitive match on name, local name or ISO code.
    pub search: Option<String>,
}

/// Bundled country reference data for the country picker.
#[utoipa::path(
    get,
    path = "/api/countries",
    tag = "Gallery",
    params(CountriesQuery),
    responses(
        (status = 200, description = "Matching countries in table order.", body = Vec<Country>),
    )
)]
pub async fn get_countries_handler(Query(query): Query<CountriesQuery>) -> Json<Vec<Country>> {
    let matches = countries::search(query.search.as_deref().unwrap_or_default());
    Json(matches.into_iter().copied().collect())
}
