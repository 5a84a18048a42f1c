use app_state::GallerySettings;
use axum::extract::FromRef;
use common_services::storage::R2Client;
use sqlx::PgPool;

#[derive(Clone)]
pub struct ApiState {
    pub pool: PgPool,
    pub storage: R2Client,
    pub gallery: GallerySettings,
}

impl FromRef<ApiState> for PgPool {
    fn from_ref(state: &ApiState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<ApiState> for R2Client {
    fn from_ref(state: &ApiState) -> Self {
        state.storage.clone()
    }
}

impl FromRef<ApiState> for GallerySettings {
    fn from_ref(state: &ApiState) -> Self {
        state.gallery.clone()
    }
}
