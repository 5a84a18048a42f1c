use crate::Photo;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct GalleryPhotosParams {
    /// Restrict to one city (case-insensitive). Blank means no filter.
    pub city: Option<String>,
}

impl GalleryPhotosParams {
    /// The trimmed city filter, if any.
    #[must_use]
    pub fn city_filter(&self) -> Option<&str> {
        self.city.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GalleryStats {
    pub total: usize,
    pub featured: usize,
    pub latest: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GalleryPhotosResponse {
    pub photos: Vec<Photo>,
    pub stats: GalleryStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CitiesResponse {
    pub cities: Vec<String>,
}
