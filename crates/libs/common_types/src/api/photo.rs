use crate::PlaceSubmission;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A photo as the gallery consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: Uuid,
    /// Original asset URL in object storage.
    pub url: String,
    pub place_name: String,
    pub city: String,
    pub country: String,
    /// The story, or "{place} in {city}, {country}" when there is none.
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_special: Option<String>,
    pub author_name: Option<String>,
    pub is_featured: bool,
    pub submitted_at: DateTime<Utc>,
}

impl From<PlaceSubmission> for Photo {
    fn from(row: PlaceSubmission) -> Self {
        let why_special = row.why_special.filter(|s| !s.is_empty());
        let description = why_special.clone().unwrap_or_else(|| {
            format!("{} in {}, {}", row.place_name, row.city, row.country)
        });
        Self {
            id: row.id,
            url: row.photo_url,
            place_name: row.place_name,
            city: row.city,
            country: row.country,
            description,
            why_special,
            author_name: row.name.filter(|s| !s.is_empty()),
            is_featured: row.is_featured,
            submitted_at: row.submitted_at,
        }
    }
}
