use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Moderation state of a submission. Only `Approved` rows are public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "submission_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

/// Corresponds to the '`place_submissions`' table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PlaceSubmission {
    pub id: Uuid,
    pub place_name: String,
    pub city: String,
    pub country: String,
    /// Author display name.
    pub name: Option<String>,
    pub why_special: Option<String>,
    pub photo_url: String,
    /// Attached after the initial insert, if at all.
    pub email: Option<String>,
    pub is_featured: bool,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
}

/// Everything the wizard knows when the photo step persists a row.
/// Email is deliberately absent; it is patched in afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub place_name: String,
    pub city: String,
    pub country: String,
    pub name: Option<String>,
    pub why_special: Option<String>,
    pub photo_url: String,
}

impl NewSubmission {
    /// Names of required fields that are blank, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("placeName", &self.place_name),
            ("city", &self.city),
            ("country", &self.country),
            ("photoUrl", &self.photo_url),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Trims every field and turns blank optional fields into `None`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let optional = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            place_name: self.place_name.trim().to_string(),
            city: self.city.trim().to_string(),
            country: self.country.trim().to_string(),
            name: optional(self.name),
            why_special: optional(self.why_special),
            photo_url: self.photo_url.trim().to_string(),
        }
    }
}
