use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Both fields are optional on the wire so a missing one maps to a 400
/// instead of an extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlRequest {
    pub file_name: Option<String>,
    pub file_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    /// Presigned PUT URL, valid for a few minutes.
    pub upload_url: String,
    /// Where the object is readable once uploaded.
    pub public_url: String,
    pub key: String,
}
