use crate::api::upload::error::UploadError;
use crate::storage::R2Client;
use app_state::is_allowed_image_type;
use common_types::{UploadUrlRequest, UploadUrlResponse};
use tracing::{info, instrument};

/// Validates an upload request and hands out a presigned PUT URL.
#[instrument(skip(r2))]
pub fn issue_upload_url(
    r2: &R2Client,
    request: UploadUrlRequest,
) -> Result<UploadUrlResponse, UploadError> {
    let (Some(file_name), Some(file_type)) = (
        request.file_name.filter(|n| !n.trim().is_empty()),
        request.file_type.filter(|t| !t.trim().is_empty()),
    ) else {
        return Err(UploadError::MissingFields);
    };

    if !is_allowed_image_type(&file_type) {
        return Err(UploadError::UnsupportedType(file_type));
    }

    let credentials = &r2.config().credentials;
    if credentials.access_key_id.is_empty() || credentials.secret_access_key.is_empty() {
        return Err(UploadError::NotConfigured);
    }

    let response = r2.issue_upload(&file_name, &file_type)?;
    info!("Issued upload for {}", response.key);
    Ok(response)
}
