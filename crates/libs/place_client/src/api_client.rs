use async_trait::async_trait;
use common_types::{
    AttachEmailRequest, CitiesResponse, CreateSubmissionResponse, GalleryPhotosResponse,
    NewSubmission, UploadUrlRequest, UploadUrlResponse,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The API answered with an error status and (usually) a message.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("photo upload was rejected with status {0}")]
    Upload(u16),
}

/// A photo picked by the user, ready to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Read side of the API, as the page shell needs it.
#[async_trait]
pub trait GalleryApi: Send + Sync {
    async fn gallery_photos(&self, city: Option<&str>) -> Result<GalleryPhotosResponse, ClientError>;

    async fn cities(&self) -> Result<Vec<String>, ClientError>;
}

/// Write side of the API, as the submission wizard needs it.
#[async_trait]
pub trait SubmissionBackend: Send + Sync {
    /// Uploads the photo and returns its public URL.
    async fn upload_photo(&self, photo: &PhotoFile) -> Result<String, ClientError>;

    async fn insert_submission(&self, submission: &NewSubmission) -> Result<Uuid, ClientError>;

    async fn attach_email(&self, submission_id: Uuid, email: &str) -> Result<(), ClientError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the places API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, http_client: Client) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Presigned upload slot for a file.
    pub async fn request_upload_url(
        &self,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadUrlResponse, ClientError> {
        let request = UploadUrlRequest {
            file_name: Some(file_name.to_string()),
            file_type: Some(content_type.to_string()),
        };
        let response = self
            .http_client
            .post(self.endpoint("api/upload-url")?)
            .json(&request)
            .send()
            .await?;
        parse_json(response).await
    }
}

/// Decodes a success body, or turns an error status into [`ClientError::Api`].
async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = check_status(response).await?;
    Ok(response.json().await?)
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or_else(|_| format!("Request failed with status {}", status.as_u16()));
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl GalleryApi for ApiClient {
    #[instrument(skip(self))]
    async fn gallery_photos(&self, city: Option<&str>) -> Result<GalleryPhotosResponse, ClientError> {
        let mut request = self.http_client.get(self.endpoint("api/gallery-photos")?);
        if let Some(city) = city {
            request = request.query(&[("city", city)]);
        }
        parse_json(request.send().await?).await
    }

    #[instrument(skip(self))]
    async fn cities(&self) -> Result<Vec<String>, ClientError> {
        let response = self
            .http_client
            .get(self.endpoint("api/cities")?)
            .send()
            .await?;
        let body: CitiesResponse = parse_json(response).await?;
        Ok(body.cities)
    }
}

#[async_trait]
impl SubmissionBackend for ApiClient {
    #[instrument(skip(self, photo), fields(file = %photo.file_name, size = photo.bytes.len()))]
    async fn upload_photo(&self, photo: &PhotoFile) -> Result<String, ClientError> {
        let slot = self
            .request_upload_url(&photo.file_name, &photo.content_type)
            .await?;

        let response = self
            .http_client
            .put(&slot.upload_url)
            .header(CONTENT_TYPE, &photo.content_type)
            .body(photo.bytes.clone())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::Upload(response.status().as_u16()));
        }

        debug!("Uploaded photo to {}", slot.public_url);
        Ok(slot.public_url)
    }

    #[instrument(skip(self, submission))]
    async fn insert_submission(&self, submission: &NewSubmission) -> Result<Uuid, ClientError> {
        let response = self
            .http_client
            .post(self.endpoint("api/submissions")?)
            .json(submission)
            .send()
            .await?;
        let body: CreateSubmissionResponse = parse_json(response).await?;
        Ok(body.id)
    }

    #[instrument(skip(self, email))]
    async fn attach_email(&self, submission_id: Uuid, email: &str) -> Result<(), ClientError> {
        let request = AttachEmailRequest {
            email: email.to_string(),
        };
        let response = self
            .http_client
            .patch(self.endpoint(&format!("api/submissions/{submission_id}/email"))?)
            .json(&request)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}
