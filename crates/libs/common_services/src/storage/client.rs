use super::error::StorageError;
use super::object_key::{object_key, random_suffix};
use super::presign::{PresignRequest, SigningCredentials, presigned_query, uri_encode};
use app_state::{SecretSettings, StorageSettings};
use chrono::{DateTime, Utc};
use common_types::UploadUrlResponse;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Resolved storage configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub endpoint: Url,
    pub bucket: String,
    pub public_url: String,
    pub key_prefix: String,
    pub upload_expiry: Duration,
    pub region: String,
    pub credentials: SigningCredentials,
}

impl StorageConfig {
    pub fn from_settings(
        storage: &StorageSettings,
        secrets: &SecretSettings,
    ) -> Result<Self, StorageError> {
        let endpoint: Url = storage.endpoint.parse()?;
        if endpoint.host_str().is_none() {
            return Err(StorageError::MissingHost(storage.endpoint.clone()));
        }
        Ok(Self {
            endpoint,
            bucket: storage.bucket.clone(),
            public_url: storage.public_url.clone(),
            key_prefix: storage.key_prefix.clone(),
            upload_expiry: Duration::from_secs(storage.upload_expiry_secs),
            region: storage.region.clone(),
            credentials: SigningCredentials {
                access_key_id: secrets.r2_access_key_id.clone(),
                secret_access_key: secrets.r2_secret_access_key.clone(),
            },
        })
    }
}

/// S3-compatible client for the R2 bucket holding gallery photos.
///
/// Browsers upload straight to the bucket through presigned URLs; the
/// server only signs. `put_object` exists for maintenance tasks.
#[derive(Clone)]
pub struct R2Client {
    http_client: Client,
    config: Arc<StorageConfig>,
}

impl R2Client {
    #[must_use]
    pub fn new(config: StorageConfig, http_client: Client) -> Self {
        Self {
            http_client,
            config: Arc::new(config),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// `host[:port]` as it will appear in the `Host` header.
    fn host(&self) -> String {
        let host = self.config.endpoint.host_str().unwrap_or_default();
        match self.config.endpoint.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    /// Path-style object path, URI-encoded: `/{bucket}/{key}`.
    fn object_path(&self, key: &str) -> String {
        let base = self.config.endpoint.path().trim_end_matches('/');
        format!(
            "{base}/{}/{}",
            uri_encode(&self.config.bucket, true),
            uri_encode(key, false)
        )
    }

    /// Fresh object key for an upload of `file_name`.
    #[must_use]
    pub fn new_object_key(&self, file_name: &str) -> String {
        object_key(
            &self.config.key_prefix,
            file_name,
            Utc::now().timestamp_millis(),
            &random_suffix(),
        )
    }

    /// Where an object is publicly readable once uploaded.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.config.public_url)
    }

    /// Presigned PUT URL for `key`; the uploader must send the same `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Signing`] if the request cannot be signed.
    pub fn presign_put(&self, key: &str, content_type: &str) -> Result<String, StorageError> {
        self.presign_put_at(key, content_type, Utc::now())
    }

    /// Like [`Self::presign_put`] with a fixed clock.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Signing`] if the request cannot be signed.
    pub fn presign_put_at(
        &self,
        key: &str,
        content_type: &str,
        now: DateTime<Utc>,
    ) -> Result<String, StorageError> {
        let host = self.host();
        let path = self.object_path(key);
        let headers = [("content-type", content_type)];
        let request = PresignRequest {
            method: "PUT",
            host: &host,
            path: &path,
            region: &self.config.region,
            service: "s3",
            headers: &headers,
            expires: self.config.upload_expiry,
            timestamp: now,
        };
        let query = presigned_query(&self.config.credentials, &request)
            .map_err(|e| StorageError::Signing(e.to_string()))?;
        Ok(format!(
            "{}://{host}{path}?{query}",
            self.config.endpoint.scheme()
        ))
    }

    /// Generates a key and presigned upload URL for a browser upload.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Signing`] if the URL cannot be signed.
    #[instrument(skip(self))]
    pub fn issue_upload(
        &self,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadUrlResponse, StorageError> {
        let key = self.new_object_key(file_name);
        let upload_url = self.presign_put(&key, content_type)?;
        debug!("Issued upload url for {key}");
        Ok(UploadUrlResponse {
            upload_url,
            public_url: self.public_url(&key),
            key,
        })
    }

    /// Uploads bytes from the server itself and returns the public URL.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn put_object(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        let issued = self.issue_upload(file_name, content_type)?;
        let response = self
            .http_client
            .put(&issued.upload_url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Remote { status, body });
        }

        Ok(issued.public_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn client(endpoint: &str) -> R2Client {
        let config = StorageConfig {
            endpoint: endpoint.parse().expect("valid endpoint"),
            bucket: "wayo-gallery".to_string(),
            public_url: "https://assets.example.com".to_string(),
            key_prefix: "gallery".to_string(),
            upload_expiry: Duration::from_secs(300),
            region: "auto".to_string(),
            credentials: SigningCredentials {
                access_key_id: "key-id".to_string(),
                secret_access_key: "secret".to_string(),
            },
        };
        R2Client::new(config, Client::new())
    }

    #[test]
    fn presigned_put_is_path_style() -> color_eyre::Result<()> {
        let r2 = client("https://acc.r2.cloudflarestorage.com");
        let now = Utc
            .with_ymd_and_hms(2025, 11, 20, 8, 30, 0)
            .single()
            .expect("valid date");
        let url = r2.presign_put_at("gallery/1-abc-my place.jpg", "image/jpeg", now)?;

        assert!(url.starts_with(
            "https://acc.r2.cloudflarestorage.com/wayo-gallery/gallery/1-abc-my%20place.jpg?"
        ));
        assert!(url.contains("X-Amz-Credential=key-id%2F20251120%2Fauto%2Fs3%2Faws4_request"));
        assert!(url.contains("X-Amz-Date=20251120T083000Z"));
        assert!(url.contains("X-Amz-Expires=300"));
        assert!(url.contains("X-Amz-SignedHeaders=content-type%3Bhost"));
        assert!(url.contains("&X-Amz-Signature="));

        // Deterministic for a fixed clock.
        assert_eq!(
            url,
            r2.presign_put_at("gallery/1-abc-my place.jpg", "image/jpeg", now)?
        );
        assert_ne!(
            url,
            r2.presign_put_at("gallery/1-abc-my place.jpg", "image/png", now)?
        );
        Ok(())
    }

    #[test]
    fn custom_endpoint_keeps_port() -> color_eyre::Result<()> {
        let r2 = client("http://localhost:9000");
        let url = r2.presign_put("gallery/a.png", "image/png")?;
        assert!(url.starts_with("http://localhost:9000/wayo-gallery/gallery/a.png?"));
        Ok(())
    }

    #[test]
    fn issued_upload_points_at_public_url() -> color_eyre::Result<()> {
        let r2 = client("https://acc.r2.cloudflarestorage.com");
        let issued = r2.issue_upload("seoul.jpg", "image/jpeg")?;
        assert!(issued.key.starts_with("gallery/"));
        assert!(issued.key.ends_with("-seoul.jpg"));
        assert_eq!(
            issued.public_url,
            format!("https://assets.example.com/{}", issued.key)
        );
        Ok(())
    }
}
