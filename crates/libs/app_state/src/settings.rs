use crate::{
    ApiSettings, DatabaseSettings, GallerySettings, LoggingSettings, RawSettings, SecretSettings,
    trim_slashes, trim_trailing_slashes,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub gallery: GallerySettings,
    pub secrets: SecretSettings,
}

/// Normalised storage settings: no trailing slashes, resolved endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub endpoint: String,
    pub bucket: String,
    pub public_url: String,
    pub key_prefix: String,
    pub upload_expiry_secs: u64,
    pub region: String,
}

impl From<RawSettings> for AppSettings {
    fn from(raw: RawSettings) -> Self {
        let endpoint = raw.storage.endpoint.as_deref().map_or_else(
            || format!("https://{}.r2.cloudflarestorage.com", raw.storage.account_id),
            trim_trailing_slashes,
        );
        let storage = StorageSettings {
            endpoint,
            bucket: raw.storage.bucket,
            public_url: trim_trailing_slashes(&raw.storage.public_url),
            key_prefix: trim_slashes(&raw.storage.key_prefix),
            upload_expiry_secs: raw.storage.upload_expiry_secs,
            region: raw.storage.region,
        };

        // A featured set larger than the whole set would make the latest fill negative.
        let gallery = GallerySettings {
            target_featured: raw.gallery.target_featured.min(raw.gallery.target_total),
            ..raw.gallery
        };

        let api = ApiSettings {
            public_url: trim_trailing_slashes(&raw.api.public_url),
            ..raw.api
        };

        Self {
            logging: raw.logging,
            api,
            database: raw.database,
            storage,
            gallery,
            secrets: raw.secrets,
        }
    }
}
