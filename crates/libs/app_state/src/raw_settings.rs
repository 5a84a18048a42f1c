use serde::Deserialize;

/// Settings exactly as they appear in `config/settings.yaml` (after env overrides).
#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub database: DatabaseSettings,
    pub storage: RawStorageSettings,
    pub gallery: GallerySettings,
    pub secrets: SecretSettings,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// Default `EnvFilter` directive, used when `RUST_LOG` is not set.
    pub level: String,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    pub allowed_origins: Vec<String>,
    pub public_url: String,
}

/// Database connection pool configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub max_connections: u32,
    pub min_connection: u32,
    pub max_lifetime: u64,
    pub idle_timeout: u64,
    pub acquire_timeout: u64,
}

/// Object storage (Cloudflare R2) configuration, before normalisation.
#[derive(Debug, Deserialize, Clone)]
pub struct RawStorageSettings {
    pub account_id: String,
    pub bucket: String,
    /// Public base URL the bucket is served from, e.g. `https://assets.example.com`.
    pub public_url: String,
    /// Folder inside the bucket new uploads land in.
    pub key_prefix: String,
    pub upload_expiry_secs: u64,
    pub region: String,
    /// Overrides `https://{account_id}.r2.cloudflarestorage.com`. Mostly for local S3 emulators.
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Sizes of the photo sets the gallery endpoint returns.
#[derive(Debug, Deserialize, Clone)]
pub struct GallerySettings {
    pub target_total: i64,
    pub target_featured: i64,
    pub city_limit: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub database_url: String,
    pub r2_access_key_id: String,
    pub r2_secret_access_key: String,
}
