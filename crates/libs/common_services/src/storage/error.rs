use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid storage endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("Storage endpoint has no host: {0}")]
    MissingHost(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Cannot sign storage request: {0}")]
    Signing(String),

    #[error("Storage returned {status}: {body}")]
    Remote { status: u16, body: String },
}
