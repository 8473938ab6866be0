use thiserror::Error;

/// Error for OwnerId conversion failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OwnerIdError {
    #[error("Owner ID must be greater than zero, got {0}")]
    NotPositive(i64),
}

/// Error for uploads rejected before anything is written
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Missing multipart field: {0}")]
    MissingField(&'static str),

    #[error("Content type is not an image: {0}")]
    NotAnImage(String),

    #[error("Image has no content")]
    Empty,

    #[error("Malformed multipart body: {0}")]
    Multipart(String),
}

/// Top-level error for image operations
#[derive(Debug, Clone, Error)]
pub enum ImageError {
    // Client input errors
    #[error("No image is present: {0}")]
    InvalidUpload(#[from] UploadError),

    // Infrastructure errors
    #[error("Invalid owner ID: {0}")]
    InvalidOwnerId(#[from] OwnerIdError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(String),
}
