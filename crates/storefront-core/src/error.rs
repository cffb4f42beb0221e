use serde::Serialize;
use thiserror::Error;

/// Everything that can go wrong below the store boundary.
///
/// These carry the full story for logs. The view never sees them; the store
/// folds each one into a [`FailureReason`] first.
#[derive(Error, Debug)]
pub enum Error {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Unknown catalog source: {0}")]
    InvalidRoute(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Cannot upload {name}: {reason}")]
    InvalidUpload { name: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn field(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Short, machine-usable failure reason exposed to the view layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureReason {
    FetchFailed,
    UploadFailedThumbnail,
    UploadFailedImages,
    WriteFailed,
    InvalidRoute,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::FetchFailed => "FETCH_FAILED",
            FailureReason::UploadFailedThumbnail => "UPLOAD_FAILED_THUMBNAIL",
            FailureReason::UploadFailedImages => "UPLOAD_FAILED_IMAGES",
            FailureReason::WriteFailed => "WRITE_FAILED",
            FailureReason::InvalidRoute => "INVALID_ROUTE",
        }
    }

    /// Static user-facing message for this reason
    pub fn message(&self) -> &'static str {
        match self {
            FailureReason::FetchFailed => "Failed to fetch data",
            FailureReason::UploadFailedThumbnail => "Failed to upload thumbnail",
            FailureReason::UploadFailedImages => "Failed to upload images",
            FailureReason::WriteFailed => "Failed to save changes",
            FailureReason::InvalidRoute => "Product not found",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
