use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::http::{build_client, describe_failure};

const CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com/v1_1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum CloudinaryError {
    #[error("Upload failed: {0}")]
    RequestFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Upload rejected: {0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudinaryError>;

/// Unsigned uploads against a Cloudinary upload preset
pub struct CloudinaryClient {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
}

impl CloudinaryClient {
    pub fn new(cloud_name: &str, upload_preset: &str) -> Result<Self> {
        Self::with_base_url(CLOUDINARY_API_BASE, cloud_name, upload_preset, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_base_url(
        api_url: &str,
        cloud_name: &str,
        upload_preset: &str,
        timeout_secs: u64,
    ) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout_secs)?,
            upload_url: format!(
                "{}/{}/image/upload",
                api_url.trim_end_matches('/'),
                urlencoding::encode(cloud_name)
            ),
            upload_preset: upload_preset.to_string(),
        })
    }

    /// Upload one image and return what the host tells us about it
    pub async fn upload(
        &self,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse> {
        debug!("Uploading {} ({} bytes) to {}", file_name, bytes.len(), self.upload_url);

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self.client.post(&self.upload_url).multipart(form).send().await?;
        let status = response.status();

        if status == 429 {
            return Err(CloudinaryError::RateLimitExceeded);
        }

        if status == 400 {
            return Err(CloudinaryError::Rejected(describe_failure(response).await));
        }

        if !status.is_success() {
            return Err(CloudinaryError::RequestFailed(describe_failure(response).await));
        }

        let uploaded: UploadResponse = response.json().await?;
        debug!("Uploaded {} -> {}", file_name, uploaded.secure_url);
        Ok(uploaded)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub secure_url: String,
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub bytes: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_url_includes_cloud_name() {
        let client = CloudinaryClient::with_base_url("http://localhost:1/v1_1/", "demo", "default", 5)
            .unwrap();
        assert_eq!(client.upload_url, "http://localhost:1/v1_1/demo/image/upload");
        assert_eq!(client.upload_preset, "default");
    }

    #[test]
    fn test_upload_response_ignores_extra_fields() {
        let response: UploadResponse = serde_json::from_str(
            r#"{"secure_url": "https://res.cloudinary.com/demo/a.png", "width": 10, "format": "png"}"#,
        )
        .unwrap();
        assert_eq!(response.secure_url, "https://res.cloudinary.com/demo/a.png");
        assert!(response.public_id.is_none());
    }
}
