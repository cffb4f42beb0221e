// Cloudinary provider - image hosting for new products
use async_trait::async_trait;
use storefront_api::CloudinaryClient;

use crate::{create::UploadFile, sources::AssetUploader, Error, Result};

pub struct CloudinaryUploader {
    client: CloudinaryClient,
}

impl CloudinaryUploader {
    pub fn new(client: CloudinaryClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssetUploader for CloudinaryUploader {
    async fn upload(&self, file: &UploadFile) -> Result<String> {
        let uploaded = self
            .client
            .upload(&file.name, &file.mime_type, file.bytes.clone())
            .await
            .map_err(|e| Error::ApiError(e.to_string()))?;

        Ok(uploaded.secure_url)
    }
}
