use async_trait::async_trait;

use crate::application::error::ApplicationError;

#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub secure_url: String,
    pub public_id: String,
}

/// Object storage for product images.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Uploads raw image bytes into the given folder and returns the public
    /// URL plus the provider id needed to delete it later.
    async fn upload_image(
        &self,
        data: Vec<u8>,
        folder: &str,
    ) -> Result<UploadedImage, ApplicationError>;

    async fn delete_image(&self, public_id: &str) -> Result<(), ApplicationError>;
}
