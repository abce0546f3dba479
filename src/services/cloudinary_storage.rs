use async_trait::async_trait;
use chrono::Utc;
use reqwest::{multipart, Client};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::{
    application::{
        error::ApplicationError,
        services::{ImageStorage, UploadedImage},
    },
    domain::config::secrets::CloudinarySecrets,
    services::error::StorageError,
};

const CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Image storage backed by Cloudinary's HTTP upload API. Requests are
/// authenticated with the api key plus a SHA-256 signature over the sorted
/// request parameters and the api secret.
pub struct CloudinaryStorageService {
    client: Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

impl CloudinaryStorageService {
    pub fn new(secrets: CloudinarySecrets) -> Self {
        Self {
            client: Client::new(),
            cloud_name: secrets.cloud_name,
            api_key: secrets.api_key,
            api_secret: secrets.api_secret,
        }
    }

    /// `params` must already be sorted by key; the signature covers
    /// `k1=v1&k2=v2...` followed by the api secret.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let to_sign = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl ImageStorage for CloudinaryStorageService {
    async fn upload_image(
        &self,
        data: Vec<u8>,
        folder: &str,
    ) -> Result<UploadedImage, ApplicationError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[("folder", folder), ("timestamp", &timestamp)]);

        let file_part = multipart::Part::bytes(data)
            .file_name("upload")
            .mime_str("application/octet-stream")
            .map_err(|e| StorageError::InternalError(e.to_string()))?;

        let form = multipart::Form::new()
            .part("file", file_part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature_algorithm", "sha256".to_string())
            .text("signature", signature);

        let url = format!("{}/{}/image/upload", CLOUDINARY_API_BASE, self.cloud_name);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(StorageError::from)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(
                StorageError::ProviderError(format!("Upload failed: {}", error_text)).into(),
            );
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| StorageError::InternalError(e.to_string()))?;

        Ok(UploadedImage {
            secure_url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }

    async fn delete_image(&self, public_id: &str) -> Result<(), ApplicationError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[("public_id", public_id), ("timestamp", &timestamp)]);

        let url = format!("{}/{}/image/destroy", CLOUDINARY_API_BASE, self.cloud_name);

        let response = self
            .client
            .post(&url)
            .form(&[
                ("public_id", public_id),
                ("api_key", &self.api_key),
                ("timestamp", &timestamp),
                ("signature_algorithm", "sha256"),
                ("signature", &signature),
            ])
            .send()
            .await
            .map_err(StorageError::from)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(
                StorageError::ProviderError(format!("Destroy failed: {}", error_text)).into(),
            );
        }

        let destroyed: DestroyResponse = response
            .json()
            .await
            .map_err(|e| StorageError::InternalError(e.to_string()))?;

        if destroyed.result != "ok" {
            return Err(StorageError::ProviderError(format!(
                "Destroy returned: {}",
                destroyed.result
            ))
            .into());
        }

        Ok(())
    }
}
