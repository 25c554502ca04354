use async_trait::async_trait;
use reqwest::{multipart, Client};
use serde::{Deserialize, Serialize};

use crate::application::services::ImageProvider;
use crate::domain::config::provider::{ProviderConfig, ProviderKind};
use crate::domain::models::file::ImageFile;
use crate::domain::models::upload::{UploadOptions, UploadResult};
use crate::services::error::UploadError;
use crate::services::progress::{file_part, UPLOAD_TIMEOUT};

const IMGBB_UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

#[derive(Debug, Deserialize)]
struct ImgBbResponse {
    #[serde(default)]
    success: bool,
    data: Option<ImgBbData>,
    error: Option<ImgBbError>,
}

#[derive(Debug, Deserialize)]
struct ImgBbData {
    url: Option<String>,
    delete_url: Option<String>,
    display_url: Option<String>,
    size: Option<u64>,
    width: Option<u32>,
    height: Option<u32>,
    expiration: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ImgBbError {
    message: Option<String>,
    code: Option<i64>,
}

pub struct ImgBbProvider {
    client: Client,
}

impl ImgBbProvider {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    fn upload_failed(&self, message: String, error: Option<ImgBbError>) -> UploadError {
        UploadError::UploadFailed {
            provider: self.name(),
            message,
            details: error.and_then(|e| serde_json::to_value(e).ok()),
        }
    }
}

impl Default for ImgBbProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageProvider for ImgBbProvider {
    fn name(&self) -> ProviderKind {
        ProviderKind::Imgbb
    }

    async fn upload(
        &self,
        file: ImageFile,
        config: &ProviderConfig,
        options: &UploadOptions,
    ) -> Result<UploadResult, UploadError> {
        let part = file_part(&file, options.on_progress.as_ref())?;
        let form = multipart::Form::new()
            .part("image", part)
            .text("expiration", "");

        let url = config.base_url.as_deref().unwrap_or(IMGBB_UPLOAD_URL);

        tracing::debug!(filename = %file.filename, size = file.size(), "uploading to imgbb");

        let response = self
            .client
            .post(url)
            .query(&[("key", config.api_key.as_str())])
            .multipart(form)
            .timeout(UPLOAD_TIMEOUT)
            .send()
            .await
            .map_err(UploadError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(UploadError::from)?;

        let parsed: ImgBbResponse = serde_json::from_str(&body).map_err(|e| {
            self.upload_failed(format!("unparseable response ({status}): {e}"), None)
        })?;

        if !status.is_success() || !parsed.success {
            let message = parsed
                .error
                .as_ref()
                .and_then(|e| e.message.clone())
                .unwrap_or_else(|| "Image upload failed".to_string());
            return Err(self.upload_failed(message, parsed.error));
        }

        let data = parsed
            .data
            .ok_or_else(|| self.upload_failed("response is missing upload data".to_string(), None))?;
        let hosted_url = data
            .url
            .ok_or_else(|| self.upload_failed("response is missing the image url".to_string(), None))?;

        let mut metadata = serde_json::Map::new();
        if let Some(delete_url) = data.delete_url {
            metadata.insert("delete_url".to_string(), delete_url.into());
        }
        if let Some(display_url) = data.display_url {
            metadata.insert("display_url".to_string(), display_url.into());
        }
        if let Some(size) = data.size {
            metadata.insert("size".to_string(), size.into());
        }
        if let Some(width) = data.width {
            metadata.insert("width".to_string(), width.into());
        }
        if let Some(height) = data.height {
            metadata.insert("height".to_string(), height.into());
        }
        if let Some(expiration) = data.expiration {
            metadata.insert("expiration".to_string(), expiration.into());
        }

        tracing::debug!(url = %hosted_url, "imgbb upload complete");

        Ok(UploadResult {
            url: hosted_url,
            provider: self.name(),
            original_file: file,
            metadata,
        })
    }
}
