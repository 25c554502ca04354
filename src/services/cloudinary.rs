use async_trait::async_trait;
use reqwest::{multipart, Client, Url};
use serde::{Deserialize, Serialize};

use crate::application::services::ImageProvider;
use crate::domain::config::provider::{ProviderConfig, ProviderKind};
use crate::domain::models::file::ImageFile;
use crate::domain::models::upload::{TransformOptions, UploadOptions, UploadResult};
use crate::services::error::UploadError;
use crate::services::progress::{file_part, UPLOAD_TIMEOUT};

const CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com/v1_1";
const CLOUDINARY_DELIVERY_BASE: &str = "https://res.cloudinary.com";
const DEFAULT_UPLOAD_PRESET: &str = "unsigned_preset";

#[derive(Debug, Deserialize)]
struct CloudinaryResponse {
    secure_url: Option<String>,
    public_id: Option<String>,
    version: Option<u64>,
    width: Option<u32>,
    height: Option<u32>,
    format: Option<String>,
    bytes: Option<u64>,
    resource_type: Option<String>,
    created_at: Option<String>,
    original_filename: Option<String>,
    error: Option<CloudinaryError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CloudinaryError {
    message: Option<String>,
}

pub struct CloudinaryProvider {
    client: Client,
}

impl CloudinaryProvider {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Rewrites an already-hosted Cloudinary URL (or a bare public id) to
    /// embed a new transformation segment. No network call is made.
    ///
    /// For a full URL, everything after the `v<number>` path segment is taken
    /// as the public id and the result is rebuilt as
    /// `<origin>/image/upload/<transform>/<public_id>`. A bare public id is
    /// expanded against the shared delivery host without a cloud-name
    /// segment.
    pub fn generate_transformed_url(
        url_or_public_id: &str,
        transformations: &TransformOptions,
    ) -> String {
        let transformation = transformations.to_param_string().unwrap_or_default();

        if url_or_public_id.starts_with("http") {
            if let Ok(url) = Url::parse(url_or_public_id) {
                let origin = url.origin().ascii_serialization();
                let segments: Vec<&str> = url
                    .path_segments()
                    .map(|segments| segments.collect())
                    .unwrap_or_default();
                let public_id = match segments.iter().position(|s| is_version_marker(s)) {
                    Some(index) => segments[index + 1..].join("/"),
                    None => segments.join("/"),
                };
                return format!("{origin}/image/upload/{transformation}/{public_id}");
            }
        }

        format!("{CLOUDINARY_DELIVERY_BASE}/image/upload/{transformation}/{url_or_public_id}")
    }

    fn upload_failed(&self, message: String, error: Option<CloudinaryError>) -> UploadError {
        UploadError::UploadFailed {
            provider: self.name(),
            message,
            details: error.and_then(|e| serde_json::to_value(e).ok()),
        }
    }
}

impl Default for CloudinaryProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn is_version_marker(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

#[async_trait]
impl ImageProvider for CloudinaryProvider {
    fn name(&self) -> ProviderKind {
        ProviderKind::Cloudinary
    }

    async fn upload(
        &self,
        file: ImageFile,
        config: &ProviderConfig,
        options: &UploadOptions,
    ) -> Result<UploadResult, UploadError> {
        let cloud_name = config.cloud_name.as_deref().ok_or_else(|| {
            UploadError::MissingConfig {
                provider: self.name(),
                message: "cloud name is required".to_string(),
            }
        })?;

        let part = file_part(&file, options.on_progress.as_ref())?;
        let preset = config.upload_preset.as_deref().unwrap_or(DEFAULT_UPLOAD_PRESET);
        let mut form = multipart::Form::new()
            .part("image", part)
            .text("upload_preset", preset.to_string());

        if let Some(transformation) = options.transform.as_ref().and_then(|t| t.to_param_string())
        {
            form = form.text("transformation", transformation);
        }

        let base = config.base_url.as_deref().unwrap_or(CLOUDINARY_API_BASE);
        let url = format!("{base}/{cloud_name}/image/upload");

        tracing::debug!(filename = %file.filename, size = file.size(), %cloud_name, "uploading to cloudinary");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(UPLOAD_TIMEOUT)
            .send()
            .await
            .map_err(UploadError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(UploadError::from)?;

        let parsed: CloudinaryResponse = serde_json::from_str(&body).map_err(|e| {
            self.upload_failed(format!("unparseable response ({status}): {e}"), None)
        })?;

        let secure_url = match parsed.secure_url {
            Some(secure_url) if status.is_success() => secure_url,
            _ => {
                let message = parsed
                    .error
                    .as_ref()
                    .and_then(|e| e.message.clone())
                    .unwrap_or_else(|| "Image upload failed".to_string());
                return Err(self.upload_failed(message, parsed.error));
            }
        };

        let mut metadata = serde_json::Map::new();
        if let Some(public_id) = parsed.public_id {
            metadata.insert("public_id".to_string(), public_id.into());
        }
        if let Some(version) = parsed.version {
            metadata.insert("version".to_string(), version.into());
        }
        if let Some(width) = parsed.width {
            metadata.insert("width".to_string(), width.into());
        }
        if let Some(height) = parsed.height {
            metadata.insert("height".to_string(), height.into());
        }
        if let Some(format) = parsed.format {
            metadata.insert("format".to_string(), format.into());
        }
        if let Some(bytes) = parsed.bytes {
            metadata.insert("bytes".to_string(), bytes.into());
        }
        if let Some(resource_type) = parsed.resource_type {
            metadata.insert("resource_type".to_string(), resource_type.into());
        }
        if let Some(created_at) = parsed.created_at {
            metadata.insert("created_at".to_string(), created_at.into());
        }
        if let Some(original_filename) = parsed.original_filename {
            metadata.insert("original_filename".to_string(), original_filename.into());
        }

        tracing::debug!(url = %secure_url, "cloudinary upload complete");

        Ok(UploadResult {
            url: secure_url,
            provider: self.name(),
            original_file: file,
            metadata,
        })
    }
}
