//! Simplified upload entry points over an explicitly supplied registry.

use crate::domain::config::provider::{ProviderConfig, ProviderKind};
use crate::domain::models::file::ImageFile;
use crate::domain::models::upload::{UploadOptions, UploadResult};
use crate::services::error::UploadError;
use crate::services::ProviderRegistry;

/// Uploads a single image to the selected provider.
pub async fn upload_image(
    registry: &ProviderRegistry,
    file: ImageFile,
    provider: ProviderKind,
    config: &ProviderConfig,
    options: &UploadOptions,
) -> Result<UploadResult, UploadError> {
    let provider = registry.get(provider.as_str())?;
    provider.upload(file, config, options).await
}

/// Uploads a batch of images concurrently to the selected provider.
///
/// All-or-nothing: if any single upload fails, the whole call fails and no
/// partial results are returned.
pub async fn upload_images(
    registry: &ProviderRegistry,
    files: Vec<ImageFile>,
    provider: ProviderKind,
    config: &ProviderConfig,
    options: &UploadOptions,
) -> Result<Vec<UploadResult>, UploadError> {
    let provider = registry.get(provider.as_str())?;
    provider.upload_multiple(files, config, options).await
}

/// ImgBB shortcut that returns only the hosted URLs.
pub async fn upload_images_to_imgbb(
    registry: &ProviderRegistry,
    files: Vec<ImageFile>,
    api_key: &str,
) -> Result<Vec<String>, UploadError> {
    let config = ProviderConfig::imgbb(api_key);
    let results = upload_images(
        registry,
        files,
        ProviderKind::Imgbb,
        &config,
        &UploadOptions::default(),
    )
    .await?;

    Ok(results.into_iter().map(|r| r.url).collect())
}

/// Cloudinary shortcut for unsigned uploads.
pub async fn upload_images_to_cloudinary(
    registry: &ProviderRegistry,
    files: Vec<ImageFile>,
    cloud_name: &str,
    upload_preset: Option<String>,
    options: &UploadOptions,
) -> Result<Vec<UploadResult>, UploadError> {
    let config = ProviderConfig::cloudinary(cloud_name, upload_preset);
    upload_images(registry, files, ProviderKind::Cloudinary, &config, options).await
}
