use async_trait::async_trait;
use futures::future::try_join_all;

use crate::domain::config::provider::{ProviderConfig, ProviderKind};
use crate::domain::config::validation::ValidationOptions;
use crate::domain::models::file::ImageFile;
use crate::domain::models::upload::{UploadOptions, UploadResult};
use crate::services::error::UploadError;
use crate::validation::{validate_file_complete, ValidationResult};

/// The uniform capability every hosting provider implements.
///
/// Batch uploads run concurrently and are all-or-nothing: the first failure
/// fails the whole call, and results of sibling uploads that still settle are
/// discarded. On success the result order matches the input order.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> ProviderKind;

    async fn upload(
        &self,
        file: ImageFile,
        config: &ProviderConfig,
        options: &UploadOptions,
    ) -> Result<UploadResult, UploadError>;

    async fn upload_multiple(
        &self,
        files: Vec<ImageFile>,
        config: &ProviderConfig,
        options: &UploadOptions,
    ) -> Result<Vec<UploadResult>, UploadError> {
        try_join_all(
            files
                .into_iter()
                .map(|file| self.upload(file, config, options)),
        )
        .await
    }

    async fn validate(
        &self,
        file: &ImageFile,
        options: &ValidationOptions,
    ) -> ValidationResult {
        validate_file_complete(file, options).await
    }
}
