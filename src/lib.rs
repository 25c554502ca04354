//! Client-side image validation and uploads to remote hosting providers.
//!
//! Two pieces make up the crate: a validator that checks MIME type, byte
//! size and pixel dimensions before any network call, and an upload
//! dispatcher that routes files to ImgBB or Cloudinary through a provider
//! registry, normalizing responses into one result shape and relaying
//! byte-level progress callbacks.
//!
//! ```no_run
//! use image_courier::{
//!     upload_image, validate_file_complete, ImageFile, ProviderConfig, ProviderKind,
//!     ProviderRegistry, UploadOptions, ValidationOptions,
//! };
//!
//! # async fn example() -> Result<(), image_courier::UploadError> {
//! let registry = ProviderRegistry::default();
//! let file = ImageFile::new(std::fs::read("photo.png").unwrap(), "photo.png", "image/png");
//!
//! let report = validate_file_complete(&file, &ValidationOptions::default()).await;
//! assert!(report.valid);
//!
//! let config = ProviderConfig::imgbb("my-api-key");
//! let options = UploadOptions::new().with_progress(|p| println!("{}%", p.percentage));
//! let result = upload_image(&registry, file, ProviderKind::Imgbb, &config, &options).await?;
//! println!("hosted at {}", result.url);
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod services;
pub mod validation;

pub use application::services::ImageProvider;
pub use application::upload::{
    upload_image, upload_images, upload_images_to_cloudinary, upload_images_to_imgbb,
};
pub use domain::config::provider::{ProviderConfig, ProviderKind};
pub use domain::config::validation::ValidationOptions;
pub use domain::models::file::ImageFile;
pub use domain::models::upload::{
    ProgressCallback, TransformOptions, UploadOptions, UploadProgress, UploadResult,
};
pub use services::error::UploadError;
pub use services::{CloudinaryProvider, ImgBbProvider, ProviderRegistry};
pub use validation::{
    format_file_size, validate_file_complete, validate_image_dimensions, validate_image_file,
    ValidationCode, ValidationError, ValidationResult,
};
