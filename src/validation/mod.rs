//! Client-side acceptance checks run before any network call.
//!
//! Validation failures are data, never errors: every check returns a
//! [`ValidationResult`] and the caller decides whether to drop the file or
//! surface the messages.

use std::fmt;
use std::io::Cursor;

use bytes::Bytes;
use serde::Serialize;

use crate::domain::config::validation::ValidationOptions;
use crate::domain::models::file::ImageFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    InvalidType,
    FileTooLarge,
    ImageTooNarrow,
    ImageTooWide,
    ImageTooShort,
    ImageTooTall,
    InvalidImage,
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationCode::InvalidType => "INVALID_TYPE",
            ValidationCode::FileTooLarge => "FILE_TOO_LARGE",
            ValidationCode::ImageTooNarrow => "IMAGE_TOO_NARROW",
            ValidationCode::ImageTooWide => "IMAGE_TOO_WIDE",
            ValidationCode::ImageTooShort => "IMAGE_TOO_SHORT",
            ValidationCode::ImageTooTall => "IMAGE_TOO_TALL",
            ValidationCode::InvalidImage => "INVALID_IMAGE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub code: ValidationCode,
    pub message: String,
    pub field: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn has_code(&self, code: ValidationCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }
}

/// Synchronous checks: MIME type and byte size.
///
/// The two checks run independently, so one result can carry both errors.
/// The size boundary is strict: a file of exactly `max_size` bytes passes.
pub fn validate_image_file(file: &ImageFile, options: &ValidationOptions) -> ValidationResult {
    let mut errors = Vec::new();

    if !options.is_type_allowed(&file.mime_type) {
        errors.push(ValidationError {
            code: ValidationCode::InvalidType,
            message: format!(
                "File type \"{}\" is not allowed. Allowed types: {}",
                file.mime_type,
                options.allowed_types_display()
            ),
            field: "type",
        });
    }

    let max_size = options.max_size();
    if file.size() > max_size {
        errors.push(ValidationError {
            code: ValidationCode::FileTooLarge,
            message: format!(
                "File size ({:.2}MB) exceeds maximum allowed size ({:.2}MB)",
                to_mb(file.size()),
                to_mb(max_size)
            ),
            field: "size",
        });
    }

    ValidationResult::from_errors(errors)
}

/// Asynchronous pixel-dimension checks.
///
/// The only suspension point is decoding the image header, which runs on the
/// blocking pool. A payload that cannot be decoded as an image at all fails
/// with `INVALID_IMAGE`; otherwise width and height are checked independently
/// against the configured bounds.
pub async fn validate_image_dimensions(
    file: &ImageFile,
    options: &ValidationOptions,
) -> ValidationResult {
    let (width, height) = match decode_dimensions(file.content.clone()).await {
        Some(dimensions) => dimensions,
        None => {
            return ValidationResult::from_errors(vec![ValidationError {
                code: ValidationCode::InvalidImage,
                message: "Failed to decode image for validation".to_string(),
                field: "dimensions",
            }])
        }
    };

    let mut errors = Vec::new();

    let min_width = options.min_width();
    if width < min_width {
        errors.push(ValidationError {
            code: ValidationCode::ImageTooNarrow,
            message: format!(
                "Image width ({width}px) is less than minimum required ({min_width}px)"
            ),
            field: "width",
        });
    }
    let max_width = options.max_width();
    if width > max_width {
        errors.push(ValidationError {
            code: ValidationCode::ImageTooWide,
            message: format!("Image width ({width}px) exceeds maximum allowed ({max_width}px)"),
            field: "width",
        });
    }

    let min_height = options.min_height();
    if height < min_height {
        errors.push(ValidationError {
            code: ValidationCode::ImageTooShort,
            message: format!(
                "Image height ({height}px) is less than minimum required ({min_height}px)"
            ),
            field: "height",
        });
    }
    let max_height = options.max_height();
    if height > max_height {
        errors.push(ValidationError {
            code: ValidationCode::ImageTooTall,
            message: format!(
                "Image height ({height}px) exceeds maximum allowed ({max_height}px)"
            ),
            field: "height",
        });
    }

    ValidationResult::from_errors(errors)
}

/// Full pipeline: cheap synchronous checks first, dimension decoding only if
/// they pass. Decoding is never attempted for a file that already failed on
/// type or size.
pub async fn validate_file_complete(
    file: &ImageFile,
    options: &ValidationOptions,
) -> ValidationResult {
    let basic = validate_image_file(file, options);
    if !basic.valid {
        return basic;
    }

    let dimensions = validate_image_dimensions(file, options).await;

    let mut errors = basic.errors;
    errors.extend(dimensions.errors);
    ValidationResult {
        valid: dimensions.valid,
        errors,
    }
}

/// Human-readable byte count, e.g. `2.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (scaled * 100.0).round() / 100.0;

    format!("{} {}", rounded, UNITS[exponent])
}

fn to_mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

async fn decode_dimensions(content: Bytes) -> Option<(u32, u32)> {
    let decoded = tokio::task::spawn_blocking(move || {
        image::ImageReader::new(Cursor::new(content))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    })
    .await;

    decoded.ok().flatten()
}
