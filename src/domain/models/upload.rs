use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::config::provider::ProviderKind;
use crate::domain::models::file::ImageFile;

/// Byte-level progress of one in-flight upload.
///
/// `loaded` is non-decreasing across events for a single request; no event is
/// ever emitted when the body length is not computable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UploadProgress {
    pub loaded: u64,
    pub total: u64,
    pub percentage: u8,
}

impl UploadProgress {
    /// Builds a progress event for `loaded` bytes out of `total`.
    ///
    /// Callers must not construct events for zero-length totals.
    pub fn new(loaded: u64, total: u64) -> Self {
        let percentage = ((loaded as f64 / total as f64) * 100.0).round() as u8;
        Self {
            loaded,
            total,
            percentage,
        }
    }
}

pub type ProgressCallback = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// Cloudinary-style transform parameters applied at upload time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub crop: Option<String>,
    pub quality: Option<u32>,
    pub format: Option<String>,
}

impl TransformOptions {
    /// Renders the comma-joined transformation string, with parts in the
    /// fixed order `w_`, `h_`, `c_`, `q_`, `f_`. Absent parts are omitted;
    /// returns `None` when no part is set.
    pub fn to_param_string(&self) -> Option<String> {
        let mut parts = Vec::new();

        if let Some(width) = self.width {
            parts.push(format!("w_{width}"));
        }
        if let Some(height) = self.height {
            parts.push(format!("h_{height}"));
        }
        if let Some(crop) = &self.crop {
            parts.push(format!("c_{crop}"));
        }
        if let Some(quality) = self.quality {
            parts.push(format!("q_{quality}"));
        }
        if let Some(format) = &self.format {
            parts.push(format!("f_{format}"));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(","))
        }
    }
}

/// Per-upload options: an optional progress callback and optional transform
/// parameters (only meaningful for providers that support them).
#[derive(Clone, Default)]
pub struct UploadOptions {
    pub on_progress: Option<ProgressCallback>,
    pub transform: Option<TransformOptions>,
}

impl UploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(mut self, callback: impl Fn(UploadProgress) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    pub fn with_transform(mut self, transform: TransformOptions) -> Self {
        self.transform = Some(transform);
        self
    }
}

impl fmt::Debug for UploadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadOptions")
            .field("on_progress", &self.on_progress.is_some())
            .field("transform", &self.transform)
            .finish()
    }
}

/// Normalized outcome of one successful upload, regardless of provider.
///
/// `metadata` carries the provider-specific payload (delete URL, public id,
/// reported dimensions, ...) as a free-form JSON map.
#[derive(Debug, Clone)]
pub struct UploadResult {
    pub url: String,
    pub provider: ProviderKind,
    pub original_file: ImageFile,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}
