use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_SIZE: u64 = 10 * 1024 * 1024;
pub const DEFAULT_MIN_WIDTH: u32 = 1;
pub const DEFAULT_MAX_WIDTH: u32 = 10_000;
pub const DEFAULT_MIN_HEIGHT: u32 = 1;
pub const DEFAULT_MAX_HEIGHT: u32 = 10_000;

/// MIME types accepted when the caller does not supply their own set.
///
/// Every default-allowed type must be decodable by the dimension validator.
pub const DEFAULT_ALLOWED_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
];

/// Acceptance limits for candidate files.
///
/// Unset fields fall back to the defaults above, merged key-wise at check
/// time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationOptions {
    pub max_size: Option<u64>,
    pub min_width: Option<u32>,
    pub max_width: Option<u32>,
    pub min_height: Option<u32>,
    pub max_height: Option<u32>,
    pub allowed_types: Option<Vec<String>>,
}

impl ValidationOptions {
    pub fn max_size(&self) -> u64 {
        self.max_size.unwrap_or(DEFAULT_MAX_SIZE)
    }

    pub fn min_width(&self) -> u32 {
        self.min_width.unwrap_or(DEFAULT_MIN_WIDTH)
    }

    pub fn max_width(&self) -> u32 {
        self.max_width.unwrap_or(DEFAULT_MAX_WIDTH)
    }

    pub fn min_height(&self) -> u32 {
        self.min_height.unwrap_or(DEFAULT_MIN_HEIGHT)
    }

    pub fn max_height(&self) -> u32 {
        self.max_height.unwrap_or(DEFAULT_MAX_HEIGHT)
    }

    pub fn is_type_allowed(&self, mime_type: &str) -> bool {
        match &self.allowed_types {
            Some(types) => types.iter().any(|t| t == mime_type),
            None => DEFAULT_ALLOWED_TYPES.contains(&mime_type),
        }
    }

    pub fn allowed_types_display(&self) -> String {
        match &self.allowed_types {
            Some(types) => types.join(", "),
            None => DEFAULT_ALLOWED_TYPES.join(", "),
        }
    }
}
