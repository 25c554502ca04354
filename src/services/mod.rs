mod cloudinary;
mod imgbb;
mod progress;

pub mod error;

pub use cloudinary::CloudinaryProvider;
pub use imgbb::ImgBbProvider;

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::services::ImageProvider;
use crate::services::error::UploadError;

/// Maps provider identifiers to provider instances.
///
/// The registry is an explicitly constructed value: build one (usually via
/// [`Default`]) and pass it to the upload entry points. Tests can register
/// substitute providers under the same identifiers.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn ImageProvider>>,
}

impl ProviderRegistry {
    /// An empty registry with no providers.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// A registry with the built-in ImgBB and Cloudinary providers.
    pub fn with_default_providers() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ImgBbProvider::new()));
        registry.register(Arc::new(CloudinaryProvider::new()));
        tracing::debug!(providers = %registry.list().join(", "), "provider registry initialized");
        registry
    }

    /// Registers a provider under its own name, replacing any previous
    /// registration for that name.
    pub fn register(&mut self, provider: Arc<dyn ImageProvider>) {
        self.providers
            .insert(provider.name().as_str().to_string(), provider);
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn ImageProvider>, UploadError> {
        self.providers.get(name).cloned().ok_or_else(|| {
            UploadError::UnknownProvider {
                requested: name.to_string(),
                available: self.list().join(", "),
            }
        })
    }

    pub fn has(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Registered provider identifiers, sorted for stable output.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_default_providers()
    }
}
