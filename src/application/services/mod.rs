mod image_provider;

pub use image_provider::ImageProvider;
