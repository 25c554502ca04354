use bytes::Bytes;

/// A candidate file selected for upload.
///
/// The payload is held as [`Bytes`], so cloning an `ImageFile` (for example
/// to hand it back inside an upload result) does not copy the content.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub content: Bytes,
    pub filename: String,
    pub mime_type: String,
}

impl ImageFile {
    pub fn new(
        content: impl Into<Bytes>,
        filename: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            filename: filename.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// The filename extension, without the leading dot.
    pub fn extension(&self) -> Option<&str> {
        self.filename
            .rsplit_once('.')
            .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
            .map(|(_, ext)| ext)
    }
}
