use std::convert::Infallible;
use std::time::Duration;

use bytes::Bytes;
use reqwest::multipart::Part;
use reqwest::Body;

use crate::domain::models::file::ImageFile;
use crate::domain::models::upload::{ProgressCallback, UploadProgress};
use crate::services::error::UploadError;

/// Fixed per-request timeout applied to every provider upload.
pub(crate) const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

const CHUNK_SIZE: usize = 64 * 1024;

/// Builds the multipart file part, wrapping the payload in a chunked stream
/// that reports progress as the transport pulls bytes.
///
/// The callback fires synchronously per chunk, with `loaded` non-decreasing,
/// strictly before the request completes. A zero-length payload has no
/// computable progress, so no event is emitted for it.
pub(crate) fn file_part(
    file: &ImageFile,
    on_progress: Option<&ProgressCallback>,
) -> Result<Part, UploadError> {
    let total = file.size();

    let part = match on_progress {
        Some(callback) if total > 0 => {
            let callback = callback.clone();
            let chunks = chunk_with_offsets(file.content.clone());
            let stream = futures::stream::iter(chunks.into_iter().map(move |(chunk, loaded)| {
                callback(UploadProgress::new(loaded, total));
                Ok::<Bytes, Infallible>(chunk)
            }));
            Part::stream_with_length(Body::wrap_stream(stream), total)
        }
        _ => Part::bytes(file.content.to_vec()),
    };

    part.file_name(file.filename.clone())
        .mime_str(&file.mime_type)
        .map_err(|e| UploadError::Internal(e.to_string()))
}

fn chunk_with_offsets(mut content: Bytes) -> Vec<(Bytes, u64)> {
    let mut chunks = Vec::with_capacity(content.len() / CHUNK_SIZE + 1);
    let mut loaded = 0u64;

    while !content.is_empty() {
        let take = content.len().min(CHUNK_SIZE);
        let chunk = content.split_to(take);
        loaded += take as u64;
        chunks.push((chunk, loaded));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn chunks_cover_content_with_running_totals() {
        let content = Bytes::from(vec![7u8; CHUNK_SIZE + 100]);
        let chunks = chunk_with_offsets(content);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].0.len(), CHUNK_SIZE);
        assert_eq!(chunks[0].1, CHUNK_SIZE as u64);
        assert_eq!(chunks[1].0.len(), 100);
        assert_eq!(chunks[1].1, (CHUNK_SIZE + 100) as u64);
    }

    #[test]
    fn empty_payload_emits_no_progress() {
        let events: Arc<Mutex<Vec<UploadProgress>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let callback: ProgressCallback = Arc::new(move |p| sink.lock().unwrap().push(p));

        let file = ImageFile::new(Vec::new(), "empty.png", "image/png");
        file_part(&file, Some(&callback)).unwrap();

        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn invalid_mime_type_is_an_internal_error() {
        let file = ImageFile::new(vec![1u8], "x.png", "not a mime\n");
        let err = file_part(&file, None).unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_ERROR");
    }
}
