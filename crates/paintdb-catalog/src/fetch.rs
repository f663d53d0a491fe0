//! The image-retrieval seam.
//!
//! Fetching is an external collaborator: network transport, caching, and
//! retry all live outside this crate. The pipeline only needs something
//! that can turn an [`ImageRef`] into decoded pixels — or fail, in which
//! case the affected entry's hex degrades to empty and the batch carries
//! on. Nothing here is retried internally.

use std::future::Future;

use paintdb_core::ImageRef;

use crate::error::FetchError;
use crate::sampler::PixelBuffer;

/// Resolves image descriptors to decoded pixel data.
///
/// Implementations typically wrap an HTTP client plus [`decode_pixels`];
/// tests use in-memory stubs. The pipeline treats every failure
/// identically regardless of cause (network, decode, timeout).
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, image: &ImageRef)
        -> impl Future<Output = Result<PixelBuffer, FetchError>> + Send;
}

/// Decodes fetched image bytes (PNG/JPEG/WebP) into an RGB pixel buffer.
///
/// # Errors
///
/// Returns [`FetchError::Decode`] if the bytes are not a decodable image.
pub fn decode_pixels(bytes: &[u8]) -> Result<PixelBuffer, FetchError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| FetchError::Decode {
        reason: e.to_string(),
    })?;
    let rgb = decoded.to_rgb8();
    PixelBuffer::from_rgb8(rgb.width(), rgb.height(), rgb.into_raw())
}
