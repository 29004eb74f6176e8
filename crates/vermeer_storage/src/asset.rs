//! Asset data types and content addressing.

use crate::media_kind::extension_for;
use sha2::{Digest, Sha256};

/// Bytes downloaded from a source URL, alive for one mirroring attempt.
#[derive(Debug, Clone)]
pub struct RawAsset {
    /// The raw bytes
    pub buffer: Vec<u8>,
    /// Content type reported by the source, or the octet-stream fallback
    pub content_type: String,
    /// Length of `buffer`
    pub byte_size: usize,
}

impl RawAsset {
    /// Wrap downloaded bytes with their reported content type.
    pub fn new(buffer: Vec<u8>, content_type: impl Into<String>) -> Self {
        let byte_size = buffer.len();
        Self {
            buffer,
            content_type: content_type.into(),
            byte_size,
        }
    }
}

/// A durably stored, content-addressed object.
///
/// `key` is always `<namespace>/<sha256-hex><extension>`, so identical bytes
/// land on identical keys and re-uploads overwrite in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Public URL of the object
    pub public_url: String,
    /// Bucket key
    pub key: String,
    /// SHA-256 of the stored bytes, lowercase hex
    pub content_hash: String,
    /// Size of the stored bytes
    pub byte_size: usize,
}

/// Compute the SHA-256 content hash of the exact bytes, as lowercase hex.
pub fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Compute the deterministic bucket key for a blob.
///
/// The extension is inferred from the content type, falling back to `.jpg`
/// for unknown or missing types.
pub fn object_key(namespace: &str, data: &[u8], content_type: Option<&str>) -> String {
    format!(
        "{}/{}{}",
        namespace,
        content_hash(data),
        extension_for(content_type)
    )
}
