//! Content-addressed object storage gateway for Vermeer.
//!
//! This crate wraps one S3 bucket behind a small trait and adds the pieces
//! the mirroring pipeline needs around it:
//!
//! - **Content-addressed uploads**: objects are keyed by the SHA-256 of their
//!   bytes, so identical content deduplicates and keys are immutable
//! - **Forgiving downloads**: store-native and plain HTTP(S) sources both
//!   resolve to raw bytes, with every failure mapped to `None`
//! - **URL classification**: pure predicates deciding whether a URL is in the
//!   owned bucket, already optimized, or a foreign mirror candidate
//!
//! # Example
//!
//! ```rust,no_run
//! use vermeer_storage::{ObjectStore, S3Storage, StorageConfig, OPTIMIZED_NAMESPACE};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = S3Storage::new(StorageConfig::from_env()?);
//!
//! let raw = storage
//!     .download("https://file.notion.so/f/abc/icon.png")
//!     .await
//!     .expect("source is gone");
//! let stored = storage
//!     .upload(&raw.buffer, OPTIMIZED_NAMESPACE, Some(raw.content_type.as_str()))
//!     .await?;
//! println!("mirrored to {}", stored.public_url);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod classify;
mod config;
mod media_kind;
mod s3;

pub use asset::{content_hash, object_key, RawAsset, StoredObject};
pub use classify::{
    ensure_scheme, is_hex_hash, is_mirror_candidate, UrlClass, UrlClassifier,
    OPTIMIZED_NAMESPACE,
};
pub use config::StorageConfig;
pub use media_kind::{content_type_for, extension_for, MediaKind, FALLBACK_CONTENT_TYPE};
pub use s3::{S3Storage, CACHE_CONTROL};
pub use vermeer_error::{StorageError, StorageErrorKind};

use vermeer_error::VermeerResult;

/// Trait for the object storage gateway.
///
/// The mirroring orchestrator only talks to this trait, so tests can run
/// against an in-memory implementation while production uses [`S3Storage`].
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download the bytes behind a URL.
    ///
    /// Returns `None` on any failure (network error, non-success status,
    /// malformed URL). `None` means "skip, do not retry automatically" —
    /// it is never an error.
    async fn download(&self, url: &str) -> Option<RawAsset>;

    /// Upload bytes under `<namespace>/<sha256-hex><extension>`, publicly
    /// readable with a one-year immutable cache directive.
    ///
    /// # Errors
    ///
    /// Upload failures propagate; there is no silent failure path.
    async fn upload(
        &self,
        buffer: &[u8],
        namespace: &str,
        content_type: Option<&str>,
    ) -> VermeerResult<StoredObject>;

    /// Delete the object behind a public URL.
    ///
    /// Returns `false` without any API call when the URL is not under this
    /// gateway's public base, and `false` when the provider refuses.
    async fn delete(&self, url: &str) -> bool;

    /// Classify a URL relative to this gateway's bucket. Pure, no I/O.
    fn classify(&self, url: &str) -> UrlClass;
}
