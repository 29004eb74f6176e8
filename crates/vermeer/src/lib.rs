//! Vermeer - Notion image mirroring and optimization.
//!
//! Vermeer keeps the images referenced by a Notion-backed personal site in
//! owned object storage: it scans content collections for image references,
//! downloads the originals, resizes and re-encodes them, uploads the result
//! under a content-addressed key, rewrites the reference in Notion, and
//! cleans up the old object when it lived in owned storage.
//!
//! # Architecture
//!
//! Vermeer is organized as a workspace with focused crates:
//!
//! - `vermeer_error` - Error types
//! - `vermeer_storage` - Content-addressed S3 gateway and URL classification
//! - `vermeer_image` - Resize and re-encode engine
//! - `vermeer_notion` - Content-database client and reference updater
//! - `vermeer_mirror` - The per-image workflow and batch statistics
//!
//! This crate (`vermeer`) re-exports everything and carries the CLI binary.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vermeer::{run_collection, CollectionSpec, NotionClient, S3Storage, StorageConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storage = S3Storage::new(StorageConfig::from_env()?);
//!     let notion = NotionClient::from_env()?;
//!
//!     for spec in CollectionSpec::discover() {
//!         let stats = run_collection(&storage, &notion, &spec).await?;
//!         println!("{}: {}", spec.kind, stats);
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

pub use vermeer_error::{
    ConfigError, ImageError, ImageErrorKind, NotionError, NotionErrorKind, StorageError,
    StorageErrorKind, VermeerError, VermeerErrorKind, VermeerResult,
};
pub use vermeer_image::{optimize, AssetFormat, OptimizeOptions, OptimizedAsset};
pub use vermeer_mirror::{
    mirror_reference, run_collection, scan_page, BatchStats, FieldKind, ImageReference,
    MirrorOutcome, Stage,
};
pub use vermeer_notion::{
    CollectionKind, CollectionSpec, ContentApi, NotionClient, Page, PageIcon, PropertyValue,
    QuerySort, SortDirection,
};
pub use vermeer_storage::{
    is_mirror_candidate, ObjectStore, RawAsset, S3Storage, StorageConfig, StoredObject,
    UrlClass, UrlClassifier, OPTIMIZED_NAMESPACE,
};
