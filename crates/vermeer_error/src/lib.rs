//! Error types for the Vermeer workspace.
//!
//! This crate provides the foundation error types used throughout the Vermeer
//! image mirroring pipeline.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use vermeer_error::{VermeerResult, ConfigError};
//!
//! fn load_bucket_name() -> VermeerResult<String> {
//!     Err(ConfigError::new("SPACES_BUCKET is not set"))?
//! }
//!
//! match load_bucket_name() {
//!     Ok(bucket) => println!("bucket: {}", bucket),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod image;
mod notion;
mod storage;

pub use config::ConfigError;
pub use error::{VermeerError, VermeerErrorKind, VermeerResult};
pub use image::{ImageError, ImageErrorKind};
pub use notion::{NotionError, NotionErrorKind};
pub use storage::{StorageError, StorageErrorKind};
