//! Image resize and re-encode engine for Vermeer.
//!
//! One operation: [`optimize`] takes raw image bytes and produces a resized,
//! re-encoded version in the same format family. Vector content (SVG) passes
//! through untouched, raster content is downsized to fit a maximum dimension
//! (never upscaled) and re-encoded with maximum-effort settings.
//!
//! Two preset profiles exist: [`OptimizeOptions::thumbnail`] for avatars and
//! icons, [`OptimizeOptions::full_image`] for article imagery.
//!
//! # Example
//!
//! ```rust,ignore
//! use vermeer_image::{optimize, OptimizeOptions};
//!
//! let optimized = optimize(&bytes, OptimizeOptions::thumbnail())?;
//! println!(
//!     "{}x{} -> {:.1}% saved",
//!     optimized.width, optimized.height, optimized.savings_percent
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod optimize;
mod options;

pub use optimize::{optimize, AssetFormat, OptimizedAsset};
pub use options::OptimizeOptions;
pub use vermeer_error::{ImageError, ImageErrorKind};
