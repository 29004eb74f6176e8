//! The resize + re-encode pass.

use crate::OptimizeOptions;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use vermeer_error::{ImageError, ImageErrorKind};

/// Format family of a transformed asset.
///
/// The output format always equals the input format; there is no
/// cross-format conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, derive_more::Display)]
pub enum AssetFormat {
    /// JPEG
    #[display("jpeg")]
    Jpeg,
    /// PNG
    #[display("png")]
    Png,
    /// WebP
    #[display("webp")]
    WebP,
    /// GIF
    #[display("gif")]
    Gif,
    /// SVG, never re-encoded
    #[display("svg")]
    Svg,
}

impl AssetFormat {
    /// MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            AssetFormat::Jpeg => "image/jpeg",
            AssetFormat::Png => "image/png",
            AssetFormat::WebP => "image/webp",
            AssetFormat::Gif => "image/gif",
            AssetFormat::Svg => "image/svg+xml",
        }
    }
}

/// Result of one optimization pass.
#[derive(Debug, Clone)]
pub struct OptimizedAsset {
    /// Re-encoded bytes (or the untouched input for vector formats)
    pub buffer: Vec<u8>,
    /// Format family, equal to the input's
    pub format: AssetFormat,
    /// Output width; 0 for vector passthrough
    pub width: u32,
    /// Output height; 0 for vector passthrough
    pub height: u32,
    /// Input size in bytes
    pub original_size: usize,
    /// Output size in bytes
    pub optimized_size: usize,
    /// `(1 - optimized/original) * 100`; negative when re-encoding grew an
    /// already-optimal image, and deliberately never clamped
    pub savings_percent: f64,
}

/// Sniff SVG without decoding: leading `<?xml` or `<svg` after optional
/// UTF-8 BOM and whitespace.
fn looks_like_svg(buffer: &[u8]) -> bool {
    let body = buffer.strip_prefix(b"\xef\xbb\xbf").unwrap_or(buffer);
    let Ok(head) = std::str::from_utf8(&body[..body.len().min(512)]) else {
        return false;
    };
    let head = head.trim_start();
    head.starts_with("<?xml") || head.starts_with("<svg")
}

fn savings(original: usize, optimized: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - optimized as f64 / original as f64) * 100.0
}

/// Resize and re-encode an image for storage.
///
/// Vector content passes through byte-identical. Raster content is downsized
/// so neither dimension exceeds `options.max_dimension` (never upscaled) and
/// re-encoded in its own format family with maximum-effort settings.
///
/// # Errors
///
/// Decode and encode failures propagate; there is no partial output.
#[tracing::instrument(skip(buffer), fields(size = buffer.len()))]
pub fn optimize(buffer: &[u8], options: OptimizeOptions) -> Result<OptimizedAsset, ImageError> {
    if looks_like_svg(buffer) {
        tracing::debug!("Vector input, passing through unchanged");
        return Ok(OptimizedAsset {
            buffer: buffer.to_vec(),
            format: AssetFormat::Svg,
            width: 0,
            height: 0,
            original_size: buffer.len(),
            optimized_size: buffer.len(),
            savings_percent: 0.0,
        });
    }

    let source_format = image::guess_format(buffer)
        .map_err(|e| ImageError::new(ImageErrorKind::Decode(e.to_string())))?;
    let format = match source_format {
        ImageFormat::Jpeg => AssetFormat::Jpeg,
        ImageFormat::Png => AssetFormat::Png,
        ImageFormat::WebP => AssetFormat::WebP,
        ImageFormat::Gif => AssetFormat::Gif,
        other => {
            return Err(ImageError::new(ImageErrorKind::UnsupportedFormat(format!(
                "{other:?}"
            ))));
        }
    };

    let decoded = image::load_from_memory_with_format(buffer, source_format)
        .map_err(|e| ImageError::new(ImageErrorKind::Decode(e.to_string())))?;

    let (width, height) = decoded.dimensions();
    let resized = if width > options.max_dimension || height > options.max_dimension {
        decoded.resize(
            options.max_dimension,
            options.max_dimension,
            FilterType::Lanczos3,
        )
    } else {
        decoded
    };
    let (out_width, out_height) = resized.dimensions();

    let encoded = encode(&resized, format, options.quality)?;
    let savings_percent = savings(buffer.len(), encoded.len());
    tracing::debug!(
        width = out_width,
        height = out_height,
        savings = format!("{savings_percent:.1}%"),
        "Optimized image"
    );

    Ok(OptimizedAsset {
        original_size: buffer.len(),
        optimized_size: encoded.len(),
        buffer: encoded,
        format,
        width: out_width,
        height: out_height,
        savings_percent,
    })
}

fn encode(
    image: &DynamicImage,
    format: AssetFormat,
    quality: u8,
) -> Result<Vec<u8>, ImageError> {
    let mut out = Vec::new();
    let encode_error = |e: image::ImageError| ImageError::new(ImageErrorKind::Encode(e.to_string()));

    match format {
        AssetFormat::Jpeg => {
            // JPEG has no alpha channel; flatten before encoding.
            let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut out, quality))
                .map_err(encode_error)?;
        }
        AssetFormat::Png => {
            image
                .write_with_encoder(PngEncoder::new_with_quality(
                    &mut out,
                    CompressionType::Best,
                    PngFilterType::Adaptive,
                ))
                .map_err(encode_error)?;
        }
        AssetFormat::WebP => {
            image
                .write_with_encoder(WebPEncoder::new_lossless(&mut out))
                .map_err(encode_error)?;
        }
        AssetFormat::Gif => {
            image
                .write_to(&mut Cursor::new(&mut out), ImageFormat::Gif)
                .map_err(encode_error)?;
        }
        AssetFormat::Svg => unreachable!("vector input short-circuits before encoding"),
    }

    Ok(out)
}
