//! Media kind enumeration and the content-type ↔ extension table.

/// Kind of asset handled by the gateway.
///
/// The table is fixed and bidirectional: every kind maps to exactly one
/// content type and one file extension.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum MediaKind {
    /// JPEG photographs
    #[display("jpeg")]
    Jpeg,
    /// PNG graphics
    #[display("png")]
    Png,
    /// GIF animations
    #[display("gif")]
    Gif,
    /// WebP images
    #[display("webp")]
    WebP,
    /// SVG vector graphics
    #[display("svg")]
    Svg,
    /// PDF documents
    #[display("pdf")]
    Pdf,
}

/// Content type used when the source offers none.
///
/// Paired with the `.jpg` extension fallback in [`extension_for`]: most
/// untyped assets in this domain are photographs.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

impl MediaKind {
    /// The MIME content type for this kind.
    pub fn content_type(&self) -> &'static str {
        match self {
            MediaKind::Jpeg => "image/jpeg",
            MediaKind::Png => "image/png",
            MediaKind::Gif => "image/gif",
            MediaKind::WebP => "image/webp",
            MediaKind::Svg => "image/svg+xml",
            MediaKind::Pdf => "application/pdf",
        }
    }

    /// The file extension for this kind, with leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Jpeg => ".jpg",
            MediaKind::Png => ".png",
            MediaKind::Gif => ".gif",
            MediaKind::WebP => ".webp",
            MediaKind::Svg => ".svg",
            MediaKind::Pdf => ".pdf",
        }
    }

    /// Look up a kind from a MIME content type.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "image/jpeg" | "image/jpg" => Some(MediaKind::Jpeg),
            "image/png" => Some(MediaKind::Png),
            "image/gif" => Some(MediaKind::Gif),
            "image/webp" => Some(MediaKind::WebP),
            "image/svg+xml" => Some(MediaKind::Svg),
            "application/pdf" => Some(MediaKind::Pdf),
            _ => None,
        }
    }

    /// Look up a kind from a file extension, with or without the dot.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.trim_start_matches('.') {
            "jpg" | "jpeg" => Some(MediaKind::Jpeg),
            "png" => Some(MediaKind::Png),
            "gif" => Some(MediaKind::Gif),
            "webp" => Some(MediaKind::WebP),
            "svg" => Some(MediaKind::Svg),
            "pdf" => Some(MediaKind::Pdf),
            _ => None,
        }
    }
}

/// Infer a content type for a possibly missing or unknown source type.
///
/// Unknown types fall back to a generic octet-stream content type.
pub fn content_type_for(source: Option<&str>) -> &'static str {
    source
        .and_then(MediaKind::from_content_type)
        .map(|kind| kind.content_type())
        .unwrap_or(FALLBACK_CONTENT_TYPE)
}

/// Infer a file extension for a possibly missing or unknown source type.
///
/// Unknown types fall back to `.jpg`. The fallback is deliberately not the
/// inverse of [`content_type_for`].
pub fn extension_for(source: Option<&str>) -> &'static str {
    source
        .and_then(MediaKind::from_content_type)
        .map(|kind| kind.extension())
        .unwrap_or(".jpg")
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn table_is_bidirectional() {
        for kind in MediaKind::iter() {
            assert_eq!(MediaKind::from_content_type(kind.content_type()), Some(kind));
            assert_eq!(MediaKind::from_extension(kind.extension()), Some(kind));
        }
    }

    #[test]
    fn unknown_type_falls_back_asymmetrically() {
        assert_eq!(content_type_for(Some("video/mp4")), FALLBACK_CONTENT_TYPE);
        assert_eq!(extension_for(Some("video/mp4")), ".jpg");
        assert_eq!(content_type_for(None), FALLBACK_CONTENT_TYPE);
        assert_eq!(extension_for(None), ".jpg");
    }

    #[test]
    fn jpeg_aliases_resolve() {
        assert_eq!(MediaKind::from_content_type("image/jpg"), Some(MediaKind::Jpeg));
        assert_eq!(MediaKind::from_extension("jpeg"), Some(MediaKind::Jpeg));
    }
}
