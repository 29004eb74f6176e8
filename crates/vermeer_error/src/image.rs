//! Image transform error types.

/// Kinds of image transform errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ImageErrorKind {
    /// The source bytes could not be decoded
    #[display("Failed to decode image: {}", _0)]
    Decode(String),
    /// The resized image could not be re-encoded
    #[display("Failed to encode image: {}", _0)]
    Encode(String),
    /// The source format is not in the supported format family
    #[display("Unsupported image format: {}", _0)]
    UnsupportedFormat(String),
}

/// Image transform error with location tracking.
///
/// Transform failures are hard errors: there is no partial or degraded
/// output, the caller decides whether to continue with other images.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Image Error: {} at line {} in {}", kind, line, file)]
pub struct ImageError {
    /// The kind of error that occurred
    pub kind: ImageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ImageError {
    /// Create a new image error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ImageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
