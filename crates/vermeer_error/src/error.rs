//! Top-level error wrapper types.

use crate::{ConfigError, ImageError, NotionError, StorageError};

/// Discriminated union over the per-domain error types.
///
/// # Examples
///
/// ```
/// use vermeer_error::{VermeerError, ConfigError};
///
/// let config_err = ConfigError::new("NOTION_TOKEN is not set");
/// let err: VermeerError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum VermeerErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Object storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Image transform error
    #[from(ImageError)]
    Image(ImageError),
    /// Content database error
    #[from(NotionError)]
    Notion(NotionError),
}

/// Vermeer error with kind discrimination.
///
/// # Examples
///
/// ```
/// use vermeer_error::{VermeerResult, ConfigError};
///
/// fn might_fail() -> VermeerResult<()> {
///     Err(ConfigError::new("missing credential"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Vermeer Error: {}", _0)]
pub struct VermeerError(Box<VermeerErrorKind>);

impl VermeerError {
    /// Create a new error from a kind.
    pub fn new(kind: VermeerErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VermeerErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to VermeerErrorKind
impl<T> From<T> for VermeerError
where
    T: Into<VermeerErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Vermeer operations.
///
/// # Examples
///
/// ```
/// use vermeer_error::{VermeerResult, NotionError, NotionErrorKind};
///
/// fn fetch_pages() -> VermeerResult<Vec<String>> {
///     Err(NotionError::new(NotionErrorKind::Http("connection refused".to_string())))?
/// }
/// ```
pub type VermeerResult<T> = std::result::Result<T, VermeerError>;
