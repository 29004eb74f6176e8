//! Content database (Notion) error types.

/// Kinds of Notion API errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum NotionErrorKind {
    /// The request never reached the API
    #[display("Request failed: {}", _0)]
    Http(String),
    /// The API answered with a non-success status
    #[display("Notion API returned {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as returned by the API
        message: String,
    },
    /// The response body could not be deserialized
    #[display("Failed to parse Notion response: {}", _0)]
    Parse(String),
}

/// Notion error with location tracking.
///
/// # Examples
///
/// ```
/// use vermeer_error::{NotionError, NotionErrorKind};
///
/// let err = NotionError::new(NotionErrorKind::Api {
///     status: 404,
///     message: "page not found".to_string(),
/// });
/// assert!(format!("{}", err).contains("404"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Notion Error: {} at line {} in {}", kind, line, file)]
pub struct NotionError {
    /// The kind of error that occurred
    pub kind: NotionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl NotionError {
    /// Create a new Notion error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: NotionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
