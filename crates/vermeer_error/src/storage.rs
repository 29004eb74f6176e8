//! Object storage error types.

/// Kinds of object storage errors.
///
/// Downloads and deletions deliberately do not appear here: both are
/// recoverable by contract and report failure through `Option`/`bool`
/// returns instead of errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to put an object into the bucket
    #[display("Failed to upload object {}: {}", _0, _1)]
    Upload(String, String),
}

/// Object storage error with location tracking.
///
/// # Examples
///
/// ```
/// use vermeer_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Upload(
///     "notion-images/a.png".to_string(),
///     "connection reset".to_string(),
/// ));
/// assert!(format!("{}", err).contains("Failed to upload object"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
