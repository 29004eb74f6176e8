//! Configuration error types.

/// Configuration error with source location.
///
/// Raised for missing or malformed environment configuration, before any
/// network I/O happens.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use vermeer_error::ConfigError;
    ///
    /// let err = ConfigError::new("SPACES_ACCESS_KEY_ID is not set");
    /// assert!(err.message.contains("SPACES_ACCESS_KEY_ID"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
