//! Error types shared across the crate.

use thiserror::Error;

/// All errors the flashcard manager can produce.
#[derive(Debug, Error)]
pub enum FlashdeckError {
    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Data could not be serialized to or deserialized from JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A backup file is missing a required top-level field or is not JSON.
    #[error("Invalid backup format: {0}")]
    InvalidFormat(String),

    /// A required text field was empty.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// An image file has an extension we cannot map to a MIME type.
    #[error("Unsupported image file: {0}")]
    UnsupportedImage(String),
}

/// Convenience alias that pins the error type to [`FlashdeckError`].
pub type Result<T> = std::result::Result<T, FlashdeckError>;

impl FlashdeckError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Storage error: {e}"),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
            Self::InvalidFormat(msg) => format!("Invalid backup file: {msg}"),
            Self::ValidationFailed(msg) => msg.clone(),
            Self::UnsupportedImage(path) => format!("Unsupported image file: {path}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let e = FlashdeckError::ValidationFailed("Enter text for both sides!".to_string());
        assert_eq!(e.user_message(), "Enter text for both sides!");
    }

    #[test]
    fn test_format_error_names_the_backup_file() {
        let e = FlashdeckError::InvalidFormat("missing field `decks`".to_string());
        assert!(e.user_message().contains("Invalid backup file"));
    }
}
