//! Session Error Types
//!
//! Error hierarchy for session state and token persistence operations.

use thiserror::Error;

/// Root error type for the session integration.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Token decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl SessionError {
    /// Get error code for telemetry.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "SESSION_CONFIG",
            Self::Storage(_) => "SESSION_STORAGE",
            Self::Decode(_) => "SESSION_DECODE",
        }
    }

    /// Check if the error came from the backing store rather than from the
    /// session data itself.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },
}

/// Storage backend error.
///
/// Absence of a key is never a storage error; it surfaces as `Ok(None)` at
/// the [`KeyValueStorage`](crate::storage::KeyValueStorage) boundary.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Read failed: {message}")]
    ReadFailed { message: String },

    #[error("Write failed: {message}")]
    WriteFailed { message: String },

    #[error("Delete failed: {message}")]
    DeleteFailed { message: String },

    #[error("Storage backend unavailable: {message}")]
    Unavailable { message: String },
}

/// Token decode error.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed token: {message}")]
    MalformedToken { message: String },

    #[error("Invalid token payload: {message}")]
    InvalidPayload { message: String },
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = SessionError::Configuration(ConfigurationError::MissingField {
            field: "storage_key_prefix".to_string(),
        });
        assert_eq!(err.error_code(), "SESSION_CONFIG");

        let err = SessionError::Storage(StorageError::Unavailable {
            message: "backend down".to_string(),
        });
        assert_eq!(err.error_code(), "SESSION_STORAGE");

        let err = SessionError::Decode(DecodeError::MalformedToken {
            message: "no payload segment".to_string(),
        });
        assert_eq!(err.error_code(), "SESSION_DECODE");
    }

    #[test]
    fn test_is_storage_failure() {
        let err = SessionError::Storage(StorageError::ReadFailed {
            message: "io".to_string(),
        });
        assert!(err.is_storage_failure());

        let err = SessionError::Decode(DecodeError::InvalidPayload {
            message: "not json".to_string(),
        });
        assert!(!err.is_storage_failure());
    }

    #[test]
    fn test_display_formatting() {
        let err = SessionError::Storage(StorageError::WriteFailed {
            message: "disk full".to_string(),
        });
        assert_eq!(err.to_string(), "Storage error: Write failed: disk full");
    }
}
