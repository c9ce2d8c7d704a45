//! Configuration Builder
//!
//! Fluent builder for session configuration.

use crate::error::{ConfigurationError, SessionError};
use crate::types::SessionConfig;

/// Session configuration builder.
#[derive(Default)]
pub struct SessionConfigBuilder {
    storage_key_prefix: Option<String>,
}

impl SessionConfigBuilder {
    /// Create new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the storage key prefix.
    pub fn storage_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_key_prefix = Some(prefix.into());
        self
    }

    /// Build the session configuration.
    pub fn build(self) -> Result<SessionConfig, SessionError> {
        let storage_key_prefix = self.storage_key_prefix.ok_or_else(|| {
            SessionError::Configuration(ConfigurationError::MissingField {
                field: "storage_key_prefix".to_string(),
            })
        })?;

        if storage_key_prefix.is_empty() {
            return Err(SessionError::Configuration(
                ConfigurationError::InvalidField {
                    field: "storage_key_prefix".to_string(),
                    message: "prefix must not be empty".to_string(),
                },
            ));
        }

        Ok(SessionConfig { storage_key_prefix })
    }
}

/// Create a new session configuration builder.
pub fn session_config() -> SessionConfigBuilder {
    SessionConfigBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_success() {
        let config = session_config()
            .storage_key_prefix("myapp")
            .build()
            .unwrap();

        assert_eq!(config.storage_key_prefix, "myapp");
    }

    #[test]
    fn test_builder_missing_prefix() {
        let result = session_config().build();
        assert!(matches!(
            result,
            Err(SessionError::Configuration(
                ConfigurationError::MissingField { .. }
            ))
        ));
    }

    #[test]
    fn test_builder_rejects_empty_prefix() {
        let result = session_config().storage_key_prefix("").build();
        assert!(matches!(
            result,
            Err(SessionError::Configuration(
                ConfigurationError::InvalidField { .. }
            ))
        ));
    }
}
