//! Configuration Types
//!
//! Session integration configuration.

/// Session integration configuration.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Prefix for every storage key this integration owns. Two managers with
    /// different prefixes never observe each other's state.
    pub storage_key_prefix: String,
}

impl SessionConfig {
    /// Create a configuration with the given storage key prefix.
    pub fn new(storage_key_prefix: impl Into<String>) -> Self {
        Self {
            storage_key_prefix: storage_key_prefix.into(),
        }
    }
}
