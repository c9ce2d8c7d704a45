//! Token Persistence
//!
//! Persists a single opaque bearer token under a namespaced storage key.

use std::sync::Arc;

use crate::error::SessionResult;
use crate::storage::KeyValueStorage;

/// Suffix appended to the configured prefix to form the token storage key.
/// This is a compatibility surface shared with existing deployments; changing
/// it orphans every stored token.
pub const AUTH_TOKEN_KEY_SUFFIX: &str = "_auth_token-persistence";

/// Persists one opaque token string in an injected key-value backend.
///
/// No in-memory caching: every call round-trips to the backend, so a write
/// from another execution context (a logout elsewhere) is visible on the next
/// read.
pub struct TokenPersistence<S: KeyValueStorage> {
    storage: Arc<S>,
    key: String,
}

impl<S: KeyValueStorage> TokenPersistence<S> {
    /// Create token persistence namespaced by the given prefix.
    pub fn new(storage: Arc<S>, storage_key_prefix: &str) -> Self {
        Self {
            storage,
            key: format!("{}{}", storage_key_prefix, AUTH_TOKEN_KEY_SUFFIX),
        }
    }

    /// The full namespaced storage key.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Get the stored token, or `""` when absent.
    ///
    /// Never fails: absence and backend errors both normalize to the empty
    /// string, which downstream validity checks treat as "no token".
    pub fn get_stored_token(&self) -> String {
        match self.storage.get_item(&self.key) {
            Ok(Some(token)) => token,
            Ok(None) | Err(_) => String::new(),
        }
    }

    /// Store a token, overwriting any previous value.
    ///
    /// The token is opaque bytes at this layer; no shape validation happens
    /// here.
    pub fn set_stored_token(&self, token: &str) -> SessionResult<()> {
        self.storage.set_item(&self.key, token)
    }

    /// Remove the stored token. No-op if absent.
    pub fn remove_stored_token(&self) -> SessionResult<()> {
        self.storage.remove_item(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryKeyValueStorage, MockKeyValueStorage};

    #[test]
    fn test_storage_key_format() {
        let storage = Arc::new(InMemoryKeyValueStorage::new());
        let persistence = TokenPersistence::new(storage.clone(), "myapp");

        assert_eq!(persistence.storage_key(), "myapp_auth_token-persistence");

        persistence.set_stored_token("token-1").unwrap();
        assert_eq!(
            storage.get_item("myapp_auth_token-persistence").unwrap(),
            Some("token-1".to_string())
        );
    }

    #[test]
    fn test_round_trip() {
        let storage = Arc::new(InMemoryKeyValueStorage::new());
        let persistence = TokenPersistence::new(storage, "myapp");

        persistence.set_stored_token("header.payload.signature").unwrap();
        assert_eq!(persistence.get_stored_token(), "header.payload.signature");
    }

    #[test]
    fn test_round_trip_token_containing_separator() {
        let storage = Arc::new(InMemoryKeyValueStorage::new());
        let persistence = TokenPersistence::new(storage, "myapp");

        persistence.set_stored_token("tok_en_with_underscores").unwrap();
        assert_eq!(persistence.get_stored_token(), "tok_en_with_underscores");
    }

    #[test]
    fn test_absent_token_is_empty_string() {
        let storage = Arc::new(InMemoryKeyValueStorage::new());
        let persistence = TokenPersistence::new(storage, "myapp");

        assert_eq!(persistence.get_stored_token(), "");
    }

    #[test]
    fn test_remove_then_get_is_empty() {
        let storage = Arc::new(InMemoryKeyValueStorage::new());
        let persistence = TokenPersistence::new(storage, "myapp");

        persistence.set_stored_token("token-1").unwrap();
        persistence.remove_stored_token().unwrap();
        assert_eq!(persistence.get_stored_token(), "");

        // Removing again stays a no-op.
        persistence.remove_stored_token().unwrap();
        assert_eq!(persistence.get_stored_token(), "");
    }

    #[test]
    fn test_overwrite_replaces_previous_token() {
        let storage = Arc::new(InMemoryKeyValueStorage::new());
        let persistence = TokenPersistence::new(storage, "myapp");

        persistence.set_stored_token("old").unwrap();
        persistence.set_stored_token("new").unwrap();
        assert_eq!(persistence.get_stored_token(), "new");
    }

    #[test]
    fn test_namespace_isolation() {
        let storage = Arc::new(InMemoryKeyValueStorage::new());
        let first = TokenPersistence::new(storage.clone(), "alpha");
        let second = TokenPersistence::new(storage, "beta");

        first.set_stored_token("alpha-token").unwrap();

        assert_eq!(second.get_stored_token(), "");
        assert_eq!(first.get_stored_token(), "alpha-token");
    }

    #[test]
    fn test_get_normalizes_backend_errors_to_empty() {
        let storage = Arc::new(MockKeyValueStorage::new());
        storage.add_item("myapp_auth_token-persistence", "token-1");
        storage.set_should_fail(true);

        let persistence = TokenPersistence::new(storage, "myapp");
        assert_eq!(persistence.get_stored_token(), "");
    }

    #[test]
    fn test_set_propagates_backend_errors() {
        let storage = Arc::new(MockKeyValueStorage::new());
        storage.set_should_fail(true);

        let persistence = TokenPersistence::new(storage, "myapp");
        assert!(persistence.set_stored_token("token-1").is_err());
        assert!(persistence.remove_stored_token().is_err());
    }
}
