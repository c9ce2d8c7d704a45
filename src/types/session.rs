//! Session Types
//!
//! Session metadata and the per-query detail snapshot.

use serde::{Deserialize, Serialize};

use crate::types::Claims;

/// Locally persisted session metadata, independent of the token itself.
///
/// The default value is the logged-out state: empty user id, zero
/// expiration, auth flow not completed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Identifier of the session's user.
    pub user_id: String,
    /// Remaining session lifetime in seconds. Only its sign matters to
    /// validity; the external flow that wrote it owns the exact meaning.
    pub expiration_seconds: i64,
    /// One-shot marker set when an authentication flow finishes. Reset by
    /// the next login attempt, outside this crate's ownership.
    pub auth_flow_completed: bool,
}

impl SessionMetadata {
    /// Create metadata for a live session.
    pub fn new(user_id: impl Into<String>, expiration_seconds: i64) -> Self {
        Self {
            user_id: user_id.into(),
            expiration_seconds,
            auth_flow_completed: false,
        }
    }

    /// Set the auth-flow-completed marker.
    pub fn with_auth_flow_completed(mut self, completed: bool) -> Self {
        self.auth_flow_completed = completed;
        self
    }
}

/// Snapshot combining session metadata and the stored token.
///
/// Built fresh on every query; never cached beyond a single call.
#[derive(Clone, PartialEq)]
pub struct SessionDetail {
    /// Identifier of the session's user.
    pub user_id: String,
    /// Remaining session lifetime in seconds.
    pub expiration_seconds: i64,
    /// The raw stored token.
    pub jwt: String,
    /// Claims decoded from the token, or `None` when the token did not
    /// decode. A session can be valid without decodable claims.
    pub claims: Option<Claims>,
}

impl SessionDetail {
    /// Check whether claims were successfully decoded from the token.
    pub fn has_claims(&self) -> bool {
        self.claims.is_some()
    }
}

impl std::fmt::Debug for SessionDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionDetail")
            .field("user_id", &self.user_id)
            .field("expiration_seconds", &self.expiration_seconds)
            .field("jwt", &"[REDACTED]")
            .field("claims", &self.claims)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_defaults_to_logged_out() {
        let metadata = SessionMetadata::default();
        assert!(metadata.user_id.is_empty());
        assert_eq!(metadata.expiration_seconds, 0);
        assert!(!metadata.auth_flow_completed);
    }

    #[test]
    fn test_metadata_builder() {
        let metadata = SessionMetadata::new("user-1", 3600).with_auth_flow_completed(true);
        assert_eq!(metadata.user_id, "user-1");
        assert_eq!(metadata.expiration_seconds, 3600);
        assert!(metadata.auth_flow_completed);
    }

    #[test]
    fn test_detail_debug_redacts_token() {
        let detail = SessionDetail {
            user_id: "user-1".to_string(),
            expiration_seconds: 3600,
            jwt: "header.payload.signature".to_string(),
            claims: None,
        };

        let rendered = format!("{:?}", detail);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("header.payload.signature"));
    }
}
