//! Session Manager
//!
//! Composes token persistence, the session state store and a token decoder
//! into a validity decision and a detail view.

use std::sync::Arc;

use crate::error::SessionResult;
use crate::session::state::SessionStateStore;
#[cfg(feature = "jwt")]
use crate::session::state::StoredSessionState;
use crate::storage::KeyValueStorage;
#[cfg(feature = "jwt")]
use crate::storage::InMemoryKeyValueStorage;
use crate::telemetry::{Logger, NoOpLogger, SessionLogContext};
#[cfg(feature = "jwt")]
use crate::token::JwtTokenDecoder;
use crate::token::{TokenDecoder, TokenPersistence};
use crate::types::{SessionConfig, SessionDetail};

/// Session manager wired with the default in-memory components.
#[cfg(feature = "jwt")]
pub type DefaultSessionManager =
    SessionManager<InMemoryKeyValueStorage, StoredSessionState<InMemoryKeyValueStorage>, JwtTokenDecoder>;

/// Session manager answering "is there a currently valid session".
///
/// A session is valid iff the metadata's expiration is positive, the user id
/// is non-empty and a token is present. Whether the token's claims decode has
/// no bearing on validity; see [`get`](SessionManager::get).
///
/// Metadata is force-re-read from its backing store on every query, so a
/// concurrent mutation (a logout from another execution context) is visible
/// after at most one store round-trip.
pub struct SessionManager<KV: KeyValueStorage, ST: SessionStateStore, D: TokenDecoder> {
    config: SessionConfig,
    tokens: TokenPersistence<KV>,
    state: Arc<ST>,
    decoder: Arc<D>,
    logger: Arc<dyn Logger>,
}

#[cfg(feature = "jwt")]
impl DefaultSessionManager {
    /// Create a session manager with default implementations: in-memory
    /// storage, a key-value-backed state store and the JWT decoder.
    pub fn new(config: SessionConfig) -> Self {
        let storage = Arc::new(InMemoryKeyValueStorage::new());
        let state = Arc::new(StoredSessionState::new(
            storage.clone(),
            &config.storage_key_prefix,
        ));

        Self::with_components(config, storage, state, Arc::new(JwtTokenDecoder::new()))
    }
}

impl<KV: KeyValueStorage, ST: SessionStateStore, D: TokenDecoder> SessionManager<KV, ST, D> {
    /// Create a manager with custom implementations. Components arrive as
    /// `Arc`s so callers can keep handles for their own flows (storing a
    /// token at login, clearing state at logout).
    pub fn with_components(
        config: SessionConfig,
        storage: Arc<KV>,
        state: Arc<ST>,
        decoder: Arc<D>,
    ) -> Self {
        let tokens = TokenPersistence::new(storage, &config.storage_key_prefix);

        Self {
            config,
            tokens,
            state,
            decoder,
            logger: Arc::new(NoOpLogger),
        }
    }

    /// Replace the logger.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Get the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Access token persistence, e.g. for a login flow storing a fresh token.
    pub fn tokens(&self) -> &TokenPersistence<KV> {
        &self.tokens
    }

    /// Access the session state store, e.g. for a login flow writing
    /// metadata.
    pub fn state(&self) -> &ST {
        &self.state
    }

    /// Retrieve the session detail, or `None` when no valid session exists.
    ///
    /// Forces a fresh metadata read, loads the stored token, and attempts to
    /// decode it. A token that fails to decode still counts as present: the
    /// detail carries the raw token with `claims = None`, and validity is
    /// decided on the raw fields alone. Only backing-store unavailability
    /// surfaces as an error.
    pub fn get(&self) -> SessionResult<Option<SessionDetail>> {
        self.state.read()?;

        let user_id = self.state.user_id();
        let expiration_seconds = self.state.expiration_seconds();
        let jwt = self.tokens.get_stored_token();

        let claims = if jwt.is_empty() {
            None
        } else {
            match self.decoder.decode(&jwt) {
                Ok(claims) => Some(claims),
                Err(error) => {
                    self.logger.warn(
                        "stored token failed to decode, continuing without claims",
                        &SessionLogContext::new()
                            .operation("get")
                            .storage_key(self.tokens.storage_key())
                            .extra("error_code", error.error_code()),
                    );
                    None
                }
            }
        };

        let detail = SessionDetail {
            user_id,
            expiration_seconds,
            jwt,
            claims,
        };

        if Self::validate(&detail) {
            Ok(Some(detail))
        } else {
            Ok(None)
        }
    }

    /// Check if there is a currently valid session.
    pub fn is_valid(&self) -> SessionResult<bool> {
        Ok(self.get()?.is_some())
    }

    /// Check if the user is logged in. Alias of
    /// [`is_valid`](SessionManager::is_valid), kept for call-site
    /// readability.
    pub fn is_logged_in(&self) -> SessionResult<bool> {
        self.is_valid()
    }

    /// Check if the auth flow is completed. The flag resets on the next
    /// login attempt; the external flow writing the metadata owns that
    /// reset.
    pub fn is_auth_flow_completed(&self) -> SessionResult<bool> {
        self.state.read()?;
        Ok(self.state.auth_flow_completed())
    }

    fn validate(detail: &SessionDetail) -> bool {
        if detail.expiration_seconds <= 0 {
            return false;
        }

        if detail.user_id.is_empty() {
            return false;
        }

        if detail.jwt.is_empty() {
            return false;
        }

        true
    }
}
