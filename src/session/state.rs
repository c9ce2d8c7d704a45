//! Session State Store
//!
//! Persisted session metadata with forced re-read semantics.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SessionResult, StorageError};
use crate::storage::KeyValueStorage;
use crate::types::SessionMetadata;

/// Suffix appended to the configured prefix to form the state storage key.
pub const SESSION_STATE_KEY_SUFFIX: &str = "_session-state";

/// Session state store interface (for dependency injection).
///
/// The backing persistence may change out of band (another execution
/// context, a fresh login), so accessor values are only defined immediately
/// after a [`read`](SessionStateStore::read) in the same logical operation.
pub trait SessionStateStore: Send + Sync {
    /// Force a reload of session metadata from backing persistence.
    fn read(&self) -> SessionResult<()>;

    /// User id from the last `read`.
    fn user_id(&self) -> String;

    /// Expiration seconds from the last `read`.
    fn expiration_seconds(&self) -> i64;

    /// Auth-flow-completed flag from the last `read`.
    fn auth_flow_completed(&self) -> bool;

    /// Persist new session metadata, replacing the previous record.
    fn write(&self, metadata: &SessionMetadata) -> SessionResult<()>;

    /// Delete the persisted record, returning to the logged-out state.
    fn clear(&self) -> SessionResult<()>;
}

/// The JSON document persisted by [`StoredSessionState`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionStateRecord {
    /// Identifier of the session's user.
    pub user_id: String,
    /// Remaining session lifetime in seconds.
    pub expiration_seconds: i64,
    /// One-shot auth-flow-completed marker.
    pub auth_flow_completed: bool,
    /// When the record was written.
    pub stored_at: DateTime<Utc>,
}

impl From<SessionStateRecord> for SessionMetadata {
    fn from(record: SessionStateRecord) -> Self {
        Self {
            user_id: record.user_id,
            expiration_seconds: record.expiration_seconds,
            auth_flow_completed: record.auth_flow_completed,
        }
    }
}

/// Session state store backed by an injected key-value backend.
///
/// The record lives under `"<prefix>_session-state"` as JSON. An absent or
/// unparseable record reads as the logged-out defaults; only backend
/// unavailability surfaces as an error.
pub struct StoredSessionState<S: KeyValueStorage> {
    storage: Arc<S>,
    key: String,
    current: Mutex<SessionMetadata>,
}

impl<S: KeyValueStorage> StoredSessionState<S> {
    /// Create a state store namespaced by the given prefix.
    pub fn new(storage: Arc<S>, storage_key_prefix: &str) -> Self {
        Self {
            storage,
            key: format!("{}{}", storage_key_prefix, SESSION_STATE_KEY_SUFFIX),
            current: Mutex::new(SessionMetadata::default()),
        }
    }

    /// The full namespaced storage key.
    pub fn storage_key(&self) -> &str {
        &self.key
    }
}

impl<S: KeyValueStorage> SessionStateStore for StoredSessionState<S> {
    fn read(&self) -> SessionResult<()> {
        let raw = self.storage.get_item(&self.key)?;

        let metadata = raw
            .and_then(|json| serde_json::from_str::<SessionStateRecord>(&json).ok())
            .map(SessionMetadata::from)
            .unwrap_or_default();

        *self.current.lock().unwrap() = metadata;
        Ok(())
    }

    fn user_id(&self) -> String {
        self.current.lock().unwrap().user_id.clone()
    }

    fn expiration_seconds(&self) -> i64 {
        self.current.lock().unwrap().expiration_seconds
    }

    fn auth_flow_completed(&self) -> bool {
        self.current.lock().unwrap().auth_flow_completed
    }

    fn write(&self, metadata: &SessionMetadata) -> SessionResult<()> {
        let record = SessionStateRecord {
            user_id: metadata.user_id.clone(),
            expiration_seconds: metadata.expiration_seconds,
            auth_flow_completed: metadata.auth_flow_completed,
            stored_at: Utc::now(),
        };

        let json = serde_json::to_string(&record).map_err(|e| StorageError::WriteFailed {
            message: e.to_string(),
        })?;

        self.storage.set_item(&self.key, &json)?;
        *self.current.lock().unwrap() = metadata.clone();
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        self.storage.remove_item(&self.key)?;
        *self.current.lock().unwrap() = SessionMetadata::default();
        Ok(())
    }
}

/// Mock session state store for testing.
#[derive(Default)]
pub struct MockSessionStateStore {
    metadata: Mutex<SessionMetadata>,
    read_count: Mutex<u32>,
    write_history: Mutex<Vec<SessionMetadata>>,
    next_error: Mutex<Option<crate::error::SessionError>>,
    should_fail: Mutex<bool>,
}

impl MockSessionStateStore {
    /// Create new mock state store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the metadata subsequent reads will surface.
    pub fn set_metadata(&self, metadata: SessionMetadata) -> &Self {
        *self.metadata.lock().unwrap() = metadata;
        self
    }

    /// Set next error to return from `read`/`write`/`clear`.
    pub fn set_next_error(&self, error: crate::error::SessionError) -> &Self {
        *self.next_error.lock().unwrap() = Some(error);
        self
    }

    /// Set the store to fail all operations.
    pub fn set_should_fail(&self, should_fail: bool) -> &Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    /// Number of `read` calls observed.
    pub fn read_count(&self) -> u32 {
        *self.read_count.lock().unwrap()
    }

    /// Get write history.
    pub fn get_write_history(&self) -> Vec<SessionMetadata> {
        self.write_history.lock().unwrap().clone()
    }

    fn check_error(&self) -> SessionResult<()> {
        if *self.should_fail.lock().unwrap() {
            return Err(crate::error::SessionError::Storage(
                StorageError::Unavailable {
                    message: "Mock state store failure".to_string(),
                },
            ));
        }

        if let Some(error) = self.next_error.lock().unwrap().take() {
            return Err(error);
        }

        Ok(())
    }
}

impl SessionStateStore for MockSessionStateStore {
    fn read(&self) -> SessionResult<()> {
        self.check_error()?;
        *self.read_count.lock().unwrap() += 1;
        Ok(())
    }

    fn user_id(&self) -> String {
        self.metadata.lock().unwrap().user_id.clone()
    }

    fn expiration_seconds(&self) -> i64 {
        self.metadata.lock().unwrap().expiration_seconds
    }

    fn auth_flow_completed(&self) -> bool {
        self.metadata.lock().unwrap().auth_flow_completed
    }

    fn write(&self, metadata: &SessionMetadata) -> SessionResult<()> {
        self.check_error()?;
        self.write_history.lock().unwrap().push(metadata.clone());
        *self.metadata.lock().unwrap() = metadata.clone();
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        self.check_error()?;
        *self.metadata.lock().unwrap() = SessionMetadata::default();
        Ok(())
    }
}

/// Create mock session state store for testing.
pub fn create_mock_session_state() -> MockSessionStateStore {
    MockSessionStateStore::new()
}
