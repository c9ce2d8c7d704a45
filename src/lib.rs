//! Session Integration Module
//!
//! Client-side session state management for an authenticated application:
//! persists an opaque bearer token and session metadata, decodes the token to
//! extract identity claims, and answers whether a session is currently valid.
//!
//! # Features
//!
//! - Namespaced bearer-token persistence over a pluggable key-value backend
//! - Session metadata store with forced re-read semantics (no caching; a
//!   concurrent logout elsewhere is visible after one store round-trip)
//! - JWT claims extraction without signature verification (claims are
//!   informational at this layer; a token that fails to decode still counts
//!   as present)
//! - Deterministic validity rules: positive expiration, non-empty user id,
//!   non-empty token
//!
//! # Example
//!
//! ```rust,ignore
//! use session_integration::{session_config, DefaultSessionManager, SessionMetadata};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = session_config().storage_key_prefix("myapp").build()?;
//!     let manager = DefaultSessionManager::new(config);
//!
//!     // A login flow stores metadata and the freshly issued token.
//!     manager.state().write(&SessionMetadata::new("user-123", 3600))?;
//!     manager.tokens().set_stored_token("eyJhbGciOi...")?;
//!
//!     if manager.is_logged_in()? {
//!         let detail = manager.get()?.expect("session is valid");
//!         println!("user: {}", detail.user_id);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The module is organized into several sub-modules:
//!
//! - `types`: session data structures and configuration types
//! - `error`: error hierarchy with telemetry codes
//! - `storage`: key-value storage capability interface and implementations
//! - `token`: token persistence and claims decoding
//! - `session`: session state store and the session manager
//! - `builders`: fluent builder for configuration
//! - `telemetry`: structured logging

pub mod builders;
pub mod error;
pub mod session;
pub mod storage;
pub mod telemetry;
pub mod token;
pub mod types;

// Re-export builders
pub use builders::{session_config, SessionConfigBuilder};

// Re-export errors
pub use error::{
    ConfigurationError, DecodeError, SessionError, SessionResult, StorageError,
};

// Re-export types
pub use types::{Claims, SessionConfig, SessionDetail, SessionMetadata};

// Re-export storage
pub use storage::{
    create_in_memory_storage, create_mock_storage, InMemoryKeyValueStorage, KeyValueStorage,
    MockKeyValueStorage,
};

// Re-export token handling
#[cfg(feature = "jwt")]
pub use token::JwtTokenDecoder;
pub use token::{
    create_mock_token_decoder, MockTokenDecoder, TokenDecoder, TokenPersistence,
    AUTH_TOKEN_KEY_SUFFIX,
};

// Re-export session core
#[cfg(feature = "jwt")]
pub use session::DefaultSessionManager;
pub use session::{
    create_mock_session_state, MockSessionStateStore, SessionManager, SessionStateRecord,
    SessionStateStore, StoredSessionState, SESSION_STATE_KEY_SUFFIX,
};

// Re-export telemetry
pub use telemetry::{
    create_console_logger, create_in_memory_logger, no_op_logger, ConsoleLogger, InMemoryLogger,
    LogEntry, LogLevel, Logger, NoOpLogger, SessionLogContext,
};
