//! Session Core
//!
//! Session metadata store and the validity state machine.

pub mod manager;
pub mod state;

pub use manager::SessionManager;
#[cfg(feature = "jwt")]
pub use manager::DefaultSessionManager;
pub use state::{
    create_mock_session_state, MockSessionStateStore, SessionStateRecord, SessionStateStore,
    StoredSessionState, SESSION_STATE_KEY_SUFFIX,
};
