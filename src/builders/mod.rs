//! Builders
//!
//! Fluent builders for configuration.

pub mod config;

pub use config::{session_config, SessionConfigBuilder};
