//! Telemetry
//!
//! Structured logging for session operations.

pub mod logging;

pub use logging::{
    create_console_logger, create_in_memory_logger, no_op_logger, ConsoleLogger, InMemoryLogger,
    LogEntry, LogLevel, Logger, NoOpLogger, SessionLogContext,
};
