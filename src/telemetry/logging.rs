//! Logging
//!
//! Structured logging for session operations.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    Info,
    /// Warn level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Session log context.
///
/// Never carries the token itself; the storage key is the closest identifier
/// that is safe to log.
#[derive(Debug, Clone, Default)]
pub struct SessionLogContext {
    /// Operation name.
    pub operation: Option<String>,
    /// Storage key involved.
    pub storage_key: Option<String>,
    /// User id, when known.
    pub user_id: Option<String>,
    /// Additional context.
    pub extra: HashMap<String, String>,
}

impl SessionLogContext {
    /// Create new log context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set operation.
    pub fn operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Set storage key.
    pub fn storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = Some(storage_key.into());
        self
    }

    /// Set user id.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Add extra context.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Logger interface.
///
/// Implementors provide [`log`](Logger::log) and
/// [`is_enabled`](Logger::is_enabled); the per-level methods are
/// conveniences on top.
pub trait Logger: Send + Sync {
    /// Log a message at the given level.
    fn log(&self, level: LogLevel, message: &str, context: &SessionLogContext);

    /// Check if a log level is enabled.
    fn is_enabled(&self, level: LogLevel) -> bool;

    /// Log at trace level.
    fn trace(&self, message: &str, context: &SessionLogContext) {
        self.log(LogLevel::Trace, message, context);
    }

    /// Log at debug level.
    fn debug(&self, message: &str, context: &SessionLogContext) {
        self.log(LogLevel::Debug, message, context);
    }

    /// Log at info level.
    fn info(&self, message: &str, context: &SessionLogContext) {
        self.log(LogLevel::Info, message, context);
    }

    /// Log at warn level.
    fn warn(&self, message: &str, context: &SessionLogContext) {
        self.log(LogLevel::Warn, message, context);
    }

    /// Log at error level.
    fn error(&self, message: &str, context: &SessionLogContext) {
        self.log(LogLevel::Error, message, context);
    }
}

/// No-op logger implementation.
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn log(&self, _level: LogLevel, _message: &str, _context: &SessionLogContext) {}

    fn is_enabled(&self, _level: LogLevel) -> bool {
        false
    }
}

/// No-op logger singleton.
pub fn no_op_logger() -> NoOpLogger {
    NoOpLogger
}

/// Log entry captured by [`InMemoryLogger`].
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub context: SessionLogContext,
    pub timestamp: u64,
}

/// In-memory logger for testing.
pub struct InMemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
    min_level: LogLevel,
}

impl InMemoryLogger {
    /// Create new in-memory logger.
    pub fn new() -> Self {
        Self::with_level(LogLevel::Trace)
    }

    /// Create in-memory logger with minimum level.
    pub fn with_level(min_level: LogLevel) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            min_level,
        }
    }

    /// Get all log entries.
    pub fn get_entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Get entries by level.
    pub fn get_entries_by_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

impl Default for InMemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for InMemoryLogger {
    fn log(&self, level: LogLevel, message: &str, context: &SessionLogContext) {
        if !self.is_enabled(level) {
            return;
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        self.entries.lock().unwrap().push(LogEntry {
            level,
            message: message.to_string(),
            context: context.clone(),
            timestamp: now,
        });
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

/// Console logger writing key=value lines to stdout, warnings and errors to
/// stderr.
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    /// Create new console logger.
    pub fn new() -> Self {
        Self::with_level(LogLevel::Info)
    }

    /// Create console logger with minimum level.
    pub fn with_level(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    fn format_line(level: LogLevel, message: &str, context: &SessionLogContext) -> String {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let mut line = format!("[{}] {} {}", timestamp, level, message);

        if let Some(operation) = &context.operation {
            line.push_str(&format!(" operation={}", operation));
        }
        if let Some(storage_key) = &context.storage_key {
            line.push_str(&format!(" storage_key={}", storage_key));
        }
        if let Some(user_id) = &context.user_id {
            line.push_str(&format!(" user_id={}", user_id));
        }
        for (key, value) in &context.extra {
            line.push_str(&format!(" {}={}", key, value));
        }

        line
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str, context: &SessionLogContext) {
        if !self.is_enabled(level) {
            return;
        }

        let line = Self::format_line(level, message, context);
        if level >= LogLevel::Warn {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

/// Create in-memory logger for testing.
pub fn create_in_memory_logger() -> InMemoryLogger {
    InMemoryLogger::new()
}

/// Create console logger.
pub fn create_console_logger() -> ConsoleLogger {
    ConsoleLogger::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Error > LogLevel::Warn);
        assert!(LogLevel::Warn > LogLevel::Info);
        assert!(LogLevel::Info > LogLevel::Debug);
        assert!(LogLevel::Debug > LogLevel::Trace);
    }

    #[test]
    fn test_in_memory_logger() {
        let logger = InMemoryLogger::new();
        let context = SessionLogContext::new()
            .operation("get")
            .storage_key("myapp_auth_token-persistence");

        logger.info("session detail assembled", &context);
        logger.warn("stored token failed to decode", &context);

        let entries = logger.get_entries();
        assert_eq!(entries.len(), 2);

        let warnings = logger.get_entries_by_level(LogLevel::Warn);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "stored token failed to decode");
    }

    #[test]
    fn test_log_context_builder() {
        let context = SessionLogContext::new()
            .operation("get")
            .storage_key("myapp_session-state")
            .user_id("user-1")
            .extra("error_code", "SESSION_DECODE");

        assert_eq!(context.operation, Some("get".to_string()));
        assert_eq!(context.user_id, Some("user-1".to_string()));
        assert_eq!(
            context.extra.get("error_code"),
            Some(&"SESSION_DECODE".to_string())
        );
    }

    #[test]
    fn test_min_level_filtering() {
        let logger = InMemoryLogger::with_level(LogLevel::Warn);
        let context = SessionLogContext::new();

        logger.trace("trace", &context);
        logger.debug("debug", &context);
        logger.info("info", &context);
        logger.warn("warn", &context);
        logger.error("error", &context);

        assert_eq!(logger.get_entries().len(), 2);
    }

    #[test]
    fn test_console_line_format() {
        let context = SessionLogContext::new()
            .operation("get")
            .extra("error_code", "SESSION_DECODE");

        let line = ConsoleLogger::format_line(LogLevel::Warn, "decode failed", &context);
        assert!(line.contains("WARN decode failed"));
        assert!(line.contains("operation=get"));
        assert!(line.contains("error_code=SESSION_DECODE"));
    }

    #[test]
    fn test_no_op_logger_disabled() {
        let logger = no_op_logger();
        assert!(!logger.is_enabled(LogLevel::Error));
    }
}
