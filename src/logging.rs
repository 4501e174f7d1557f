//! Debug logging for the settings resolver
//!
//! Provides the log level type shared with the settings model (the
//! framework's log-level settings are declared with these values) and a
//! small timestamped console logger used in debug mode.

use crate::error::{AppError, Result};
use chrono::Utc;
use colored::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Log level enumeration
///
/// Doubles as the value type for the log-level settings the resolver
/// declares (worker log level, time-rotate log level), which is why it
/// serializes as the upper-case name the host framework expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug level - detailed information for debugging
    Debug = 0,
    /// Info level - general application information
    Info = 1,
    /// Warning level - potentially harmful situations
    Warn = 2,
    /// Error level - error events but application can continue
    Error = 3,
    /// Critical level - severe error events
    Critical = 4,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    /// Get display color for console output
    pub fn color(&self) -> Color {
        match self {
            LogLevel::Debug => Color::Cyan,
            LogLevel::Info => Color::Green,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Error => Color::Red,
            LogLevel::Critical => Color::Magenta,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" | "FATAL" => Ok(LogLevel::Critical),
            _ => Err(AppError::parse(format!("Invalid log level: {}", s))),
        }
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Console logger with timestamped output
pub struct Logger {
    name: String,
    min_level: LogLevel,
    use_color: bool,
}

impl Logger {
    /// Create a new logger
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            min_level: LogLevel::Info,
            use_color: true,
        }
    }

    /// Set minimum log level to output
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Enable or disable colored output
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Log a message at the given level
    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let label = if self.use_color {
            level.as_str().color(level.color()).to_string()
        } else {
            level.as_str().to_string()
        };

        eprintln!("{} [{}] {}: {}", timestamp, label, self.name, message);
    }

    /// Log a debug message
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Log an info message
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Log a warning message
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    /// Log an error message
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_log_level_round_trip() {
        for level in [
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
            LogLevel::Critical,
        ] {
            assert_eq!(LogLevel::from_str(level.as_str()).unwrap(), level);
        }
    }

    #[test]
    fn test_log_level_parsing_aliases() {
        assert_eq!(LogLevel::from_str("warn").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("warning").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("fatal").unwrap(), LogLevel::Critical);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_log_level_serializes_as_framework_name() {
        let json = serde_json::to_string(&LogLevel::Info).unwrap();
        assert_eq!(json, "\"INFO\"");

        let parsed: LogLevel = serde_json::from_str("\"WARNING\"").unwrap();
        assert_eq!(parsed, LogLevel::Warn);
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Error < LogLevel::Critical);
    }

    #[test]
    fn test_logger_respects_min_level() {
        // Only checks that logging below min level does not panic; output
        // goes to stderr and is not captured here.
        let logger = Logger::new("test").with_min_level(LogLevel::Error).with_color(false);
        logger.debug("suppressed");
        logger.error("emitted");
    }
}
