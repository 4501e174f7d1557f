//! Setting value types and the derived task-queue group

use crate::defaults;
use crate::logging::LogLevel;
use serde::de::Deserializer;
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dashboard auto-refresh interval entry
///
/// Declared as a `[seconds, label]` pair; serializes as a two-element array
/// to match the shape the host framework expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshInterval {
    /// Refresh period in seconds; `0` is the "don't refresh" sentinel
    pub seconds: u32,
    /// Human-readable label shown in the dashboard UI
    pub label: String,
}

impl RefreshInterval {
    /// Create a new refresh interval entry
    pub fn new<S: Into<String>>(seconds: u32, label: S) -> Self {
        Self {
            seconds,
            label: label.into(),
        }
    }

    /// Check whether this entry is the leading "don't refresh" sentinel
    pub fn is_sentinel(&self) -> bool {
        self.seconds == 0
    }
}

impl Serialize for RefreshInterval {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.seconds)?;
        tuple.serialize_element(&self.label)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for RefreshInterval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (seconds, label) = <(u32, String)>::deserialize(deserializer)?;
        Ok(Self { seconds, label })
    }
}

/// Task-queue (async query) configuration group
///
/// The broker and result-backend URLs are derived from the database URI and
/// cannot be set independently; constructing the group from a URI is the only
/// way to obtain them, which keeps them consistent by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQueueConfig {
    #[serde(rename = "BROKER_URL")]
    broker_url: String,
    #[serde(rename = "CELERY_IMPORTS")]
    imports: Vec<String>,
    #[serde(rename = "CELERY_RESULT_BACKEND")]
    result_backend_url: String,
    #[serde(rename = "CELERYD_LOG_LEVEL")]
    worker_log_level: LogLevel,
    #[serde(rename = "CELERYD_PREFETCH_MULTIPLIER")]
    prefetch_multiplier: u32,
    #[serde(rename = "CELERY_ACKS_LATE")]
    acks_late: bool,
}

impl TaskQueueConfig {
    /// Derive the task-queue configuration for the given database URI
    pub fn for_database_uri(database_uri: &str) -> Self {
        Self {
            broker_url: format!("{}{}", defaults::BROKER_URL_PREFIX, database_uri),
            imports: defaults::TASK_QUEUE_IMPORTS
                .iter()
                .map(|&s| s.to_string())
                .collect(),
            result_backend_url: format!("{}{}", defaults::RESULT_BACKEND_PREFIX, database_uri),
            worker_log_level: LogLevel::Info,
            prefetch_multiplier: defaults::TASK_QUEUE_PREFETCH_MULTIPLIER,
            acks_late: false,
        }
    }

    /// Broker connection URL (`"sqla+" + database URI`)
    pub fn broker_url(&self) -> &str {
        &self.broker_url
    }

    /// Result backend connection URL (`"db+" + database URI`)
    pub fn result_backend_url(&self) -> &str {
        &self.result_backend_url
    }

    /// Task modules imported by the queue workers
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Worker log level
    pub fn worker_log_level(&self) -> LogLevel {
        self.worker_log_level
    }

    /// Worker prefetch multiplier
    pub fn prefetch_multiplier(&self) -> u32 {
        self.prefetch_multiplier
    }

    /// Late-acknowledgement flag
    pub fn acks_late(&self) -> bool {
        self.acks_late
    }

    /// Check that both derived URLs match the given database URI
    pub fn is_consistent_with(&self, database_uri: &str) -> bool {
        self.broker_url == format!("{}{}", defaults::BROKER_URL_PREFIX, database_uri)
            && self.result_backend_url
                == format!("{}{}", defaults::RESULT_BACKEND_PREFIX, database_uri)
    }
}

/// Value union for a declared setting
///
/// Covers every value shape the schema uses: scalars, explicit null, the
/// feature-flag and cache maps, the refresh-interval list, and the nested
/// task-queue group. Serializes untagged so snapshots render as plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Int(i64),
    /// Log level (renders as its upper-case name)
    Level(LogLevel),
    /// String scalar
    Str(String),
    /// Explicit null (a declared setting with no value)
    Null,
    /// Feature-flag map: flag name to enabled state
    FlagMap(BTreeMap<String, bool>),
    /// String-valued map (cache configuration)
    StrMap(BTreeMap<String, String>),
    /// Dashboard refresh interval list
    Intervals(Vec<RefreshInterval>),
    /// Nested task-queue configuration group
    TaskQueue(TaskQueueConfig),
}

impl SettingValue {
    /// Build a string value
    pub fn str<S: Into<String>>(value: S) -> Self {
        Self::Str(value.into())
    }

    /// Build a feature-flag map from literal pairs
    pub fn flags(pairs: &[(&str, bool)]) -> Self {
        Self::FlagMap(
            pairs
                .iter()
                .map(|&(name, enabled)| (name.to_string(), enabled))
                .collect(),
        )
    }

    /// Build a string map from literal pairs
    pub fn str_map(pairs: &[(&str, &str)]) -> Self {
        Self::StrMap(
            pairs
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// Build a refresh-interval list from literal pairs
    pub fn intervals(pairs: &[(u32, &str)]) -> Self {
        Self::Intervals(
            pairs
                .iter()
                .map(|&(seconds, label)| RefreshInterval::new(seconds, label))
                .collect(),
        )
    }

    /// Get the value type name for display and consistency checks
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Level(_) => "log level",
            Self::Str(_) => "string",
            Self::Null => "null",
            Self::FlagMap(_) => "flag map",
            Self::StrMap(_) => "string map",
            Self::Intervals(_) => "interval list",
            Self::TaskQueue(_) => "task queue",
        }
    }

    /// Check whether two values have the same shape
    pub fn same_type(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Get the string content if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the boolean content if this is a boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the integer content if this is an integer value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Render a compact single-line representation for table output
    pub fn render(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Level(level) => level.as_str().to_string(),
            Self::Str(s) => s.clone(),
            Self::Null => "null".to_string(),
            Self::FlagMap(flags) => {
                let parts: Vec<String> = flags
                    .iter()
                    .map(|(name, enabled)| format!("{}={}", name, enabled))
                    .collect();
                parts.join(", ")
            }
            Self::StrMap(map) => {
                let parts: Vec<String> =
                    map.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                parts.join(", ")
            }
            Self::Intervals(intervals) => {
                let parts: Vec<String> = intervals
                    .iter()
                    .map(|i| format!("[{}, {}]", i.seconds, i.label))
                    .collect();
                parts.join(", ")
            }
            Self::TaskQueue(queue) => format!(
                "broker={}, backend={}",
                queue.broker_url(),
                queue.result_backend_url()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_queue_derivation() {
        let queue = TaskQueueConfig::for_database_uri("postgresql://db:5432/app");
        assert_eq!(queue.broker_url(), "sqla+postgresql://db:5432/app");
        assert_eq!(queue.result_backend_url(), "db+postgresql://db:5432/app");
        assert!(queue.is_consistent_with("postgresql://db:5432/app"));
        assert!(!queue.is_consistent_with("postgresql://other:5432/app"));
    }

    #[test]
    fn test_task_queue_defaults() {
        let queue = TaskQueueConfig::for_database_uri("sqlite://");
        assert_eq!(queue.imports(), &["superset.sql_lab".to_string()]);
        assert_eq!(queue.worker_log_level(), LogLevel::Info);
        assert_eq!(queue.prefetch_multiplier(), 1);
        assert!(!queue.acks_late());
    }

    #[test]
    fn test_task_queue_serialization_uses_framework_names() {
        let queue = TaskQueueConfig::for_database_uri("sqlite://");
        let json = serde_json::to_value(&queue).unwrap();
        assert_eq!(json["BROKER_URL"], "sqla+sqlite://");
        assert_eq!(json["CELERY_RESULT_BACKEND"], "db+sqlite://");
        assert_eq!(json["CELERYD_LOG_LEVEL"], "INFO");
        assert_eq!(json["CELERYD_PREFETCH_MULTIPLIER"], 1);
        assert_eq!(json["CELERY_ACKS_LATE"], false);
    }

    #[test]
    fn test_refresh_interval_serializes_as_pair() {
        let interval = RefreshInterval::new(30, "30 seconds");
        let json = serde_json::to_string(&interval).unwrap();
        assert_eq!(json, "[30,\"30 seconds\"]");

        let parsed: RefreshInterval = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, interval);
    }

    #[test]
    fn test_refresh_interval_sentinel() {
        assert!(RefreshInterval::new(0, "Don't refresh").is_sentinel());
        assert!(!RefreshInterval::new(10, "10 seconds").is_sentinel());
    }

    #[test]
    fn test_setting_value_type_names() {
        assert_eq!(SettingValue::Bool(true).type_name(), "boolean");
        assert_eq!(SettingValue::Null.type_name(), "null");
        assert_eq!(SettingValue::flags(&[("A", true)]).type_name(), "flag map");
    }

    #[test]
    fn test_setting_value_same_type() {
        assert!(SettingValue::Int(1).same_type(&SettingValue::Int(99)));
        assert!(!SettingValue::Int(1).same_type(&SettingValue::Bool(true)));
        assert!(SettingValue::str("a").same_type(&SettingValue::str("b")));
    }

    #[test]
    fn test_setting_value_untagged_serialization() {
        assert_eq!(serde_json::to_string(&SettingValue::Bool(true)).unwrap(), "true");
        assert_eq!(serde_json::to_string(&SettingValue::Int(300)).unwrap(), "300");
        assert_eq!(serde_json::to_string(&SettingValue::Null).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&SettingValue::str("change")).unwrap(),
            "\"change\""
        );
    }

    #[test]
    fn test_setting_value_render_compact() {
        let flags = SettingValue::flags(&[("DASHBOARD_RBAC", true)]);
        assert_eq!(flags.render(), "DASHBOARD_RBAC=true");

        let intervals = SettingValue::intervals(&[(0, "Don't refresh"), (10, "10 seconds")]);
        assert_eq!(intervals.render(), "[0, Don't refresh], [10, 10 seconds]");
    }
}
