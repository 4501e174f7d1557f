//! Resolved settings snapshot and deployment profiles

use crate::error::{AppError, Result};
use crate::models::value::{RefreshInterval, SettingValue, TaskQueueConfig};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Setting names exposed to the host framework
pub mod keys {
    pub const SQLALCHEMY_DATABASE_URI: &str = "SQLALCHEMY_DATABASE_URI";
    pub const SECRET_KEY: &str = "SECRET_KEY";
    pub const FEATURE_FLAGS: &str = "FEATURE_FLAGS";
    pub const CACHE_CONFIG: &str = "CACHE_CONFIG";
    pub const CELERY_CONFIG: &str = "CELERY_CONFIG";
    pub const SQLLAB_CTAS_NO_LIMIT: &str = "SQLLAB_CTAS_NO_LIMIT";
    pub const SQLLAB_TIMEOUT: &str = "SQLLAB_TIMEOUT";
    pub const SQLLAB_DEFAULT_DBID: &str = "SQLLAB_DEFAULT_DBID";
    pub const CSV_TO_HIVE_UPLOAD_S3_BUCKET: &str = "CSV_TO_HIVE_UPLOAD_S3_BUCKET";
    pub const UPLOAD_FOLDER: &str = "UPLOAD_FOLDER";
    pub const CSV_TO_HIVE_UPLOAD_DIRECTORY: &str = "CSV_TO_HIVE_UPLOAD_DIRECTORY";
    pub const ENABLE_TIME_ROTATE: &str = "ENABLE_TIME_ROTATE";
    pub const TIME_ROTATE_LOG_LEVEL: &str = "TIME_ROTATE_LOG_LEVEL";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    pub const FILENAME: &str = "FILENAME";
    pub const SUPERSET_DASHBOARD_POSITION_DATA_LIMIT: &str =
        "SUPERSET_DASHBOARD_POSITION_DATA_LIMIT";
    pub const DASHBOARD_AUTO_REFRESH_MODE: &str = "DASHBOARD_AUTO_REFRESH_MODE";
    pub const DASHBOARD_AUTO_REFRESH_INTERVALS: &str = "DASHBOARD_AUTO_REFRESH_INTERVALS";
    pub const ROW_LEVEL_SECURITY_FILTERS_MAX_COUNT: &str = "ROW_LEVEL_SECURITY_FILTERS_MAX_COUNT";
    pub const WEBSERVER_TIMEOUT: &str = "WEBSERVER_TIMEOUT";
}

/// Deployment profile selecting which settings snapshot to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Complete settings surface with all features enabled
    Full,
    /// Reduced subset with several features disabled
    Minimal,
}

impl Profile {
    /// Get profile name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Full => "full",
            Profile::Minimal => "minimal",
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Profile::Full),
            "minimal" => Ok(Profile::Minimal),
            _ => Err(AppError::parse(format!(
                "Invalid profile '{}' (expected 'full' or 'minimal')",
                s
            ))),
        }
    }
}

/// Resolved settings snapshot for one profile
///
/// An ordered mapping from unique setting name to value, constructed once at
/// startup and read many times afterwards. Declaration order is preserved so
/// rendered output follows the shape of the deployed configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    profile: Profile,
    entries: Vec<(String, SettingValue)>,
}

impl Settings {
    /// Create an empty snapshot for the given profile
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            entries: Vec::new(),
        }
    }

    /// The profile this snapshot was resolved for
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Declare a setting
    ///
    /// Setting names are unique within a profile; re-declaring a name is an
    /// internal error.
    pub fn declare<S: Into<String>>(&mut self, name: S, value: SettingValue) -> Result<()> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(AppError::internal(format!(
                "Setting '{}' declared twice in {} profile",
                name, self.profile
            )));
        }
        self.entries.push((name, value));
        Ok(())
    }

    /// Look up a declared setting by name
    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Check whether a setting name is declared
    pub fn declares(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over declared settings in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Declared setting names in declaration order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Number of declared settings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that every name declared here is also declared in `other`
    pub fn names_subset_of(&self, other: &Settings) -> bool {
        self.iter().all(|(name, _)| other.declares(name))
    }

    /// Primary datastore connection string
    pub fn database_uri(&self) -> Option<&str> {
        self.get(keys::SQLALCHEMY_DATABASE_URI)?.as_str()
    }

    /// Session/crypto secret
    pub fn secret_key(&self) -> Option<&str> {
        self.get(keys::SECRET_KEY)?.as_str()
    }

    /// Feature-flag map
    pub fn feature_flags(&self) -> Option<&BTreeMap<String, bool>> {
        match self.get(keys::FEATURE_FLAGS) {
            Some(SettingValue::FlagMap(flags)) => Some(flags),
            _ => None,
        }
    }

    /// Task-queue configuration group, if this profile declares one
    pub fn task_queue(&self) -> Option<&TaskQueueConfig> {
        match self.get(keys::CELERY_CONFIG) {
            Some(SettingValue::TaskQueue(queue)) => Some(queue),
            _ => None,
        }
    }

    /// Dashboard auto-refresh intervals, if this profile declares them
    pub fn refresh_intervals(&self) -> Option<&[RefreshInterval]> {
        match self.get(keys::DASHBOARD_AUTO_REFRESH_INTERVALS) {
            Some(SettingValue::Intervals(intervals)) => Some(intervals.as_slice()),
            _ => None,
        }
    }

    /// Replace the database URI, recomputing every setting derived from it
    ///
    /// The task-queue broker and result-backend URLs are prefix derivations
    /// of the database URI and must never drift from it, so the whole group
    /// is rebuilt whenever the URI changes.
    pub fn set_database_uri<S: Into<String>>(&mut self, uri: S) {
        let uri = uri.into();
        let mut has_task_queue = false;

        for (name, value) in &mut self.entries {
            match name.as_str() {
                keys::SQLALCHEMY_DATABASE_URI => *value = SettingValue::Str(uri.clone()),
                keys::CELERY_CONFIG => has_task_queue = true,
                _ => {}
            }
        }

        if has_task_queue {
            for (name, value) in &mut self.entries {
                if name == keys::CELERY_CONFIG {
                    *value = SettingValue::TaskQueue(TaskQueueConfig::for_database_uri(&uri));
                }
            }
        }
    }

    /// Render the snapshot as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for Settings {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
