//! Settings validation utilities and rules
//!
//! Resolution itself never rejects a value; everything declared resolves
//! verbatim. These checks run afterwards (`--check`, debug output) and
//! report invariant violations as errors and suspicious values as leveled
//! warnings.

use crate::{
    defaults,
    error::{AppError, Result},
    models::{keys, SettingValue, Settings},
};
use colored::*;

/// Severity of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationLevel {
    /// Informational note
    Info,
    /// Potentially problematic value
    Warning,
}

impl ValidationLevel {
    /// Get level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationLevel::Info => "INFO",
            ValidationLevel::Warning => "WARNING",
        }
    }
}

/// A single validation finding
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    /// Create a new validation finding
    pub fn new<S: Into<String>>(level: ValidationLevel, message: S) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Format the finding for display
    pub fn format(&self, enable_color: bool) -> String {
        if enable_color {
            let label = match self.level {
                ValidationLevel::Info => self.level.as_str().cyan(),
                ValidationLevel::Warning => self.level.as_str().yellow(),
            };
            format!("[{}] {}", label, self.message)
        } else {
            format!("[{}] {}", self.level.as_str(), self.message)
        }
    }
}

/// Settings validator with invariant and advisory checks
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate the snapshot's hard invariants
    pub fn validate(settings: &Settings) -> Result<()> {
        Self::validate_core_settings(settings)?;
        Self::validate_feature_flags(settings)?;
        Self::validate_task_queue_consistency(settings)?;
        Self::validate_refresh_intervals(settings)?;
        Ok(())
    }

    /// Validate invariants plus advisory checks, collecting leveled findings
    pub fn validate_comprehensive(settings: &Settings) -> Result<Vec<ValidationWarning>> {
        // Invariants first; a broken snapshot is an error, not a warning
        Self::validate(settings)?;

        let mut warnings = Vec::new();
        warnings.extend(Self::check_database_uri(settings));
        warnings.extend(Self::check_secret_key(settings));
        warnings.extend(Self::check_timeouts(settings));
        warnings.extend(Self::check_upload_paths(settings));

        Ok(warnings)
    }

    /// Check structural consistency between the two profiles
    ///
    /// The minimal profile must declare a subset of the full profile's
    /// names, and shared names must agree in value shape. Value differences
    /// (disabled flags, different cache type) are reported as findings.
    pub fn validate_profile_consistency(
        minimal: &Settings,
        full: &Settings,
    ) -> Result<Vec<ValidationWarning>> {
        let mut warnings = Vec::new();

        for (name, minimal_value) in minimal.iter() {
            let full_value = full.get(name).ok_or_else(|| {
                AppError::validation(format!(
                    "Minimal profile declares '{}' which the full profile does not",
                    name
                ))
            })?;

            if !minimal_value.same_type(full_value) {
                return Err(AppError::validation(format!(
                    "Setting '{}' is a {} in the minimal profile but a {} in the full profile",
                    name,
                    minimal_value.type_name(),
                    full_value.type_name()
                )));
            }

            if minimal_value != full_value {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Info,
                    format!("Minimal profile overrides '{}'", name),
                ));
            }
        }

        Ok(warnings)
    }

    /// The env-sourced settings every profile must declare
    fn validate_core_settings(settings: &Settings) -> Result<()> {
        if settings.database_uri().is_none() {
            return Err(AppError::validation(format!(
                "Setting '{}' must be declared as a string",
                keys::SQLALCHEMY_DATABASE_URI
            )));
        }
        if settings.secret_key().is_none() {
            return Err(AppError::validation(format!(
                "Setting '{}' must be declared as a string",
                keys::SECRET_KEY
            )));
        }
        Ok(())
    }

    /// Feature flags must be a map with only boolean values
    fn validate_feature_flags(settings: &Settings) -> Result<()> {
        match settings.get(keys::FEATURE_FLAGS) {
            Some(SettingValue::FlagMap(flags)) => {
                for name in flags.keys() {
                    if name.is_empty() {
                        return Err(AppError::validation("Feature flag with empty name"));
                    }
                }
                Ok(())
            }
            Some(other) => Err(AppError::validation(format!(
                "Setting '{}' must be a flag map, found {}",
                keys::FEATURE_FLAGS,
                other.type_name()
            ))),
            None => Ok(()),
        }
    }

    /// Derived task-queue URLs must stay consistent with the database URI
    fn validate_task_queue_consistency(settings: &Settings) -> Result<()> {
        let queue = match settings.task_queue() {
            Some(queue) => queue,
            None => return Ok(()),
        };
        let database_uri = settings.database_uri().unwrap_or_default();

        if !queue.is_consistent_with(database_uri) {
            return Err(AppError::validation(format!(
                "Task-queue URLs are not derived from the database URI: broker '{}' and \
                 result backend '{}' must be '{}{}' and '{}{}'",
                queue.broker_url(),
                queue.result_backend_url(),
                defaults::BROKER_URL_PREFIX,
                database_uri,
                defaults::RESULT_BACKEND_PREFIX,
                database_uri
            )));
        }
        Ok(())
    }

    /// Refresh intervals: leading zero sentinel, then strictly increasing
    fn validate_refresh_intervals(settings: &Settings) -> Result<()> {
        let intervals = match settings.refresh_intervals() {
            Some(intervals) => intervals,
            None => return Ok(()),
        };

        let first = intervals.first().ok_or_else(|| {
            AppError::validation("Dashboard refresh interval list must not be empty")
        })?;
        if !first.is_sentinel() {
            return Err(AppError::validation(
                "Dashboard refresh interval list must start with the 0 sentinel",
            ));
        }

        for entry in intervals {
            if entry.label.is_empty() {
                return Err(AppError::validation(format!(
                    "Dashboard refresh interval {} has an empty label",
                    entry.seconds
                )));
            }
        }

        for pair in intervals[1..].windows(2) {
            if pair[1].seconds <= pair[0].seconds {
                return Err(AppError::validation(format!(
                    "Dashboard refresh intervals must be strictly increasing: {} follows {}",
                    pair[1].seconds, pair[0].seconds
                )));
            }
        }

        Ok(())
    }

    /// Advisory checks on the database URI
    fn check_database_uri(settings: &Settings) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let uri = match settings.database_uri() {
            Some(uri) => uri,
            None => return warnings,
        };

        match url::Url::parse(uri) {
            Ok(parsed) => {
                if parsed.username() == "postgres" && parsed.password() == Some("postgres") {
                    warnings.push(ValidationWarning::new(
                        ValidationLevel::Warning,
                        "Database URI uses the stock postgres:postgres credentials",
                    ));
                }
                if parsed.scheme().starts_with("sqlite") {
                    warnings.push(ValidationWarning::new(
                        ValidationLevel::Info,
                        "SQLite database backend is not suitable for multi-user deployments",
                    ));
                }
            }
            Err(e) => {
                // Malformed URIs resolve anyway; the framework surfaces the
                // failure when it connects
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Warning,
                    format!("Database URI does not parse as a URI: {}", e),
                ));
            }
        }

        warnings
    }

    /// Advisory checks on the secret key
    fn check_secret_key(settings: &Settings) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let secret = match settings.secret_key() {
            Some(secret) => secret,
            None => return warnings,
        };

        if secret == defaults::DEFAULT_SECRET_KEY {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Secret key is the well-known default; set {} in production",
                    defaults::ENV_SECRET_KEY
                ),
            ));
        } else if secret.len() < 16 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                "Secret key is shorter than 16 characters",
            ));
        }

        warnings
    }

    /// Advisory checks on timeout settings
    fn check_timeouts(settings: &Settings) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        let webserver = settings.get(keys::WEBSERVER_TIMEOUT).and_then(SettingValue::as_int);
        let sqllab = settings.get(keys::SQLLAB_TIMEOUT).and_then(SettingValue::as_int);

        for (name, value) in [(keys::WEBSERVER_TIMEOUT, webserver), (keys::SQLLAB_TIMEOUT, sqllab)] {
            if let Some(value) = value {
                if value <= 0 {
                    warnings.push(ValidationWarning::new(
                        ValidationLevel::Warning,
                        format!("{} of {}s disables the timeout entirely", name, value),
                    ));
                }
            }
        }

        if let (Some(webserver), Some(sqllab)) = (webserver, sqllab) {
            if webserver < sqllab && !settings.declares(keys::CELERY_CONFIG) {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Info,
                    format!(
                        "Webserver timeout ({}s) is below the SQL Lab timeout ({}s) and no \
                         task queue is configured; long synchronous queries will be cut off",
                        webserver, sqllab
                    ),
                ));
            }
        }

        warnings
    }

    /// Advisory checks on upload directories
    fn check_upload_paths(settings: &Settings) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for name in [keys::UPLOAD_FOLDER, keys::CSV_TO_HIVE_UPLOAD_DIRECTORY] {
            if let Some(path) = settings.get(name).and_then(SettingValue::as_str) {
                if path.starts_with("/tmp") {
                    warnings.push(ValidationWarning::new(
                        ValidationLevel::Info,
                        format!("{} points under /tmp; uploads are lost on reboot", name),
                    ));
                }
            }
        }

        warnings
    }
}

/// Convenience function to run the comprehensive validation pass
pub fn validate_settings(settings: &Settings) -> Result<Vec<ValidationWarning>> {
    SettingsValidator::validate_comprehensive(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolver::build_profile;
    use crate::models::{Profile, RefreshInterval};

    fn full() -> Settings {
        build_profile(Profile::Full, defaults::DEFAULT_DATABASE_URI, "a-strong-secret-key").unwrap()
    }

    #[test]
    fn test_resolved_profiles_pass_invariants() {
        assert!(SettingsValidator::validate(&full()).is_ok());

        let minimal =
            build_profile(Profile::Minimal, defaults::DEFAULT_DATABASE_URI, "a-strong-secret-key")
                .unwrap();
        assert!(SettingsValidator::validate(&minimal).is_ok());
    }

    #[test]
    fn test_missing_database_uri_is_invalid() {
        let settings = Settings::new(Profile::Full);
        assert!(SettingsValidator::validate(&settings).is_err());
    }

    #[test]
    fn test_inconsistent_task_queue_rejected() {
        let mut settings = full();
        // Changing the URI through the proper surface keeps the derivation
        settings.set_database_uri("postgresql://db:5432/other");
        assert!(SettingsValidator::validate(&settings).is_ok());

        // A hand-built snapshot that pairs a queue with a different URI fails
        let mut broken = Settings::new(Profile::Full);
        broken
            .declare(keys::SQLALCHEMY_DATABASE_URI, SettingValue::str("sqlite://a"))
            .unwrap();
        broken.declare(keys::SECRET_KEY, SettingValue::str("s")).unwrap();
        broken
            .declare(
                keys::CELERY_CONFIG,
                SettingValue::TaskQueue(crate::models::TaskQueueConfig::for_database_uri(
                    "sqlite://b",
                )),
            )
            .unwrap();
        assert!(SettingsValidator::validate(&broken).is_err());
    }

    #[test]
    fn test_unsorted_refresh_intervals_rejected() {
        let mut settings = Settings::new(Profile::Full);
        settings
            .declare(keys::SQLALCHEMY_DATABASE_URI, SettingValue::str("sqlite://"))
            .unwrap();
        settings.declare(keys::SECRET_KEY, SettingValue::str("s")).unwrap();
        settings
            .declare(
                keys::DASHBOARD_AUTO_REFRESH_INTERVALS,
                SettingValue::Intervals(vec![
                    RefreshInterval::new(0, "Don't refresh"),
                    RefreshInterval::new(30, "30 seconds"),
                    RefreshInterval::new(10, "10 seconds"),
                ]),
            )
            .unwrap();

        assert!(SettingsValidator::validate(&settings).is_err());
    }

    #[test]
    fn test_missing_sentinel_rejected() {
        let mut settings = Settings::new(Profile::Full);
        settings
            .declare(keys::SQLALCHEMY_DATABASE_URI, SettingValue::str("sqlite://"))
            .unwrap();
        settings.declare(keys::SECRET_KEY, SettingValue::str("s")).unwrap();
        settings
            .declare(
                keys::DASHBOARD_AUTO_REFRESH_INTERVALS,
                SettingValue::Intervals(vec![RefreshInterval::new(10, "10 seconds")]),
            )
            .unwrap();

        assert!(SettingsValidator::validate(&settings).is_err());
    }

    #[test]
    fn test_default_credentials_flagged() {
        let warnings = SettingsValidator::validate_comprehensive(&full()).unwrap();
        assert!(warnings
            .iter()
            .any(|w| w.level == ValidationLevel::Warning
                && w.message.contains("postgres:postgres")));
    }

    #[test]
    fn test_default_secret_key_flagged() {
        let settings =
            build_profile(Profile::Full, defaults::DEFAULT_DATABASE_URI, defaults::DEFAULT_SECRET_KEY)
                .unwrap();
        let warnings = SettingsValidator::validate_comprehensive(&settings).unwrap();
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("well-known default")));
    }

    #[test]
    fn test_minimal_without_queue_notes_timeout_gap() {
        let minimal =
            build_profile(Profile::Minimal, defaults::DEFAULT_DATABASE_URI, "a-strong-secret-key")
                .unwrap();
        let warnings = SettingsValidator::validate_comprehensive(&minimal).unwrap();
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("no task queue is configured")));

        // The full profile configures the queue, so the note is absent
        let warnings = SettingsValidator::validate_comprehensive(&full()).unwrap();
        assert!(!warnings
            .iter()
            .any(|w| w.message.contains("no task queue is configured")));
    }

    #[test]
    fn test_profile_consistency_of_resolved_profiles() {
        let full = full();
        let minimal =
            build_profile(Profile::Minimal, defaults::DEFAULT_DATABASE_URI, "a-strong-secret-key")
                .unwrap();

        let warnings = SettingsValidator::validate_profile_consistency(&minimal, &full).unwrap();
        // Minimal overrides at least the feature flags, cache type, and rotation flag
        assert!(warnings.len() >= 3);
    }

    #[test]
    fn test_profile_consistency_rejects_extra_name() {
        let full = full();
        let mut minimal = Settings::new(Profile::Minimal);
        minimal
            .declare("NOT_IN_FULL_PROFILE", SettingValue::Bool(true))
            .unwrap();

        assert!(SettingsValidator::validate_profile_consistency(&minimal, &full).is_err());
    }

    #[test]
    fn test_profile_consistency_rejects_type_mismatch() {
        let full = full();
        let mut minimal = Settings::new(Profile::Minimal);
        minimal
            .declare(keys::WEBSERVER_TIMEOUT, SettingValue::str("60"))
            .unwrap();

        assert!(SettingsValidator::validate_profile_consistency(&minimal, &full).is_err());
    }

    #[test]
    fn test_warning_formatting() {
        let warning = ValidationWarning::new(ValidationLevel::Warning, "something odd");
        assert_eq!(warning.format(false), "[WARNING] something odd");
        assert!(warning.format(true).contains("something odd"));
    }
}
