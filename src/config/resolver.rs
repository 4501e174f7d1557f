//! Settings resolution from profile defaults, environment, and CLI arguments

use crate::{
    cli::Cli,
    config::env::EnvManager,
    defaults,
    error::Result,
    logging::LogLevel,
    models::{keys, Profile, SettingValue, Settings, TaskQueueConfig},
};

/// Settings resolver that combines profile defaults with environment
/// variables and CLI argument overrides
pub struct SettingsResolver {
    cli: Cli,
}

impl SettingsResolver {
    /// Create a new resolver with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Resolve the complete settings snapshot
    pub fn resolve(&self) -> Result<Settings> {
        // Load from environment file if it exists
        self.load_env_file()?;

        // Environment variables over literal defaults
        let mut database_uri =
            EnvManager::resolve_var(defaults::ENV_DATABASE_URI, defaults::DEFAULT_DATABASE_URI);
        let mut secret_key =
            EnvManager::resolve_var(defaults::ENV_SECRET_KEY, defaults::DEFAULT_SECRET_KEY);

        // CLI arguments over environment
        if let Some(ref uri) = self.cli.database_uri {
            database_uri = uri.clone();
        }
        if let Some(ref key) = self.cli.secret_key {
            secret_key = key.clone();
        }

        let settings = build_profile(self.cli.profile, &database_uri, &secret_key)?;

        if self.cli.debug {
            println!("Resolved {} settings for {} profile", settings.len(), settings.profile());
            println!("  Database URI: {}", database_uri);
            if let Some(queue) = settings.task_queue() {
                println!("  Task-queue broker: {}", queue.broker_url());
                println!("  Task-queue result backend: {}", queue.result_backend_url());
            }
        }

        Ok(settings)
    }

    /// Load .env file if it exists
    fn load_env_file(&self) -> Result<()> {
        EnvManager::load_env_file(self.cli.debug)
    }
}

/// Resolve a profile snapshot from the process environment alone
///
/// The library entry point: environment variables (set and non-empty) win
/// over the literal defaults, exactly as the host framework's bootstrap
/// expects. Absence of either variable is a normal case, never an error.
pub fn resolve_profile(profile: Profile) -> Result<Settings> {
    let database_uri =
        EnvManager::resolve_var(defaults::ENV_DATABASE_URI, defaults::DEFAULT_DATABASE_URI);
    let secret_key =
        EnvManager::resolve_var(defaults::ENV_SECRET_KEY, defaults::DEFAULT_SECRET_KEY);

    build_profile(profile, &database_uri, &secret_key)
}

/// Build the settings snapshot for a profile from already-resolved inputs
pub fn build_profile(profile: Profile, database_uri: &str, secret_key: &str) -> Result<Settings> {
    match profile {
        Profile::Full => build_full(database_uri, secret_key),
        Profile::Minimal => build_minimal(database_uri, secret_key),
    }
}

/// Full deployment profile: the complete settings surface
fn build_full(database_uri: &str, secret_key: &str) -> Result<Settings> {
    let mut settings = Settings::new(Profile::Full);

    // Database and security
    settings.declare(keys::SQLALCHEMY_DATABASE_URI, SettingValue::str(database_uri))?;
    settings.declare(keys::SECRET_KEY, SettingValue::str(secret_key))?;

    // Feature flags
    settings.declare(
        keys::FEATURE_FLAGS,
        SettingValue::flags(defaults::FULL_FEATURE_FLAGS),
    )?;

    // Cache backend
    settings.declare(
        keys::CACHE_CONFIG,
        SettingValue::str_map(&[("CACHE_TYPE", defaults::CACHE_TYPE_FULL)]),
    )?;

    // Task queue for async queries, derived from the database URI
    settings.declare(
        keys::CELERY_CONFIG,
        SettingValue::TaskQueue(TaskQueueConfig::for_database_uri(database_uri)),
    )?;

    // SQL Lab
    settings.declare(keys::SQLLAB_CTAS_NO_LIMIT, SettingValue::Bool(true))?;
    settings.declare(
        keys::SQLLAB_TIMEOUT,
        SettingValue::Int(defaults::SQLLAB_TIMEOUT_SECONDS as i64),
    )?;
    settings.declare(keys::SQLLAB_DEFAULT_DBID, SettingValue::Null)?;

    // CSV uploads
    settings.declare(keys::CSV_TO_HIVE_UPLOAD_S3_BUCKET, SettingValue::Null)?;
    settings.declare(keys::UPLOAD_FOLDER, SettingValue::str(defaults::UPLOAD_FOLDER))?;
    settings.declare(
        keys::CSV_TO_HIVE_UPLOAD_DIRECTORY,
        SettingValue::str(defaults::CSV_UPLOAD_DIRECTORY),
    )?;

    // Logging with time-based rotation
    settings.declare(keys::ENABLE_TIME_ROTATE, SettingValue::Bool(true))?;
    settings.declare(keys::TIME_ROTATE_LOG_LEVEL, SettingValue::Level(LogLevel::Info))?;
    settings.declare(keys::LOG_LEVEL, SettingValue::Level(LogLevel::Info))?;
    settings.declare(keys::FILENAME, SettingValue::str(defaults::LOG_FILENAME))?;

    // Dashboard and chart configuration
    settings.declare(
        keys::SUPERSET_DASHBOARD_POSITION_DATA_LIMIT,
        SettingValue::Int(defaults::DASHBOARD_POSITION_DATA_LIMIT),
    )?;
    settings.declare(
        keys::DASHBOARD_AUTO_REFRESH_MODE,
        SettingValue::str(defaults::DASHBOARD_AUTO_REFRESH_MODE),
    )?;
    settings.declare(
        keys::DASHBOARD_AUTO_REFRESH_INTERVALS,
        SettingValue::intervals(defaults::DASHBOARD_AUTO_REFRESH_INTERVALS),
    )?;

    // Row level security
    settings.declare(
        keys::ROW_LEVEL_SECURITY_FILTERS_MAX_COUNT,
        SettingValue::Int(defaults::ROW_LEVEL_SECURITY_FILTERS_MAX_COUNT),
    )?;

    // Webserver
    settings.declare(
        keys::WEBSERVER_TIMEOUT,
        SettingValue::Int(defaults::WEBSERVER_TIMEOUT_SECONDS as i64),
    )?;

    Ok(settings)
}

/// Minimal deployment profile: reduced subset with several features disabled
fn build_minimal(database_uri: &str, secret_key: &str) -> Result<Settings> {
    let mut settings = Settings::new(Profile::Minimal);

    settings.declare(keys::SQLALCHEMY_DATABASE_URI, SettingValue::str(database_uri))?;
    settings.declare(keys::SECRET_KEY, SettingValue::str(secret_key))?;

    // Template processing disabled for initial setup
    settings.declare(
        keys::FEATURE_FLAGS,
        SettingValue::flags(defaults::MINIMAL_FEATURE_FLAGS),
    )?;

    settings.declare(
        keys::CACHE_CONFIG,
        SettingValue::str_map(&[("CACHE_TYPE", defaults::CACHE_TYPE_MINIMAL)]),
    )?;

    settings.declare(
        keys::SQLLAB_TIMEOUT,
        SettingValue::Int(defaults::SQLLAB_TIMEOUT_SECONDS as i64),
    )?;

    // CSV upload disabled
    settings.declare(keys::CSV_TO_HIVE_UPLOAD_S3_BUCKET, SettingValue::Null)?;

    // Plain logging without file rotation
    settings.declare(keys::ENABLE_TIME_ROTATE, SettingValue::Bool(false))?;
    settings.declare(keys::LOG_LEVEL, SettingValue::Level(LogLevel::Info))?;

    settings.declare(
        keys::WEBSERVER_TIMEOUT,
        SettingValue::Int(defaults::WEBSERVER_TIMEOUT_SECONDS as i64),
    )?;

    Ok(settings)
}

/// Convenience function to load the complete settings snapshot from CLI arguments
pub fn load_settings(cli: Cli) -> Result<Settings> {
    let resolver = SettingsResolver::new(cli);
    resolver.resolve()
}

/// Display settings summary for debug purposes
pub fn display_settings_summary(settings: &Settings) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Profile: {}", settings.profile()));
    summary.push(format!("Declared settings: {}", settings.len()));
    summary.push(format!(
        "Database URI: {}",
        settings.database_uri().unwrap_or("<undeclared>")
    ));

    if let Some(flags) = settings.feature_flags() {
        let enabled = flags.values().filter(|&&v| v).count();
        summary.push(format!("Feature flags: {} ({} enabled)", flags.len(), enabled));
    }

    if let Some(queue) = settings.task_queue() {
        summary.push(format!("Task-queue broker: {}", queue.broker_url()));
        summary.push(format!("Task-queue result backend: {}", queue.result_backend_url()));
    } else {
        summary.push("Task queue: not configured".to_string());
    }

    summary.join("\n")
}
