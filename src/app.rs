//! Main application orchestration

use crate::{
    cli::Cli,
    config::{load_settings, resolve_profile, EnvManager, SettingsValidator, validate_settings},
    error::{AppError, Result},
    logging::{LogLevel, Logger},
    models::Profile,
    output::{OutputCoordinator, OutputFormatterFactory},
};

/// Main application struct that coordinates resolution, validation, and output
pub struct App {
    cli: Cli,
    logger: Logger,
}

impl App {
    /// Create a new application instance with CLI configuration
    pub fn new(cli: Cli) -> Result<Self> {
        cli.validate().map_err(AppError::config)?;

        let min_level = if cli.debug { LogLevel::Debug } else { LogLevel::Info };
        let logger = Logger::new("sst").with_min_level(min_level).with_color(cli.use_colors());

        Ok(Self { cli, logger })
    }

    /// Run the application
    pub fn run(self) -> Result<()> {
        if self.cli.should_show_topic_help() {
            println!("{}", self.cli.display_help());
            return Ok(());
        }

        if self.cli.show_env {
            return self.show_env();
        }

        if let Some(path) = self.cli.init_env.clone() {
            EnvManager::save_example_env_file(&path)?;
            println!("Wrote example .env file to {}", path.display());
            return Ok(());
        }

        if self.cli.debug {
            self.logger.debug(&self.cli.get_config_summary());
        }

        let settings = load_settings(self.cli.clone())?;
        let findings = validate_settings(&settings)?;

        let use_colors = self.cli.use_colors();
        let formatter = OutputFormatterFactory::create_formatter(use_colors, self.cli.verbose);
        let coordinator = OutputCoordinator::with_verbose(formatter, self.cli.verbose);

        if self.cli.json {
            println!("{}", settings.to_json_pretty()?);
            return Ok(());
        }

        if self.cli.check {
            // The structural property between profiles is part of the check
            let mut findings = findings;
            findings.extend(self.check_profile_consistency()?);

            println!("{}", coordinator.display_check_report(&settings, &findings)?);
            return Ok(());
        }

        println!("{}", coordinator.display_snapshot(&settings, &findings)?);
        Ok(())
    }

    /// Display the supported environment variables and any current issues
    fn show_env(&self) -> Result<()> {
        println!("{}", EnvManager::display_env_help());

        let warnings = EnvManager::validate_current_env()?;
        for warning in &warnings {
            println!("{}", warning);
        }

        if let Some(file_warnings) = EnvManager::check_env_file()? {
            if file_warnings.is_empty() {
                println!(".env file present, no issues found");
            }
            for warning in file_warnings {
                println!(".env: {}", warning);
            }
        }

        Ok(())
    }

    /// Verify minimal ⊆ full independent of which profile was requested
    fn check_profile_consistency(&self) -> Result<Vec<crate::config::ValidationWarning>> {
        let full = resolve_profile(Profile::Full)?;
        let minimal = resolve_profile(Profile::Minimal)?;

        self.logger.debug("Checking structural consistency between profiles");
        SettingsValidator::validate_profile_consistency(&minimal, &full)
    }
}
