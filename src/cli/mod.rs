//! Command-line interface module with topic help system

pub mod help;

pub use help::HelpSystem;

use crate::models::Profile;
use clap::Parser;
use std::path::PathBuf;

/// Superset Settings Resolver - resolve, validate, and render deployment settings
#[derive(Parser, Debug, Clone)]
#[command(name = "sst")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Deployment profile to resolve
    #[arg(short, long, value_enum, default_value_t = Profile::Full)]
    pub profile: Profile,

    /// Override the primary datastore connection string
    #[arg(long, value_name = "URI")]
    pub database_uri: Option<String>,

    /// Override the session/crypto secret key
    #[arg(long, value_name = "KEY")]
    pub secret_key: Option<String>,

    /// Render the resolved snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Validate the resolved snapshot and report findings without rendering it
    #[arg(long)]
    pub check: bool,

    /// Show supported environment variables and resolution order
    #[arg(long)]
    pub show_env: bool,

    /// Write an example .env file to the given path
    #[arg(long, value_name = "PATH")]
    pub init_env: Option<PathBuf>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Show help for specific topic (profiles, env, derivation, output)
    #[arg(long, value_name = "TOPIC")]
    pub help_topic: Option<String>,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting color flags
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        // Check for conflicting rendering modes
        if self.json && self.check {
            return Err("Cannot specify both --json and --check".to_string());
        }

        if let Some(ref path) = self.init_env {
            if path.as_os_str().is_empty() {
                return Err("--init-env requires a non-empty path".to_string());
            }
        }

        Ok(())
    }

    /// Check if help should be displayed for a specific topic
    pub fn should_show_topic_help(&self) -> bool {
        self.help_topic.is_some()
    }

    /// Get the help topic if specified
    pub fn get_help_topic(&self) -> Option<&str> {
        self.help_topic.as_deref()
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true // Force color output when --color is specified
        } else if self.no_color {
            false // Disable color output when --no-color is specified
        } else {
            supports_color() // Use automatic detection
        }
    }

    /// Display help for the specified topic or main help
    pub fn display_help(&self) -> String {
        let help_system = HelpSystem::new();
        let use_colors = self.use_colors();

        if let Some(topic) = &self.help_topic {
            help_system.display_topic_help(topic, use_colors).unwrap_or_else(|| {
                format!(
                    "Unknown help topic: '{}'\n\nAvailable topics: profiles, env, derivation, output\n\n{}",
                    topic,
                    help_system.display_main_help(use_colors)
                )
            })
        } else {
            help_system.display_main_help(use_colors)
        }
    }

    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("Invocation Summary:\n");
        summary.push_str(&format!("  Profile: {}\n", self.profile));
        summary.push_str(&format!("  Colored output: {}\n", self.use_colors()));
        summary.push_str(&format!("  Verbose mode: {}\n", self.verbose));
        summary.push_str(&format!("  Debug mode: {}\n", self.debug));

        if let Some(ref uri) = self.database_uri {
            summary.push_str(&format!("  Database URI override: {}\n", uri));
        }

        if self.secret_key.is_some() {
            summary.push_str("  Secret key override: <provided>\n");
        }

        if self.json {
            summary.push_str("  Output: JSON\n");
        } else if self.check {
            summary.push_str("  Output: validation report\n");
        }

        summary
    }
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    // Check for common environment variables that indicate color support
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    // Check for NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check for FORCE_COLOR environment variable
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Default to true on Unix-like systems, false elsewhere
    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing_defaults() {
        let cli = Cli::parse_from(["sst"]);
        assert_eq!(cli.profile, Profile::Full);
        assert!(!cli.json);
        assert!(!cli.check);
        assert!(!cli.verbose);
        assert!(!cli.debug);
        assert!(cli.database_uri.is_none());
    }

    #[test]
    fn test_cli_parsing_all_options() {
        let cli = Cli::parse_from([
            "sst",
            "--profile",
            "minimal",
            "--database-uri",
            "postgresql://db:5432/app",
            "--secret-key",
            "s3cret",
            "--json",
            "--no-color",
            "--verbose",
            "--debug",
            "--help-topic",
            "profiles",
        ]);

        assert_eq!(cli.profile, Profile::Minimal);
        assert_eq!(cli.database_uri.as_deref(), Some("postgresql://db:5432/app"));
        assert_eq!(cli.secret_key.as_deref(), Some("s3cret"));
        assert!(cli.json);
        assert!(cli.no_color);
        assert!(cli.verbose);
        assert!(cli.debug);
        assert_eq!(cli.help_topic.as_deref(), Some("profiles"));
    }

    #[test]
    fn test_cli_validation() {
        let cli_conflict = Cli::parse_from(["sst", "--color", "--no-color"]);
        assert!(cli_conflict.validate().is_err());

        let cli_modes = Cli::parse_from(["sst", "--json", "--check"]);
        assert!(cli_modes.validate().is_err());

        let cli_ok = Cli::parse_from(["sst", "--profile", "full", "--check"]);
        assert!(cli_ok.validate().is_ok());
    }

    #[test]
    fn test_use_colors_flags() {
        let cli_no_color = Cli::parse_from(["sst", "--no-color"]);
        assert!(!cli_no_color.use_colors());

        let cli_color = Cli::parse_from(["sst", "--color"]);
        assert!(cli_color.use_colors());
    }

    #[test]
    fn test_help_topic_methods() {
        let cli_with_topic = Cli::parse_from(["sst", "--help-topic", "env"]);
        assert!(cli_with_topic.should_show_topic_help());
        assert_eq!(cli_with_topic.get_help_topic(), Some("env"));

        let cli_without_topic = Cli::parse_from(["sst"]);
        assert!(!cli_without_topic.should_show_topic_help());
        assert_eq!(cli_without_topic.get_help_topic(), None);
    }

    #[test]
    fn test_help_display() {
        let cli = Cli::parse_from(["sst", "--no-color"]);
        let help = cli.display_help();
        assert!(help.contains("Superset Settings Resolver"));
        assert!(help.contains("USAGE:"));

        let cli_with_topic = Cli::parse_from(["sst", "--no-color", "--help-topic", "derivation"]);
        let topic_help = cli_with_topic.display_help();
        assert!(topic_help.contains("DERIVED SETTINGS"));

        let cli_invalid_topic = Cli::parse_from(["sst", "--no-color", "--help-topic", "invalid"]);
        let invalid_help = cli_invalid_topic.display_help();
        assert!(invalid_help.contains("Unknown help topic"));
    }

    #[test]
    fn test_help_topic_edge_cases() {
        for topic in ["profiles", "env", "derivation", "output"] {
            let cli = Cli::parse_from(["sst", "--no-color", "--help-topic", topic]);
            let help = cli.display_help();
            assert!(!help.is_empty());
            assert!(!help.contains("Unknown help topic"));
        }

        // Case insensitive topic lookup
        let cli = Cli::parse_from(["sst", "--no-color", "--help-topic", "PROFILES"]);
        assert!(!cli.display_help().contains("Unknown help topic"));
    }

    #[test]
    fn test_config_summary() {
        let cli = Cli::parse_from([
            "sst",
            "--profile",
            "minimal",
            "--verbose",
            "--database-uri",
            "sqlite://",
            "--secret-key",
            "hidden",
        ]);

        let summary = cli.get_config_summary();
        assert!(summary.contains("Profile: minimal"));
        assert!(summary.contains("Verbose mode: true"));
        assert!(summary.contains("Database URI override: sqlite://"));
        // Secret values never echo back
        assert!(!summary.contains("hidden"));
        assert!(summary.contains("Secret key override: <provided>"));
    }
}
