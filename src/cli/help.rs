//! Topic-based command-line help with examples and contextual guidance

use crate::config::env::EnvManager;
use colored::*;

/// Help system for the CLI application
pub struct HelpSystem;

impl HelpSystem {
    /// Create a new help system
    pub fn new() -> Self {
        Self
    }

    /// Display the main help message with all available options
    pub fn display_main_help(&self, use_colors: bool) -> String {
        let mut help = String::new();

        help.push_str(&self.format_header(use_colors));
        help.push('\n');
        help.push_str(&self.format_usage_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_examples_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_environment_section(use_colors));

        help
    }

    /// Display quick help for specific topics
    pub fn display_topic_help(&self, topic: &str, use_colors: bool) -> Option<String> {
        match topic.to_lowercase().as_str() {
            "profiles" | "profile" => Some(self.format_profiles_help(use_colors)),
            "env" | "environment" => Some(self.format_environment_help(use_colors)),
            "derivation" | "derived" => Some(self.format_derivation_help(use_colors)),
            "output" | "formatting" => Some(self.format_output_help(use_colors)),
            _ => None,
        }
    }

    /// Format the main header
    fn format_header(&self, use_colors: bool) -> String {
        let title = "Superset Settings Resolver";
        let subtitle = "Resolves, validates, and renders Superset deployment settings profiles";
        let version = env!("CARGO_PKG_VERSION");

        if use_colors {
            format!(
                "{}\n{}\nVersion: {}\n",
                title.bright_cyan().bold(),
                subtitle.bright_blue(),
                version.green()
            )
        } else {
            format!("{}\n{}\nVersion: {}\n", title, subtitle, version)
        }
    }

    /// Format the usage section
    fn format_usage_section(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "USAGE:".bright_green().bold().to_string()
        } else {
            "USAGE:".to_string()
        };

        let usage_patterns = [
            "sst [OPTIONS]",
            "sst --profile <full|minimal> [OPTIONS]",
            "sst --check [OPTIONS]",
            "sst --help-topic <TOPIC>",
        ];

        let mut usage = format!("{}\n", header);
        for pattern in usage_patterns {
            if use_colors {
                usage.push_str(&format!("  {}\n", pattern.bright_white()));
            } else {
                usage.push_str(&format!("  {}\n", pattern));
            }
        }

        usage
    }

    /// Format the examples section
    fn format_examples_section(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "EXAMPLES:".bright_green().bold().to_string()
        } else {
            "EXAMPLES:".to_string()
        };

        let examples = [
            ("Render the full profile", "sst"),
            ("Render the minimal profile as JSON", "sst --profile minimal --json"),
            ("Validate without rendering", "sst --check"),
            (
                "Resolve against another database",
                "sst --database-uri postgresql://db:5432/superset",
            ),
            ("Write an example .env file", "sst --init-env .env.example"),
        ];

        let mut section = format!("{}\n", header);
        for (description, command) in examples {
            if use_colors {
                section.push_str(&format!("  {} \n    {}\n", description.bright_blue(), command.bright_white()));
            } else {
                section.push_str(&format!("  {}\n    {}\n", description, command));
            }
        }

        section
    }

    /// Format the environment variables section of the main help
    fn format_environment_section(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "ENVIRONMENT:".bright_green().bold().to_string()
        } else {
            "ENVIRONMENT:".to_string()
        };

        format!("{}\n{}", header, EnvManager::display_env_help())
    }

    /// Detailed help for the profiles topic
    fn format_profiles_help(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "DEPLOYMENT PROFILES".bright_cyan().bold().to_string()
        } else {
            "DEPLOYMENT PROFILES".to_string()
        };

        format!(
            "{}\n\n\
             Two profiles share one schema and differ only in their data:\n\n\
             \x20 full     The complete settings surface: feature flags enabled,\n\
             \x20          task queue configured, CSV uploads and rotated file\n\
             \x20          logging declared.\n\
             \x20 minimal  A reduced subset for first bring-up: template\n\
             \x20          processing disabled, no task queue, plain logging.\n\n\
             The minimal profile only ever declares names the full profile also\n\
             declares; `sst --check` verifies that structural property.\n",
            header
        )
    }

    /// Detailed help for the environment topic
    fn format_environment_help(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "ENVIRONMENT REFERENCE".bright_cyan().bold().to_string()
        } else {
            "ENVIRONMENT REFERENCE".to_string()
        };

        format!(
            "{}\n\n{}\nA variable that is set but empty counts as unset and falls back\nto the built-in default. Missing variables are never an error.\n",
            header,
            EnvManager::display_env_help()
        )
    }

    /// Detailed help for the derivation topic
    fn format_derivation_help(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "DERIVED SETTINGS".bright_cyan().bold().to_string()
        } else {
            "DERIVED SETTINGS".to_string()
        };

        format!(
            "{}\n\n\
             The task-queue endpoints are always derived from the database URI\n\
             and cannot be configured independently:\n\n\
             \x20 broker URL          = \"sqla+\" + SQLALCHEMY_DATABASE_URI\n\
             \x20 result backend URL  = \"db+\"   + SQLALCHEMY_DATABASE_URI\n\n\
             Whenever the database URI changes (environment override or\n\
             --database-uri), both URLs are recomputed so they can never drift.\n",
            header
        )
    }

    /// Detailed help for the output topic
    fn format_output_help(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "OUTPUT MODES".bright_cyan().bold().to_string()
        } else {
            "OUTPUT MODES".to_string()
        };

        format!(
            "{}\n\n\
             \x20 default   Settings table with a validation findings list.\n\
             \x20 --json    The snapshot as pretty-printed JSON, shaped exactly\n\
             \x20           like the mapping the host framework reads.\n\
             \x20 --check   Findings only; exits nonzero if any invariant is\n\
             \x20           violated.\n\n\
             Color is auto-detected and can be forced with --color or\n\
             suppressed with --no-color (NO_COLOR is honored too).\n",
            header
        )
    }
}

impl Default for HelpSystem {
    fn default() -> Self {
        Self::new()
    }
}
