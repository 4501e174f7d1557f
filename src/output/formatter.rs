//! Core formatting traits and the plain text implementation

use crate::{
    config::validation::ValidationWarning,
    config::display_settings_summary,
    error::Result,
    models::Settings,
};
use std::fmt::Write as _;

/// Main trait for output formatting
pub trait SettingsFormatter {
    /// Format a header section
    fn format_header(&self, title: &str) -> Result<String>;

    /// Format the resolved settings as a table
    fn format_settings_table(&self, settings: &Settings) -> Result<String>;

    /// Format validation findings
    fn format_findings(&self, findings: &[ValidationWarning]) -> Result<String>;

    /// Format the resolution summary
    fn format_summary(&self, settings: &Settings) -> Result<String>;

    /// Format error messages
    fn format_error(&self, error: &str) -> Result<String>;

    /// Format success messages
    fn format_success(&self, message: &str) -> Result<String>;
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Enable verbose mode with the resolution summary attached
    pub verbose_mode: bool,
    /// Maximum width for rendered values before truncation
    pub max_value_width: usize,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            verbose_mode: false,
            max_value_width: 96,
        }
    }
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    /// Create a new plain formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    /// Truncate a rendered value to the configured width
    pub(super) fn clip(&self, value: &str) -> String {
        if value.len() <= self.options.max_value_width {
            value.to_string()
        } else {
            let mut clipped: String = value.chars().take(self.options.max_value_width - 3).collect();
            clipped.push_str("...");
            clipped
        }
    }

    /// Width of the widest setting name, used to align the value column
    pub(super) fn name_column_width(settings: &Settings) -> usize {
        settings.iter().map(|(name, _)| name.len()).max().unwrap_or(0)
    }
}

impl SettingsFormatter for PlainFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let underline = "=".repeat(title.len());
        Ok(format!("{}\n{}", title, underline))
    }

    fn format_settings_table(&self, settings: &Settings) -> Result<String> {
        let width = Self::name_column_width(settings);
        let mut output = String::new();

        for (name, value) in settings.iter() {
            writeln!(
                output,
                "{:<width$}  {:<14} {}",
                name,
                value.type_name(),
                self.clip(&value.render()),
                width = width
            )
            .ok();
        }

        Ok(output)
    }

    fn format_findings(&self, findings: &[ValidationWarning]) -> Result<String> {
        if findings.is_empty() {
            return Ok("No validation findings.".to_string());
        }

        let mut output = String::from("Validation findings:\n");
        for finding in findings {
            writeln!(output, "  {}", finding.format(false)).ok();
        }
        Ok(output)
    }

    fn format_summary(&self, settings: &Settings) -> Result<String> {
        Ok(display_settings_summary(settings))
    }

    fn format_error(&self, error: &str) -> Result<String> {
        Ok(format!("ERROR: {}", error))
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!("OK: {}", message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolver::build_profile;
    use crate::config::validation::{ValidationLevel, ValidationWarning};
    use crate::models::Profile;

    fn formatter() -> PlainFormatter {
        PlainFormatter::new(FormattingOptions {
            enable_color: false,
            ..Default::default()
        })
    }

    #[test]
    fn test_header_underlined() {
        let header = formatter().format_header("Resolved Settings").unwrap();
        assert!(header.starts_with("Resolved Settings\n"));
        assert!(header.ends_with("================="));
    }

    #[test]
    fn test_table_lists_every_setting() {
        let settings = build_profile(Profile::Full, "sqlite://", "secret").unwrap();
        let table = formatter().format_settings_table(&settings).unwrap();

        for name in settings.names() {
            assert!(table.contains(name), "table missing {}", name);
        }
        assert_eq!(table.lines().count(), settings.len());
    }

    #[test]
    fn test_long_values_clipped() {
        let plain = PlainFormatter::new(FormattingOptions {
            enable_color: false,
            verbose_mode: false,
            max_value_width: 10,
        });
        let clipped = plain.clip("0123456789abcdef");
        assert_eq!(clipped, "0123456...");
    }

    #[test]
    fn test_findings_formatting() {
        let none = formatter().format_findings(&[]).unwrap();
        assert!(none.contains("No validation findings"));

        let findings = vec![ValidationWarning::new(ValidationLevel::Warning, "check this")];
        let some = formatter().format_findings(&findings).unwrap();
        assert!(some.contains("[WARNING] check this"));
    }
}
