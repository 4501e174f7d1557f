//! Colored formatter implementation with terminal color support

use super::formatter::{FormattingOptions, PlainFormatter, SettingsFormatter};
use crate::{
    config::validation::ValidationWarning,
    config::display_settings_summary,
    error::Result,
    models::Settings,
};
use colored::*;
use std::fmt::Write as _;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub name: Color,
    pub type_label: Color,
    pub success: Color,
    pub error: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            name: Color::Cyan,
            type_label: Color::BrightBlack,
            success: Color::Green,
            error: Color::Red,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    plain_formatter: PlainFormatter,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a new colored formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            plain_formatter: PlainFormatter::new(options),
            color_scheme: ColorScheme::default(),
        }
    }

    /// Create a colored formatter with a custom color scheme
    pub fn with_color_scheme(options: FormattingOptions, color_scheme: ColorScheme) -> Self {
        Self {
            plain_formatter: PlainFormatter::new(options),
            color_scheme,
        }
    }
}

impl SettingsFormatter for ColoredFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let underline = "=".repeat(title.len());
        Ok(format!(
            "{}\n{}",
            title.color(self.color_scheme.header).bold(),
            underline.color(self.color_scheme.header)
        ))
    }

    fn format_settings_table(&self, settings: &Settings) -> Result<String> {
        let width = PlainFormatter::name_column_width(settings);
        let mut output = String::new();

        for (name, value) in settings.iter() {
            writeln!(
                output,
                "{:<width$}  {:<14} {}",
                name.color(self.color_scheme.name),
                value.type_name().color(self.color_scheme.type_label),
                self.plain_formatter.clip(&value.render()),
                width = width
            )
            .ok();
        }

        Ok(output)
    }

    fn format_findings(&self, findings: &[ValidationWarning]) -> Result<String> {
        if findings.is_empty() {
            return Ok(format!(
                "{}",
                "No validation findings.".color(self.color_scheme.success)
            ));
        }

        let mut output = format!("{}\n", "Validation findings:".bold());
        for finding in findings {
            writeln!(output, "  {}", finding.format(true)).ok();
        }
        Ok(output)
    }

    fn format_summary(&self, settings: &Settings) -> Result<String> {
        Ok(display_settings_summary(settings))
    }

    fn format_error(&self, error: &str) -> Result<String> {
        Ok(format!(
            "{} {}",
            "ERROR:".color(self.color_scheme.error).bold(),
            error
        ))
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!(
            "{} {}",
            "OK:".color(self.color_scheme.success).bold(),
            message
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolver::build_profile;
    use crate::models::Profile;

    #[test]
    fn test_colored_table_covers_all_settings() {
        let settings = build_profile(Profile::Minimal, "sqlite://", "secret").unwrap();
        let formatter = ColoredFormatter::new(FormattingOptions::default());
        let table = formatter.format_settings_table(&settings).unwrap();

        assert_eq!(table.lines().count(), settings.len());
    }

    #[test]
    fn test_colored_messages_keep_content() {
        let formatter = ColoredFormatter::new(FormattingOptions::default());
        assert!(formatter.format_error("broken").unwrap().contains("broken"));
        assert!(formatter.format_success("done").unwrap().contains("done"));
    }
}
