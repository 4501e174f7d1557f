//! Output formatting and display system
//!
//! Provides a flexible formatting layer for resolved settings snapshots,
//! supporting both colored and plain text output plus JSON rendering.

mod colored;
mod formatter;

pub use colored::{ColorScheme, ColoredFormatter};
pub use formatter::{FormattingOptions, PlainFormatter, SettingsFormatter};

use crate::{
    config::validation::ValidationWarning,
    error::Result,
    models::Settings,
};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool, verbose: bool) -> Box<dyn SettingsFormatter> {
        let options = FormattingOptions {
            enable_color,
            verbose_mode: verbose,
            ..Default::default()
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }

    /// Create a plain text formatter for scripts/logs
    pub fn create_plain_formatter() -> Box<dyn SettingsFormatter> {
        Self::create_formatter(false, false)
    }
}

/// Main output coordinator that assembles the rendered report
pub struct OutputCoordinator {
    formatter: Box<dyn SettingsFormatter>,
    verbose: bool,
}

impl OutputCoordinator {
    /// Create a new output coordinator with the specified formatter
    pub fn new(formatter: Box<dyn SettingsFormatter>) -> Self {
        Self {
            formatter,
            verbose: false,
        }
    }

    /// Create a coordinator that appends the resolution summary
    pub fn with_verbose(formatter: Box<dyn SettingsFormatter>, verbose: bool) -> Self {
        Self { formatter, verbose }
    }

    /// Display the resolved snapshot with its validation findings
    pub fn display_snapshot(
        &self,
        settings: &Settings,
        findings: &[ValidationWarning],
    ) -> Result<String> {
        let mut output = String::new();

        let title = format!("Resolved Settings ({} profile)", settings.profile());
        output.push_str(&self.formatter.format_header(&title)?);
        output.push_str("\n\n");

        output.push_str(&self.formatter.format_settings_table(settings)?);
        output.push('\n');

        output.push_str(&self.formatter.format_findings(findings)?);

        if self.verbose {
            output.push_str("\n\n");
            output.push_str(&self.formatter.format_summary(settings)?);
        }

        Ok(output)
    }

    /// Display a validation-only report for `--check`
    pub fn display_check_report(
        &self,
        settings: &Settings,
        findings: &[ValidationWarning],
    ) -> Result<String> {
        let mut output = String::new();

        let title = format!("Validation Report ({} profile)", settings.profile());
        output.push_str(&self.formatter.format_header(&title)?);
        output.push_str("\n\n");
        output.push_str(&self.formatter.format_findings(findings)?);
        output.push('\n');
        output.push_str(&self.formatter.format_success(&format!(
            "{} settings resolved, all invariants hold",
            settings.len()
        ))?);

        Ok(output)
    }
}
