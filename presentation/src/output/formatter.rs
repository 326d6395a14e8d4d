//! Output formatter trait

use twentyq_application::PlayGameOutput;
use twentyq_domain::OutputFormat;

/// Trait for formatting finished games
pub trait OutputFormatter {
    /// Transcript, remaining candidates, and the guess
    fn format(&self, output: &PlayGameOutput) -> String;

    /// Format as JSON
    fn format_json(&self, output: &PlayGameOutput) -> String;

    /// The guess line only
    fn format_summary(&self, output: &PlayGameOutput) -> String;

    /// Dispatch on the configured format
    fn render(&self, output: &PlayGameOutput, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(output),
            OutputFormat::Summary => self.format_summary(output),
            OutputFormat::Json => self.format_json(output),
        }
    }
}
