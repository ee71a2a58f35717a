use crate::adapters::outbound::formatters::{
    MarkdownFormatter, SpdxJsonFormatter, SpdxYamlFormatter,
};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::BomFormatter;

/// Factory for creating AI-BOM formatters
///
/// This factory encapsulates the creation logic for different formatter implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Arguments
    /// * `format` - The output format to create a formatter for
    ///
    /// # Returns
    /// A boxed BomFormatter trait object appropriate for the specified format
    ///
    /// # Examples
    /// ```
    /// use ai_act_audit::application::dto::OutputFormat;
    /// use ai_act_audit::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn BomFormatter> {
        match format {
            OutputFormat::Json => Box::new(SpdxJsonFormatter::new()),
            OutputFormat::Yaml => Box::new(SpdxYamlFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Arguments
    /// * `format` - The output format
    ///
    /// # Returns
    /// A static string containing the progress message to display
    ///
    /// # Examples
    /// ```
    /// use ai_act_audit::application::dto::OutputFormat;
    /// use ai_act_audit::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Json);
    /// assert_eq!(message, "📝 Generating SPDX JSON format output...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Generating SPDX JSON format output...",
            OutputFormat::Yaml => "📝 Generating SPDX YAML format output...",
            OutputFormat::Markdown => "📝 Generating Markdown format output...",
        }
    }
}
