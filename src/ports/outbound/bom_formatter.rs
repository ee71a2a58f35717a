use crate::bom::AiBom;
use crate::shared::Result;

/// BomFormatter port for rendering AI-BOM documents
///
/// This port abstracts the rendering logic for the supported output
/// formats (SPDX JSON, SPDX YAML, Markdown).
pub trait BomFormatter {
    /// Renders the AI-BOM document
    ///
    /// # Arguments
    /// * `bom` - The AI-BOM document with its models, datasets and
    ///   dependencies
    ///
    /// # Returns
    /// Rendered document content as a string
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, bom: &AiBom) -> Result<String>;
}
