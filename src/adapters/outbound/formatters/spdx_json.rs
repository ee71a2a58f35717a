use crate::bom::AiBom;
use crate::ports::outbound::BomFormatter;
use crate::shared::Result;

/// SpdxJsonFormatter adapter for the canonical SPDX JSON output
///
/// Serialization goes through sorted-key maps, so the output is
/// byte-stable for a given document and safe to hash.
pub struct SpdxJsonFormatter;

impl SpdxJsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpdxJsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BomFormatter for SpdxJsonFormatter {
    fn format(&self, bom: &AiBom) -> Result<String> {
        let mut rendered = serde_json::to_string_pretty(bom)?;
        rendered.push('\n');
        Ok(rendered)
    }
}
