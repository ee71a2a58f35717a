use crate::bom::AiBom;
use crate::ports::outbound::BomFormatter;
use crate::shared::Result;

/// SpdxYamlFormatter adapter for YAML output
///
/// Same document shape as the JSON formatter, for pipelines that keep
/// their compliance artifacts in YAML.
pub struct SpdxYamlFormatter;

impl SpdxYamlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpdxYamlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BomFormatter for SpdxYamlFormatter {
    fn format(&self, bom: &AiBom) -> Result<String> {
        Ok(serde_yaml_ng::to_string(bom)?)
    }
}
