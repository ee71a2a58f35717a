//! One validator per Annex IV requirement family.
//!
//! Validators derive everything from the scanned artifacts: the BOM, its
//! metadata map and (where documentation files matter) the repository tree.
//! Missing evidence produces `false`, never an error, so an evaluation
//! always completes.

pub mod article15;
pub mod data_governance;
pub mod gpai;
pub mod high_risk;
pub mod logging;
pub mod obligations;
pub mod risk_management;

pub use article15::{AccuracyValidator, CybersecurityValidator, RobustnessValidator};
pub use data_governance::DataGovernanceValidator;
pub use gpai::GpaiValidator;
pub use high_risk::HighRiskClassifier;
pub use logging::LoggingValidator;
pub use obligations::ObligationsValidator;
pub use risk_management::RiskManagementValidator;

use crate::bom::AiBom;
use crate::manifest::normalize_package_name;

/// Whether any dependency name contains one of the given library names.
pub(crate) fn any_dependency(bom: &AiBom, libraries: &[&str]) -> bool {
    bom.dependencies.iter().any(|dep| {
        let name = normalize_package_name(&dep.name);
        libraries
            .iter()
            .any(|lib| name.contains(&normalize_package_name(lib)))
    })
}

/// Dependency names matching the given libraries, annotated with the
/// ecosystem label, e.g. `"tenacity (python)"`.
pub(crate) fn matched_dependencies(bom: &AiBom, libraries: &[&str], label: &str) -> Vec<String> {
    let mut matched = Vec::new();
    for dep in &bom.dependencies {
        let name = normalize_package_name(&dep.name);
        if libraries
            .iter()
            .any(|lib| name.contains(&normalize_package_name(lib)))
        {
            matched.push(format!("{} ({})", dep.name, label));
        }
    }
    matched
}

/// String value of a metadata key, if present.
pub(crate) fn metadata_str<'a>(bom: &'a AiBom, key: &str) -> Option<&'a str> {
    bom.metadata.get(key).and_then(|v| v.as_str())
}

/// The whole metadata map flattened to one lowercase string, for keyword
/// scans over free-form annotations.
pub(crate) fn metadata_text(bom: &AiBom) -> String {
    serde_json::to_string(&bom.metadata)
        .unwrap_or_default()
        .to_lowercase()
}
