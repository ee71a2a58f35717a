//! Article 15 evidence: accuracy, robustness and cybersecurity signals
//! read from the dependency set, the metadata map and the repository tree.

use std::collections::BTreeMap;
use std::path::Path;

use walkdir::WalkDir;

use crate::bom::AiBom;
use crate::compliance::requirements::{
    AccuracyRequirements, CybersecurityRequirements, RobustnessRequirements,
};
use crate::compliance::validators::{any_dependency, matched_dependencies, metadata_str};

const PYTHON_TESTING_FRAMEWORKS: &[&str] = &["pytest", "unittest", "nose", "hypothesis"];
const JS_TESTING_FRAMEWORKS: &[&str] = &["jest", "mocha", "chai", "jasmine"];

const BENCHMARK_DATASETS: &[&str] = &[
    "MNIST",
    "CIFAR",
    "ImageNet",
    "COCO",
    "GLUE",
    "SuperGLUE",
    "SQuAD",
    "CoNLL",
    "IMDB",
    "WikiText",
    "Common Crawl",
];

const METRIC_KEYWORDS: &[&str] = &[
    "accuracy",
    "precision",
    "recall",
    "f1",
    "auc",
    "roc",
    "mse",
    "mae",
    "rmse",
];

/// Article 15(1): accuracy metrics and evaluation evidence.
#[derive(Debug, Default)]
pub struct AccuracyValidator;

impl AccuracyValidator {
    pub fn new() -> Self {
        AccuracyValidator
    }

    /// `root` is the repository being audited; pass `None` when evaluating
    /// a stored BOM without access to the working tree.
    pub fn validate(&self, bom: &AiBom, root: Option<&Path>) -> AccuracyRequirements {
        let accuracy_metrics = self.metrics_from_metadata(bom);

        let testing_detected = any_dependency(bom, PYTHON_TESTING_FRAMEWORKS)
            || any_dependency(bom, JS_TESTING_FRAMEWORKS);

        let benchmark_datasets: Vec<String> = BENCHMARK_DATASETS
            .iter()
            .filter(|benchmark| {
                let needle = benchmark.to_lowercase();
                bom.datasets
                    .iter()
                    .any(|d| d.name.to_lowercase().contains(&needle))
            })
            .map(|b| b.to_string())
            .collect();

        let testing_procedures_documented = root.map(has_evaluation_docs).unwrap_or(false);

        AccuracyRequirements {
            metrics_defined: !accuracy_metrics.is_empty() || testing_detected,
            model_evaluation_performed: testing_procedures_documented
                && !accuracy_metrics.is_empty(),
            accuracy_metrics,
            testing_procedures_documented,
            benchmark_datasets,
        }
    }

    fn metrics_from_metadata(&self, bom: &AiBom) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();
        for (key, value) in &bom.metadata {
            let lowered = key.to_lowercase();
            if METRIC_KEYWORDS.iter().any(|m| lowered.contains(m)) {
                let parsed = value
                    .as_f64()
                    .or_else(|| value.as_str().and_then(|s| s.parse::<f64>().ok()));
                if let Some(number) = parsed {
                    metrics.insert(key.clone(), number);
                }
            }
        }
        metrics
    }
}

/// Whether the tree carries testing or evaluation documentation.
fn has_evaluation_docs(root: &Path) -> bool {
    for entry in WalkDir::new(root)
        .max_depth(3)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let file_name = entry.file_name().to_string_lossy().to_lowercase();
        if file_name.ends_with(".md")
            && (file_name.starts_with("test")
                || file_name.starts_with("testing")
                || file_name.starts_with("eval"))
        {
            return true;
        }
        if file_name == "readme.md" {
            if let Ok(text) = std::fs::read_to_string(entry.path()) {
                let lowered = text.to_lowercase();
                if lowered.contains("test") || lowered.contains("eval") || lowered.contains("accuracy")
                {
                    return true;
                }
            }
        }
    }
    false
}

const ERROR_HANDLING_KEYWORDS: &[&str] =
    &["try", "except", "catch", "error", "exception", "fallback", "retry"];

const PYTHON_FAULT_TOLERANCE: &[&str] =
    &["tenacity", "backoff", "retry", "circuit-breaker", "resilience4j"];
const JS_FAULT_TOLERANCE: &[&str] = &["retry", "async-retry", "p-retry", "opossum"];

const VALIDATION_LIBRARIES: &[&str] = &[
    "pydantic",
    "marshmallow",
    "cerberus",
    "voluptuous",
    "joi",
    "ajv",
    "yup",
];

const ADVERSARIAL_LIBRARIES: &[&str] = &[
    "cleverhans",
    "foolbox",
    "adversarial-robustness-toolbox",
    "art",
];

const RESILIENCE_LIBRARIES: &[&str] =
    &["chaos", "toxiproxy", "gremlin", "simian-army", "pytest-stress"];

/// Article 15(4): robustness and resilience evidence.
#[derive(Debug, Default)]
pub struct RobustnessValidator;

impl RobustnessValidator {
    pub fn new() -> Self {
        RobustnessValidator
    }

    pub fn validate(&self, bom: &AiBom) -> RobustnessRequirements {
        let error_handling_implemented = bom.dependencies.iter().any(|dep| {
            let name = dep.name.to_lowercase();
            ERROR_HANDLING_KEYWORDS.iter().any(|k| name.contains(k))
        });

        let mut fault_tolerance_measures =
            matched_dependencies(bom, PYTHON_FAULT_TOLERANCE, "python");
        fault_tolerance_measures.extend(matched_dependencies(bom, JS_FAULT_TOLERANCE, "javascript"));
        fault_tolerance_measures.dedup();

        let input_validation_present = any_dependency(bom, VALIDATION_LIBRARIES);
        let adversarial_testing_performed = any_dependency(bom, ADVERSARIAL_LIBRARIES);
        let resilience_tooling = any_dependency(bom, RESILIENCE_LIBRARIES);

        RobustnessRequirements {
            error_handling_implemented,
            fallback_mechanisms_available: !fault_tolerance_measures.is_empty(),
            input_validation_present,
            fault_tolerance_measures,
            adversarial_testing_performed,
            edge_case_testing_performed: resilience_tooling || adversarial_testing_performed,
        }
    }
}

const PYTHON_ENCRYPTION: &[&str] = &["cryptography", "pycryptodome", "nacl", "hashlib"];
const JS_ENCRYPTION: &[&str] = &["crypto", "bcrypt", "crypto-js", "node-forge"];

const PYTHON_AUTH: &[&str] = &["flask-login", "django-auth", "authlib", "oauthlib", "pyjwt"];
const JS_AUTH: &[&str] = &["passport", "jsonwebtoken", "oauth", "auth0"];

const PYTHON_SCANNING: &[&str] = &["bandit", "safety", "snyk", "semgrep"];
const JS_SCANNING: &[&str] = &["eslint-plugin-security", "npm-audit", "snyk"];

const SECURITY_FRAMEWORKS: &[&str] =
    &["ISO 27001", "NIST CSF", "SOC2", "PCI-DSS", "GDPR", "HIPAA"];

const AUTH_MECHANISMS: &[(&str, &str)] = &[
    ("jwt", "JWT"),
    ("oauth", "OAuth"),
    ("saml", "SAML"),
    ("mfa", "Multi-Factor Auth"),
    ("2fa", "Two-Factor Auth"),
    ("ldap", "LDAP"),
    ("kerberos", "Kerberos"),
];

/// Article 15(5): cybersecurity evidence.
#[derive(Debug, Default)]
pub struct CybersecurityValidator;

impl CybersecurityValidator {
    pub fn new() -> Self {
        CybersecurityValidator
    }

    pub fn validate(&self, bom: &AiBom, root: Option<&Path>) -> CybersecurityRequirements {
        let encryption_in_use =
            any_dependency(bom, PYTHON_ENCRYPTION) || any_dependency(bom, JS_ENCRYPTION);
        let access_controls_implemented =
            any_dependency(bom, PYTHON_AUTH) || any_dependency(bom, JS_AUTH);
        let vulnerability_scanning =
            any_dependency(bom, PYTHON_SCANNING) || any_dependency(bom, JS_SCANNING);

        let incident_response_plan_documented = root.map(has_security_docs).unwrap_or(false);

        // Framework names are matched space-insensitively so "SOC 2" and
        // "soc2" both count.
        let metadata_blob = serde_json::to_string(&bom.metadata)
            .unwrap_or_default()
            .to_uppercase()
            .replace(' ', "");
        let security_frameworks: Vec<String> = SECURITY_FRAMEWORKS
            .iter()
            .filter(|f| metadata_blob.contains(&f.to_uppercase().replace(' ', "")))
            .map(|f| f.to_string())
            .collect();

        let dependency_names = bom
            .dependencies
            .iter()
            .map(|d| d.name.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        let authentication_mechanisms: Vec<String> = AUTH_MECHANISMS
            .iter()
            .filter(|(needle, _)| dependency_names.contains(needle))
            .map(|(_, label)| label.to_string())
            .collect();

        let last_security_audit = metadata_str(bom, "last_security_audit")
            .or_else(|| metadata_str(bom, "security_audit_date"))
            .map(|s| s.to_string());

        CybersecurityRequirements {
            security_measures_implemented: encryption_in_use
                || access_controls_implemented
                || vulnerability_scanning,
            encryption_in_use,
            access_controls_implemented,
            incident_response_plan_documented,
            security_frameworks,
            authentication_mechanisms,
            vulnerability_scanning,
            last_security_audit,
        }
    }
}

/// Whether the tree carries a security policy or incident runbook.
fn has_security_docs(root: &Path) -> bool {
    WalkDir::new(root)
        .max_depth(3)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .any(|entry| {
            let file_name = entry.file_name().to_string_lossy().to_lowercase();
            file_name.ends_with(".md")
                && (file_name.starts_with("security") || file_name.starts_with("incident"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::{DatasetComponent, DatasetType, LicenseType};
    use crate::compliance::validators::test_support::bom_with_deps;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_bare_bom_fails_accuracy() {
        let accuracy = AccuracyValidator::new().validate(&bom_with_deps(&["requests"]), None);
        assert!(!accuracy.metrics_defined);
        assert!(!accuracy.testing_procedures_documented);
        assert!(!accuracy.compliant());
    }

    #[test]
    fn test_pytest_counts_as_defined_metrics() {
        let accuracy = AccuracyValidator::new().validate(&bom_with_deps(&["pytest"]), None);
        assert!(accuracy.metrics_defined);
        // Defined metrics alone are not a full evaluation
        assert!(!accuracy.compliant());
    }

    #[test]
    fn test_metrics_parsed_from_metadata() {
        let mut bom = bom_with_deps(&[]);
        bom.metadata
            .insert("model_accuracy".to_string(), serde_json::json!(0.94));
        bom.metadata
            .insert("f1_score".to_string(), serde_json::json!("0.91"));
        bom.metadata
            .insert("notes".to_string(), serde_json::json!("n/a"));
        let accuracy = AccuracyValidator::new().validate(&bom, None);
        assert_eq!(accuracy.accuracy_metrics.len(), 2);
        assert_eq!(accuracy.accuracy_metrics["model_accuracy"], 0.94);
        assert_eq!(accuracy.accuracy_metrics["f1_score"], 0.91);
    }

    #[test]
    fn test_evaluation_docs_complete_the_article() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("TESTING.md"), "# Test plan").unwrap();
        let mut bom = bom_with_deps(&["pytest"]);
        bom.metadata
            .insert("accuracy".to_string(), serde_json::json!(0.9));
        let accuracy = AccuracyValidator::new().validate(&bom, Some(dir.path()));
        assert!(accuracy.testing_procedures_documented);
        assert!(accuracy.model_evaluation_performed);
        assert!(accuracy.compliant());
    }

    #[test]
    fn test_readme_mentioning_evaluation_counts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "We eval on held-out data.").unwrap();
        let accuracy = AccuracyValidator::new().validate(&bom_with_deps(&[]), Some(dir.path()));
        assert!(accuracy.testing_procedures_documented);
    }

    #[test]
    fn test_benchmark_datasets_recognized() {
        let mut bom = bom_with_deps(&[]);
        bom.datasets.push(DatasetComponent {
            name: "mnist".to_string(),
            dataset_type: DatasetType::Training,
            source_location: None,
            size: None,
            license: LicenseType::Unknown,
            gdpr_compliant: None,
            detected_in: vec![],
            detection_locations: vec![],
            metadata: Default::default(),
        });
        let accuracy = AccuracyValidator::new().validate(&bom, None);
        assert_eq!(accuracy.benchmark_datasets, vec!["MNIST"]);
    }

    #[test]
    fn test_tenacity_provides_fallback() {
        let robustness = RobustnessValidator::new().validate(&bom_with_deps(&["tenacity"]));
        // Error handling keys on dependency names containing the keywords;
        // "tenacity" carries none of them
        assert!(!robustness.error_handling_implemented);
        assert!(robustness.fallback_mechanisms_available);
        assert_eq!(robustness.fault_tolerance_measures, vec!["tenacity (python)"]);
        assert!(!robustness.compliant());
    }

    #[test]
    fn test_full_robustness_stack_compliant() {
        let robustness =
            RobustnessValidator::new().validate(&bom_with_deps(&["retry", "pydantic"]));
        assert!(robustness.error_handling_implemented);
        assert!(robustness.input_validation_present);
        assert!(robustness.compliant());
        assert!(!robustness.adversarial_testing_performed);
    }

    #[test]
    fn test_chaos_tooling_marks_edge_case_testing() {
        let robustness =
            RobustnessValidator::new().validate(&bom_with_deps(&["chaos-toolkit"]));
        assert!(robustness.edge_case_testing_performed);
    }

    #[test]
    fn test_cybersecurity_from_dependencies() {
        let bom = bom_with_deps(&["cryptography", "pyjwt", "bandit"]);
        let cyber = CybersecurityValidator::new().validate(&bom, None);
        assert!(cyber.encryption_in_use);
        assert!(cyber.access_controls_implemented);
        assert!(cyber.vulnerability_scanning);
        assert!(cyber.security_measures_implemented);
        assert_eq!(cyber.authentication_mechanisms, vec!["JWT"]);
        // No frameworks or incident docs
        assert!(!cyber.compliant());
    }

    #[test]
    fn test_frameworks_matched_space_insensitively() {
        let mut bom = bom_with_deps(&[]);
        bom.metadata.insert(
            "certifications".to_string(),
            serde_json::json!("iso27001 and soc 2 audited"),
        );
        let cyber = CybersecurityValidator::new().validate(&bom, None);
        assert!(cyber.security_frameworks.contains(&"ISO 27001".to_string()));
        assert!(cyber.security_frameworks.contains(&"SOC2".to_string()));
    }

    #[test]
    fn test_security_md_documents_incident_plan() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("SECURITY.md"), "# Reporting").unwrap();
        let cyber = CybersecurityValidator::new().validate(&bom_with_deps(&[]), Some(dir.path()));
        assert!(cyber.incident_response_plan_documented);
    }

    #[test]
    fn test_audit_date_read_from_metadata() {
        let mut bom = bom_with_deps(&[]);
        bom.metadata.insert(
            "security_audit_date".to_string(),
            serde_json::json!("2026-02-14"),
        );
        let cyber = CybersecurityValidator::new().validate(&bom, None);
        assert_eq!(cyber.last_security_audit.as_deref(), Some("2026-02-14"));
    }
}
