use crate::bom::{AiBom, LicenseType};
use crate::compliance::requirements::DataGovernance;

/// Article 10 evidence: dataset documentation, relevance,
/// representativeness and GDPR status, plus a coarse quality score.
#[derive(Debug, Default)]
pub struct DataGovernanceValidator;

impl DataGovernanceValidator {
    pub fn new() -> Self {
        DataGovernanceValidator
    }

    pub fn validate(&self, bom: &AiBom) -> DataGovernance {
        let datasets_documented = !bom.datasets.is_empty();

        let data_relevance_documented = bom.datasets.iter().any(|ds| {
            ds.metadata.contains_key("purpose") || ds.metadata.contains_key("relevance")
        });

        let representativeness_assessed = bom.datasets.iter().any(|ds| {
            ds.metadata.contains_key("representativeness")
                || ds.metadata.contains_key("demographics")
        });

        // No datasets means nothing to verify; otherwise every dataset must
        // carry an explicit GDPR verdict, either way.
        let gdpr_compliance_verified = bom.datasets.is_empty()
            || bom.datasets.iter().all(|ds| ds.gdpr_compliant.is_some());

        let overall_quality_score = if bom.datasets.is_empty() {
            0.0
        } else {
            let total: f64 = bom
                .datasets
                .iter()
                .map(|ds| {
                    let mut score = 0.0;
                    if ds.size.is_some() {
                        score += 0.25;
                    }
                    if ds.source_location.is_some() {
                        score += 0.25;
                    }
                    if ds.license != LicenseType::Unknown {
                        score += 0.25;
                    }
                    if !ds.metadata.is_empty() {
                        score += 0.25;
                    }
                    score
                })
                .sum();
            total / bom.datasets.len() as f64
        };

        // Heuristic sub-scores: consistency tracks the overall score past
        // the 0.5 mark, timeliness is a fixed estimate.
        let consistency_score = if overall_quality_score > 0.5 { 0.8 } else { 0.5 };
        let timeliness_score = 0.7;

        let mut bias_categories = Vec::new();
        for ds in &bom.datasets {
            for key in ["bias", "bias_categories"] {
                match ds.metadata.get(key) {
                    Some(serde_json::Value::String(s)) => bias_categories.push(s.clone()),
                    Some(serde_json::Value::Array(items)) => {
                        bias_categories
                            .extend(items.iter().filter_map(|v| v.as_str().map(String::from)));
                    }
                    _ => {}
                }
            }
        }

        DataGovernance {
            datasets_documented,
            data_relevance_documented,
            representativeness_assessed,
            gdpr_compliance_verified,
            overall_quality_score,
            consistency_score,
            timeliness_score,
            bias_categories,
        }
    }
}
