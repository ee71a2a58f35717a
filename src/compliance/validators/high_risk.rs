use crate::bom::AiBom;
use crate::compliance::requirements::{AnnexIiiCategory, HighRiskAssessment};
use crate::compliance::validators::metadata_text;

/// Annex III screening: matches keyword lists per category against the
/// BOM name, repository URL, model usage contexts and metadata.
#[derive(Debug, Default)]
pub struct HighRiskClassifier;

const CATEGORY_KEYWORDS: &[(AnnexIiiCategory, &[&str])] = &[
    (
        AnnexIiiCategory::BiometricIdentificationCategorization,
        &[
            "biometric",
            "face recognition",
            "facial recognition",
            "fingerprint",
            "iris scan",
            "emotion recognition",
            "gait analysis",
        ],
    ),
    (
        AnnexIiiCategory::CriticalInfrastructure,
        &[
            "critical infrastructure",
            "power grid",
            "water supply",
            "traffic control",
            "energy management",
            "gas supply",
        ],
    ),
    (
        AnnexIiiCategory::EducationVocationalTraining,
        &[
            "student assessment",
            "exam scoring",
            "grading",
            "admission",
            "proctoring",
            "vocational training",
        ],
    ),
    (
        AnnexIiiCategory::EmploymentWorkersManagement,
        &[
            "recruitment",
            "hiring",
            "resume screening",
            "cv screening",
            "candidate ranking",
            "employee monitoring",
            "promotion decision",
            "termination",
        ],
    ),
    (
        AnnexIiiCategory::EssentialServices,
        &[
            "credit scoring",
            "creditworthiness",
            "credit",
            "loan approval",
            "loan",
            "insurance pricing",
            "social benefits",
            "emergency dispatch",
        ],
    ),
    (
        AnnexIiiCategory::LawEnforcement,
        &[
            "law enforcement",
            "predictive policing",
            "crime prediction",
            "evidence analysis",
            "recidivism",
        ],
    ),
    (
        AnnexIiiCategory::MigrationAsylumBorder,
        &[
            "asylum",
            "visa application",
            "border control",
            "immigration",
            "migration risk",
        ],
    ),
    (
        AnnexIiiCategory::JusticeDemocraticProcesses,
        &[
            "judicial",
            "court decision",
            "sentencing",
            "legal ruling",
            "election",
            "voting",
        ],
    ),
];

impl HighRiskClassifier {
    pub fn new() -> Self {
        HighRiskClassifier
    }

    pub fn classify(&self, bom: &AiBom) -> HighRiskAssessment {
        let haystack = self.searchable_text(bom);

        let mut matched_categories = Vec::new();
        let mut rationale_parts = Vec::new();
        for (category, keywords) in CATEGORY_KEYWORDS {
            let hits: Vec<&&str> = keywords.iter().filter(|k| haystack.contains(*k)).collect();
            if !hits.is_empty() {
                matched_categories.push(*category);
                let shown: Vec<&str> = hits.iter().take(5).map(|k| **k).collect();
                rationale_parts.push(format!(
                    "{} (matched: {})",
                    category.title(),
                    shown.join(", ")
                ));
            }
        }

        let is_high_risk = !matched_categories.is_empty();
        let rationale = if is_high_risk {
            format!("Annex III indicators found: {}", rationale_parts.join("; "))
        } else {
            "No Annex III category indicators found in the scanned artifacts".to_string()
        };

        let mut additional_requirements = Vec::new();
        for category in &matched_categories {
            match category {
                AnnexIiiCategory::EmploymentWorkersManagement => {
                    additional_requirements.extend([
                        "Document human review of every adverse employment decision".to_string(),
                        "Run periodic disparate-impact analysis across protected groups"
                            .to_string(),
                        "Inform candidates that automated processing is in use".to_string(),
                    ]);
                }
                AnnexIiiCategory::BiometricIdentificationCategorization => {
                    additional_requirements.extend([
                        "Obtain conformity assessment from a notified body".to_string(),
                        "Document the lawful basis for biometric processing".to_string(),
                        "Implement strict purpose limitation for biometric templates".to_string(),
                    ]);
                }
                AnnexIiiCategory::EssentialServices => {
                    additional_requirements.extend([
                        "Provide applicants an explanation of scoring factors".to_string(),
                        "Establish an appeal channel with human decision-makers".to_string(),
                        "Audit score distributions for proxy discrimination".to_string(),
                    ]);
                }
                _ => {}
            }
        }

        let notified_body_required = matched_categories
            .contains(&AnnexIiiCategory::BiometricIdentificationCategorization);

        HighRiskAssessment {
            is_high_risk,
            matched_categories,
            rationale,
            additional_requirements,
            notified_body_required,
        }
    }

    fn searchable_text(&self, bom: &AiBom) -> String {
        let mut parts = vec![bom.name.to_lowercase()];
        if let Some(url) = &bom.repository_url {
            parts.push(url.to_lowercase());
        }
        for model in &bom.models {
            if let Some(usage) = &model.usage_context {
                parts.push(usage.to_lowercase());
            }
            parts.push(model.name.to_lowercase());
        }
        parts.push(metadata_text(bom));
        parts.join(" ")
    }
}
