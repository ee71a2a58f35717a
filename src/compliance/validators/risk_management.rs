use crate::bom::{AiBom, ModelType};
use crate::compliance::requirements::{
    AnnexIiiCategory, HighRiskAssessment, Risk, RiskLevel, RiskLikelihood, RiskManagement,
    RiskSeverity, RiskStatus,
};

/// Article 9 evidence: seeds a risk register from the model families and
/// Annex III categories found in the BOM.
#[derive(Debug, Default)]
pub struct RiskManagementValidator;

/// Catalogue entry: description, category, severity, likelihood.
type CatalogueRisk = (&'static str, &'static str, RiskSeverity, RiskLikelihood);

const LLM_RISKS: &[CatalogueRisk] = &[
    (
        "Biased or discriminatory text generation affecting protected groups",
        "fundamental_rights",
        RiskSeverity::High,
        RiskLikelihood::Medium,
    ),
    (
        "Generation of harmful misleading or illegal content",
        "fundamental_rights",
        RiskSeverity::Critical,
        RiskLikelihood::Medium,
    ),
    (
        "Leakage of personal data memorized from training corpora",
        "data_privacy",
        RiskSeverity::High,
        RiskLikelihood::Low,
    ),
    (
        "Users unaware they interact with an AI system",
        "transparency",
        RiskSeverity::Medium,
        RiskLikelihood::High,
    ),
];

const VISION_RISKS: &[CatalogueRisk] = &[
    (
        "Misidentification of persons in image analysis",
        "fundamental_rights",
        RiskSeverity::High,
        RiskLikelihood::Medium,
    ),
    (
        "Accuracy disparity across demographic groups",
        "fairness",
        RiskSeverity::High,
        RiskLikelihood::Medium,
    ),
    (
        "Repurposing of vision capabilities for surveillance",
        "data_privacy",
        RiskSeverity::Critical,
        RiskLikelihood::Low,
    ),
];

const RECRUITMENT_RISKS: &[CatalogueRisk] = &[
    (
        "Systematic exclusion of candidates from protected groups",
        "fundamental_rights",
        RiskSeverity::Critical,
        RiskLikelihood::Medium,
    ),
    (
        "Proxy discrimination through correlated features",
        "fairness",
        RiskSeverity::High,
        RiskLikelihood::Medium,
    ),
    (
        "Opaque rejection decisions without recourse",
        "transparency",
        RiskSeverity::High,
        RiskLikelihood::High,
    ),
];

impl RiskManagementValidator {
    pub fn new() -> Self {
        RiskManagementValidator
    }

    pub fn validate(
        &self,
        bom: &AiBom,
        risk_level: RiskLevel,
        high_risk: &HighRiskAssessment,
    ) -> RiskManagement {
        let mut register = Vec::new();

        if bom.has_llm() {
            push_catalogue(&mut register, "LLM", LLM_RISKS);
        }
        if bom.models.iter().any(|m| m.model_type == ModelType::Vision) {
            push_catalogue(&mut register, "VIS", VISION_RISKS);
        }

        for category in &high_risk.matched_categories {
            match category {
                AnnexIiiCategory::EmploymentWorkersManagement => {
                    push_catalogue(&mut register, "REC", RECRUITMENT_RISKS);
                    register.push(make_risk(
                        "RISK-EMP-001",
                        "Automated decisions over employment without human review",
                        "fundamental_rights",
                        RiskSeverity::Critical,
                        RiskLikelihood::High,
                    ));
                }
                AnnexIiiCategory::BiometricIdentificationCategorization => {
                    register.push(make_risk(
                        "RISK-BIO-001",
                        "Biometric identification of persons without consent",
                        "fundamental_rights",
                        RiskSeverity::Critical,
                        RiskLikelihood::Medium,
                    ));
                }
                _ => {}
            }
        }

        // A high-risk system with nothing in the register still needs a
        // placeholder so the obligation is visible.
        if risk_level == RiskLevel::High && register.is_empty() {
            register.push(make_risk(
                "RISK-GENERIC-001",
                "High-risk classification without an identified risk inventory",
                "governance",
                RiskSeverity::High,
                RiskLikelihood::Medium,
            ));
        }

        let continuous_process_established = bom.metadata.contains_key("risk_management_process");
        let residual_risks_acceptable = !register
            .iter()
            .any(|r| r.severity == RiskSeverity::Critical && r.status == RiskStatus::Identified);
        let methodology = (!register.is_empty())
            .then(|| "AI-assisted risk identification from scanned components".to_string());
        let review_frequency = if risk_level == RiskLevel::High {
            "Quarterly"
        } else {
            "Annually"
        };

        RiskManagement {
            continuous_process_established,
            risk_register: register,
            residual_risks_acceptable,
            methodology,
            review_frequency: review_frequency.to_string(),
        }
    }
}

fn push_catalogue(register: &mut Vec<Risk>, tag: &str, catalogue: &[CatalogueRisk]) {
    for (i, (description, category, severity, likelihood)) in catalogue.iter().enumerate() {
        register.push(make_risk(
            &format!("RISK-{}-{:03}", tag, i + 1),
            description,
            category,
            *severity,
            *likelihood,
        ));
    }
}

fn make_risk(
    id: &str,
    description: &str,
    category: &str,
    severity: RiskSeverity,
    likelihood: RiskLikelihood,
) -> Risk {
    let title: String = description
        .split_whitespace()
        .take(5)
        .collect::<Vec<_>>()
        .join(" ");
    Risk {
        risk_id: id.to_string(),
        title,
        description: description.to_string(),
        category: category.to_string(),
        severity,
        likelihood,
        affected_stakeholders: vec!["End users".to_string(), "Data subjects".to_string()],
        mitigation_measures: vec![],
        status: RiskStatus::Identified,
    }
}
