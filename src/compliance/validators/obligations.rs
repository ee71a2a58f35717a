use crate::compliance::requirements::{
    ConformityDeclaration, EuDatabaseRegistration, Obligation, PostMarketMonitoring,
    ProviderObligations, QualityManagementSystem, RiskLevel,
};

/// Articles 8, 16, 17, 61 and 72: the organizational obligations no scan
/// can verify. The checklists are materialized so reports show what is
/// owed; every attestable flag defaults to false.
#[derive(Debug, Default)]
pub struct ObligationsValidator;

/// The Article 16 provider obligation checklist.
const ARTICLE_16_OBLIGATIONS: &[(&str, &str, &str)] = &[
    (
        "OBL-01",
        "Art. 16(a)",
        "Ensure the system complies with the Section 2 requirements",
    ),
    (
        "OBL-02",
        "Art. 16(b)",
        "Indicate provider name and contact details on the system",
    ),
    (
        "OBL-03",
        "Art. 16(c)",
        "Maintain a quality management system per Article 17",
    ),
    (
        "OBL-04",
        "Art. 16(d)",
        "Keep the technical documentation per Article 18",
    ),
    (
        "OBL-05",
        "Art. 16(e)",
        "Retain automatically generated logs under provider control",
    ),
    (
        "OBL-06",
        "Art. 16(f)",
        "Undergo the relevant conformity assessment before market placement",
    ),
    (
        "OBL-07",
        "Art. 16(g)",
        "Draw up an EU declaration of conformity",
    ),
    (
        "OBL-08",
        "Art. 16(h)",
        "Affix the CE marking to the high-risk AI system",
    ),
];

impl ObligationsValidator {
    pub fn new() -> Self {
        ObligationsValidator
    }

    pub fn provider_obligations(&self) -> ProviderObligations {
        ProviderObligations {
            obligations: ARTICLE_16_OBLIGATIONS
                .iter()
                .map(|(id, article, description)| Obligation {
                    obligation_id: id.to_string(),
                    article_ref: article.to_string(),
                    description: description.to_string(),
                    compliant: false,
                })
                .collect(),
            conformity_assessment_completed: false,
        }
    }

    pub fn quality_management(&self) -> QualityManagementSystem {
        QualityManagementSystem {
            qms_established: false,
            compliance_management_strategy: false,
            design_development_control: false,
            testing_validation_procedures: false,
            post_market_monitoring_plan: false,
            change_management_procedure: false,
        }
    }

    pub fn eu_database(&self, risk_level: RiskLevel) -> EuDatabaseRegistration {
        EuDatabaseRegistration {
            registration_required: risk_level == RiskLevel::High,
            registration_completed: false,
            registration_id: None,
        }
    }

    pub fn post_market(&self, risk_level: RiskLevel) -> PostMarketMonitoring {
        PostMarketMonitoring {
            monitoring_plan_established: false,
            incident_reporting_procedure: false,
            incident_contact_designated: false,
            corrective_actions_procedure: false,
            monitoring_frequency: if risk_level == RiskLevel::High {
                "Monthly".to_string()
            } else {
                "Quarterly".to_string()
            },
        }
    }

    pub fn conformity(&self) -> ConformityDeclaration {
        ConformityDeclaration {
            all_requirements_met: false,
            conformity_declaration_signed: false,
        }
    }
}
