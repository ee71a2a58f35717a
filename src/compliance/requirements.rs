//! Typed records for the Annex IV requirement families.
//!
//! Each record exposes a `compliant()` predicate implementing the letter of
//! its article; the policy engine combines them. Everything derives serde
//! because evaluations are persisted as `policy_results.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// EU AI Act risk tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Minimal,
    Limited,
    High,
    Prohibited,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Minimal => "minimal",
            RiskLevel::Limited => "limited",
            RiskLevel::High => "high",
            RiskLevel::Prohibited => "prohibited",
        };
        write!(f, "{}", s)
    }
}

/// Annex III high-risk categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnexIiiCategory {
    BiometricIdentificationCategorization,
    CriticalInfrastructure,
    EducationVocationalTraining,
    EmploymentWorkersManagement,
    EssentialServices,
    LawEnforcement,
    MigrationAsylumBorder,
    JusticeDemocraticProcesses,
}

impl AnnexIiiCategory {
    pub fn title(&self) -> &'static str {
        match self {
            AnnexIiiCategory::BiometricIdentificationCategorization => {
                "Biometric identification and categorisation"
            }
            AnnexIiiCategory::CriticalInfrastructure => "Critical infrastructure",
            AnnexIiiCategory::EducationVocationalTraining => "Education and vocational training",
            AnnexIiiCategory::EmploymentWorkersManagement => {
                "Employment and workers management"
            }
            AnnexIiiCategory::EssentialServices => "Access to essential services",
            AnnexIiiCategory::LawEnforcement => "Law enforcement",
            AnnexIiiCategory::MigrationAsylumBorder => "Migration, asylum and border control",
            AnnexIiiCategory::JusticeDemocraticProcesses => {
                "Administration of justice and democratic processes"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSeverity {
    Critical,
    High,
    Medium,
    Low,
    Negligible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLikelihood {
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskStatus {
    Identified,
    Mitigated,
    Accepted,
}

/// One entry in the Article 9 risk register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub risk_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub severity: RiskSeverity,
    pub likelihood: RiskLikelihood,
    pub affected_stakeholders: Vec<String>,
    pub mitigation_measures: Vec<String>,
    pub status: RiskStatus,
}

impl Risk {
    /// Severity x likelihood on a 1-5 scale each, so scores run 1 to 25.
    pub fn risk_score(&self) -> u8 {
        let severity = match self.severity {
            RiskSeverity::Critical => 5,
            RiskSeverity::High => 4,
            RiskSeverity::Medium => 3,
            RiskSeverity::Low => 2,
            RiskSeverity::Negligible => 1,
        };
        let likelihood = match self.likelihood {
            RiskLikelihood::VeryHigh => 5,
            RiskLikelihood::High => 4,
            RiskLikelihood::Medium => 3,
            RiskLikelihood::Low => 2,
            RiskLikelihood::VeryLow => 1,
        };
        severity * likelihood
    }
}

/// Article 10 - data and data governance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataGovernance {
    pub datasets_documented: bool,
    pub data_relevance_documented: bool,
    pub representativeness_assessed: bool,
    pub gdpr_compliance_verified: bool,
    pub overall_quality_score: f64,
    pub consistency_score: f64,
    pub timeliness_score: f64,
    pub bias_categories: Vec<String>,
}

impl DataGovernance {
    pub fn compliant(&self) -> bool {
        self.datasets_documented
            && self.data_relevance_documented
            && self.representativeness_assessed
            && self.gdpr_compliance_verified
    }
}

/// Article 9 - risk management system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskManagement {
    pub continuous_process_established: bool,
    pub risk_register: Vec<Risk>,
    pub residual_risks_acceptable: bool,
    pub methodology: Option<String>,
    pub review_frequency: String,
}

impl RiskManagement {
    pub fn critical_risks_count(&self) -> usize {
        self.risk_register
            .iter()
            .filter(|r| r.severity == RiskSeverity::Critical)
            .count()
    }

    pub fn unmitigated_risks_count(&self) -> usize {
        self.risk_register
            .iter()
            .filter(|r| r.status == RiskStatus::Identified)
            .count()
    }

    pub fn compliant(&self) -> bool {
        self.continuous_process_established
            && !self.risk_register.is_empty()
            && self.critical_risks_count() == 0
            && self.residual_risks_acceptable
    }
}

/// Events Article 12 requires in the automatic logs.
pub const REQUIRED_LOG_EVENTS: &[&str] = &["input_data", "output_data", "decisions", "timestamp"];

/// Article 12 - record-keeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingCapability {
    pub automatic_logging_enabled: bool,
    pub retention_period_months: u32,
    pub audit_trail_immutable: bool,
    pub events_logged: Vec<String>,
    pub log_format: String,
    pub access_control_enabled: bool,
}

impl LoggingCapability {
    pub fn compliant(&self) -> bool {
        self.automatic_logging_enabled
            && self.retention_period_months >= 6
            && self.audit_trail_immutable
            && REQUIRED_LOG_EVENTS
                .iter()
                .all(|e| self.events_logged.iter().any(|logged| logged == e))
    }
}

/// Annex III screening outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighRiskAssessment {
    pub is_high_risk: bool,
    pub matched_categories: Vec<AnnexIiiCategory>,
    pub rationale: String,
    pub additional_requirements: Vec<String>,
    pub notified_body_required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GpaiType {
    Llm,
    Vision,
    Embedding,
    CodeGeneration,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GpaiRole {
    Provider,
    Deployer,
}

/// General-purpose AI assessment (Annex X-XIII obligations).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpaiAssessment {
    pub providers: Vec<String>,
    pub gpai_type: GpaiType,
    pub user_role: GpaiRole,
    pub systemic_risk: bool,
    pub transparency_info_provided_to_users: bool,
    pub ai_generated_content_disclosed: bool,
    pub upstream_provider_compliance_verified: bool,
    pub intended_use_documented: bool,
    pub downstream_risk_assessment_performed: bool,
}

impl GpaiAssessment {
    pub fn compliant_as_deployer(&self) -> bool {
        self.transparency_info_provided_to_users
            && self.ai_generated_content_disclosed
            && self.upstream_provider_compliance_verified
            && self.intended_use_documented
            && self.downstream_risk_assessment_performed
    }
}

/// One Article 16 obligation line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obligation {
    pub obligation_id: String,
    pub article_ref: String,
    pub description: String,
    pub compliant: bool,
}

/// Article 16 - provider obligations checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderObligations {
    pub obligations: Vec<Obligation>,
    pub conformity_assessment_completed: bool,
}

impl ProviderObligations {
    pub fn compliance_percentage(&self) -> f64 {
        if self.obligations.is_empty() {
            return 0.0;
        }
        let compliant = self.obligations.iter().filter(|o| o.compliant).count();
        compliant as f64 / self.obligations.len() as f64 * 100.0
    }
}

/// Article 17 - quality management system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityManagementSystem {
    pub qms_established: bool,
    pub compliance_management_strategy: bool,
    pub design_development_control: bool,
    pub testing_validation_procedures: bool,
    pub post_market_monitoring_plan: bool,
    pub change_management_procedure: bool,
}

impl QualityManagementSystem {
    pub fn compliant(&self) -> bool {
        self.qms_established
            && self.compliance_management_strategy
            && self.design_development_control
            && self.testing_validation_procedures
            && self.post_market_monitoring_plan
            && self.change_management_procedure
    }
}

/// Article 61/71 - EU database registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EuDatabaseRegistration {
    pub registration_required: bool,
    pub registration_completed: bool,
    pub registration_id: Option<String>,
}

impl EuDatabaseRegistration {
    pub fn compliant(&self) -> bool {
        !self.registration_required
            || (self.registration_completed && self.registration_id.is_some())
    }
}

/// Article 72/73 - post-market monitoring and incident reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMarketMonitoring {
    pub monitoring_plan_established: bool,
    pub incident_reporting_procedure: bool,
    pub incident_contact_designated: bool,
    pub corrective_actions_procedure: bool,
    pub monitoring_frequency: String,
}

impl PostMarketMonitoring {
    pub fn compliant(&self) -> bool {
        self.monitoring_plan_established
            && self.incident_reporting_procedure
            && self.incident_contact_designated
            && self.corrective_actions_procedure
    }
}

/// Article 8 - compliance with requirements and conformity declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConformityDeclaration {
    pub all_requirements_met: bool,
    pub conformity_declaration_signed: bool,
}

impl ConformityDeclaration {
    pub fn compliant(&self) -> bool {
        self.all_requirements_met && self.conformity_declaration_signed
    }
}

/// Article 15 - accuracy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyRequirements {
    pub metrics_defined: bool,
    pub accuracy_metrics: BTreeMap<String, f64>,
    pub testing_procedures_documented: bool,
    pub model_evaluation_performed: bool,
    pub benchmark_datasets: Vec<String>,
}

impl AccuracyRequirements {
    pub fn compliant(&self) -> bool {
        self.metrics_defined && self.testing_procedures_documented && self.model_evaluation_performed
    }
}

/// Article 15 - robustness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobustnessRequirements {
    pub error_handling_implemented: bool,
    pub fallback_mechanisms_available: bool,
    pub input_validation_present: bool,
    pub fault_tolerance_measures: Vec<String>,
    pub adversarial_testing_performed: bool,
    pub edge_case_testing_performed: bool,
}

impl RobustnessRequirements {
    pub fn compliant(&self) -> bool {
        self.error_handling_implemented
            && self.fallback_mechanisms_available
            && self.input_validation_present
            && !self.fault_tolerance_measures.is_empty()
    }
}

/// Article 15 - cybersecurity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CybersecurityRequirements {
    pub security_measures_implemented: bool,
    pub encryption_in_use: bool,
    pub access_controls_implemented: bool,
    pub incident_response_plan_documented: bool,
    pub security_frameworks: Vec<String>,
    pub authentication_mechanisms: Vec<String>,
    pub vulnerability_scanning: bool,
    pub last_security_audit: Option<String>,
}

impl CybersecurityRequirements {
    pub fn compliant(&self) -> bool {
        self.security_measures_implemented
            && self.encryption_in_use
            && self.access_controls_implemented
            && self.incident_response_plan_documented
            && !self.security_frameworks.is_empty()
    }
}

/// Article 11 - technical documentation, auto-extracted from the BOM when
/// no hand-written documentation is supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalDocumentation {
    pub system_name: String,
    pub system_version: Option<String>,
    pub risk_level: RiskLevel,
    pub general_description: String,
    pub intended_purpose: String,
    pub context_of_use: String,
    pub logic_description: String,
    pub technical_specifications: BTreeMap<String, String>,
    pub software_dependencies: Vec<String>,
    pub accuracy_metrics: BTreeMap<String, f64>,
    pub risk_management: BTreeMap<String, String>,
    pub identified_risks: Vec<String>,
    pub oversight_measures: Vec<String>,
    pub transparency_measures: Vec<String>,
    pub human_oversight: Option<BTreeMap<String, String>>,
}

/// Fields Article 11 requires to be present and non-empty.
pub const ARTICLE_11_REQUIRED_FIELDS: &[&str] = &[
    "general_description",
    "intended_purpose",
    "context_of_use",
    "logic_description",
    "technical_specifications",
    "accuracy_metrics",
    "risk_management",
];

impl TechnicalDocumentation {
    /// Names of required Article 11 fields that are absent or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let text_fields: [(&'static str, &str); 4] = [
            ("general_description", &self.general_description),
            ("intended_purpose", &self.intended_purpose),
            ("context_of_use", &self.context_of_use),
            ("logic_description", &self.logic_description),
        ];
        for (name, value) in text_fields {
            if value.trim().is_empty() || value == "To be specified" {
                missing.push(name);
            }
        }
        if self.technical_specifications.is_empty() {
            missing.push("technical_specifications");
        }
        if self.accuracy_metrics.is_empty() {
            missing.push("accuracy_metrics");
        }
        if self.risk_management.is_empty() {
            missing.push("risk_management");
        }
        missing
    }

    pub fn article_11_compliant(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// The full Annex IV evaluation: one record per requirement family plus
/// the per-article verdicts the policy engine derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnexIvRequirements {
    pub data_governance: DataGovernance,
    pub risk_management: RiskManagement,
    pub logging: LoggingCapability,
    pub high_risk: HighRiskAssessment,
    pub gpai: Option<GpaiAssessment>,
    pub provider_obligations: ProviderObligations,
    pub quality_management: QualityManagementSystem,
    pub eu_database: EuDatabaseRegistration,
    pub post_market: PostMarketMonitoring,
    pub conformity: ConformityDeclaration,
    pub accuracy: AccuracyRequirements,
    pub robustness: RobustnessRequirements,
    pub cybersecurity: CybersecurityRequirements,
    pub documentation: TechnicalDocumentation,

    pub article_8_compliant: bool,
    pub article_9_compliant: bool,
    pub article_10_compliant: bool,
    pub article_11_compliant: bool,
    pub article_12_compliant: bool,
    pub article_13_compliant: bool,
    pub article_14_compliant: bool,
    pub article_15_compliant: bool,
    pub article_16_compliant: bool,
    pub article_17_compliant: bool,
    pub article_61_compliant: bool,
    pub article_72_compliant: bool,
    pub article_73_compliant: bool,
}

impl AnnexIvRequirements {
    /// Number of articles evaluated: the 13 fixed ones, plus the GPAI
    /// obligations when GPAI models were detected.
    pub fn total_articles_checked(&self) -> usize {
        13 + usize::from(self.gpai.is_some())
    }

    pub fn articles_compliant_count(&self) -> usize {
        let fixed = [
            self.article_8_compliant,
            self.article_9_compliant,
            self.article_10_compliant,
            self.article_11_compliant,
            self.article_12_compliant,
            self.article_13_compliant,
            self.article_14_compliant,
            self.article_15_compliant,
            self.article_16_compliant,
            self.article_17_compliant,
            self.article_61_compliant,
            self.article_72_compliant,
            self.article_73_compliant,
        ]
        .iter()
        .filter(|c| **c)
        .count();
        let gpai = self
            .gpai
            .as_ref()
            .map(|g| usize::from(g.compliant_as_deployer()))
            .unwrap_or(0);
        fixed + gpai
    }

    /// Compliant articles over articles checked, in [0.0, 1.0].
    pub fn compliance_score(&self) -> f64 {
        self.articles_compliant_count() as f64 / self.total_articles_checked() as f64
    }
}

/// Timestamped evaluation header shared by stored results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationInfo {
    pub evaluated_at: DateTime<Utc>,
    pub evaluator: String,
}
