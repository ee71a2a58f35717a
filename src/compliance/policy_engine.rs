//! The Annex IV policy engine: turns a BOM into per-article verdicts,
//! a compliance score and an ordered list of critical gaps.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::bom::AiBom;
use crate::compliance::gaps::GapCode;
use crate::compliance::recommendations::build_recommendations;
use crate::compliance::requirements::{AnnexIvRequirements, RiskLevel, TechnicalDocumentation};
use crate::compliance::validators::{
    AccuracyValidator, CybersecurityValidator, DataGovernanceValidator, GpaiValidator,
    HighRiskClassifier, LoggingValidator, ObligationsValidator, RiskManagementValidator,
    RobustnessValidator,
};
use crate::manifest::is_core_ai_library;
use crate::shared::Result;

/// Score below which a system cannot be compliant, regardless of gaps.
pub const COMPLIANCE_SCORE_THRESHOLD: f64 = 0.85;

/// A full evaluation of one BOM against the EU AI Act.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub system_id: String,
    pub evaluated_at: DateTime<Utc>,
    pub bom_spdx_id: String,
    pub compliant: bool,
    pub compliance_score: f64,
    pub risk_level: RiskLevel,
    pub critical_gaps: Vec<GapCode>,
    pub recommendations: Vec<String>,
    pub requirements: AnnexIvRequirements,
    pub is_ai_system: bool,
    pub report: serde_json::Value,
}

impl ComplianceResult {
    /// Parses a stored `policy_results.json`.
    ///
    /// # Errors
    /// Returns an error when the JSON does not describe an evaluation
    pub fn from_json(content: &str) -> Result<Self> {
        let result: ComplianceResult = serde_json::from_str(content)?;
        Ok(result)
    }
}

/// Evaluates BOMs against the Annex IV requirement families.
#[derive(Debug, Default)]
pub struct PolicyEngine {
    data_governance: DataGovernanceValidator,
    risk_management: RiskManagementValidator,
    logging: LoggingValidator,
    high_risk: HighRiskClassifier,
    gpai: GpaiValidator,
    obligations: ObligationsValidator,
    accuracy: AccuracyValidator,
    robustness: RobustnessValidator,
    cybersecurity: CybersecurityValidator,
}

impl PolicyEngine {
    pub fn new() -> Self {
        PolicyEngine::default()
    }

    /// Evaluates one BOM.
    ///
    /// # Arguments
    ///
    /// * `bom` - The AI-BOM to evaluate
    /// * `root` - Repository working tree, when available, for the
    ///   documentation checks that read files
    ///
    /// # Returns
    ///
    /// The complete evaluation. This never fails: absent evidence shows
    /// up as non-compliance, not as an error.
    pub fn evaluate(&self, bom: &AiBom, root: Option<&Path>) -> ComplianceResult {
        let is_ai_system = !bom.models.is_empty()
            || !bom.datasets.is_empty()
            || bom.dependencies.iter().any(|d| is_core_ai_library(&d.name));

        if !is_ai_system {
            // Nothing here is in scope of the Act; skip the article
            // validators and the tree walks entirely.
            info!("{} carries no AI components", bom.system_name());
            return self.non_ai_result(bom);
        }

        let (requirements, risk_level) = self.assess(bom, root);

        let critical_gaps = collect_gaps(&requirements, risk_level);
        let compliance_score = requirements.compliance_score();

        let is_high = risk_level == RiskLevel::High;
        let high_risk_essentials_met = !is_high
            || (requirements.article_9_compliant
                && requirements.article_10_compliant
                && requirements.article_11_compliant
                && requirements.article_12_compliant
                && requirements.article_14_compliant);
        let compliant = compliance_score >= COMPLIANCE_SCORE_THRESHOLD
            && critical_gaps.is_empty()
            && high_risk_essentials_met;

        let recommendations =
            build_recommendations(bom, &requirements, &critical_gaps, risk_level);

        info!(
            "{}: score {:.0}%, {} gaps, risk {}",
            bom.system_name(),
            compliance_score * 100.0,
            critical_gaps.len(),
            risk_level
        );

        let report = build_report(
            bom,
            &requirements,
            compliance_score,
            risk_level,
            &critical_gaps,
            &recommendations,
        );

        ComplianceResult {
            system_id: bom.system_name().to_string(),
            evaluated_at: Utc::now(),
            bom_spdx_id: bom.spdx_id.clone(),
            compliant,
            compliance_score,
            risk_level,
            critical_gaps,
            recommendations,
            requirements,
            is_ai_system: true,
            report,
        }
    }

    /// Runs every article validator and assembles the requirement set.
    fn assess(&self, bom: &AiBom, root: Option<&Path>) -> (AnnexIvRequirements, RiskLevel) {
        let high_risk = self.high_risk.classify(bom);
        let risk_level = if high_risk.is_high_risk {
            RiskLevel::High
        } else if bom.has_llm() || bom.models.len() > 1 {
            RiskLevel::High
        } else if !bom.models.is_empty() {
            RiskLevel::Limited
        } else {
            RiskLevel::Minimal
        };
        debug!(
            "risk level {} for {} ({} models, {} datasets)",
            risk_level,
            bom.system_name(),
            bom.models.len(),
            bom.datasets.len()
        );

        let data_governance = self.data_governance.validate(bom);
        let risk_management = self.risk_management.validate(bom, risk_level, &high_risk);
        let logging = self.logging.validate(bom);
        let gpai = self.gpai.assess(bom);
        let provider_obligations = self.obligations.provider_obligations();
        let quality_management = self.obligations.quality_management();
        let eu_database = self.obligations.eu_database(risk_level);
        let post_market = self.obligations.post_market(risk_level);
        let conformity = self.obligations.conformity();
        let accuracy = self.accuracy.validate(bom, root);
        let robustness = self.robustness.validate(bom);
        let cybersecurity = self.cybersecurity.validate(bom, root);

        let documentation =
            extract_documentation(bom, risk_level, &accuracy.accuracy_metrics, &risk_management);

        let is_high = risk_level == RiskLevel::High;
        let article_14_compliant = !(is_high
            && (documentation.human_oversight.is_none()
                || documentation.oversight_measures.is_empty()));

        let requirements = AnnexIvRequirements {
            article_8_compliant: conformity.compliant(),
            article_9_compliant: risk_management.compliant(),
            article_10_compliant: data_governance.compliant(),
            article_11_compliant: documentation.article_11_compliant(),
            article_12_compliant: logging.compliant(),
            article_13_compliant: true,
            article_14_compliant,
            article_15_compliant: !accuracy.accuracy_metrics.is_empty(),
            article_16_compliant: provider_obligations.conformity_assessment_completed,
            article_17_compliant: quality_management.compliant(),
            article_61_compliant: eu_database.compliant(),
            article_72_compliant: post_market.compliant(),
            article_73_compliant: post_market.incident_reporting_procedure,
            data_governance,
            risk_management,
            logging,
            high_risk,
            gpai,
            provider_obligations,
            quality_management,
            eu_database,
            post_market,
            conformity,
            accuracy,
            robustness,
            cybersecurity,
            documentation,
        };

        (requirements, risk_level)
    }

    fn non_ai_result(&self, bom: &AiBom) -> ComplianceResult {
        // The stored requirement set keeps its full shape; with no AI
        // components the validators are cheap and no tree is walked.
        let (mut requirements, _) = self.assess(bom, None);
        requirements.article_8_compliant = true;
        let report = json!({
            "ai_bom_summary": {
                "models": 0,
                "datasets": 0,
                "dependencies": bom.dependencies.len(),
            },
            "verdict": "not an AI system",
        });
        ComplianceResult {
            system_id: bom.system_name().to_string(),
            evaluated_at: Utc::now(),
            bom_spdx_id: bom.spdx_id.clone(),
            compliant: true,
            compliance_score: 1.0,
            risk_level: RiskLevel::Minimal,
            critical_gaps: Vec::new(),
            recommendations: vec![
                "No action required - this is not an AI system subject to EU AI Act".to_string(),
            ],
            requirements,
            is_ai_system: false,
            report,
        }
    }
}

/// Auto-extracts Article 11 documentation from the BOM. Fields the scan
/// cannot fill carry the "To be specified" placeholder, which Article 11
/// counts as missing.
fn extract_documentation(
    bom: &AiBom,
    risk_level: RiskLevel,
    accuracy_metrics: &BTreeMap<String, f64>,
    risk_management: &crate::compliance::requirements::RiskManagement,
) -> TechnicalDocumentation {
    let general_description = if bom.models.is_empty() {
        "To be specified".to_string()
    } else {
        let names: Vec<&str> = bom.models.iter().take(3).map(|m| m.name.as_str()).collect();
        format!("AI system using: {}", names.join(", "))
    };

    let software_dependencies: Vec<String> = bom
        .dependencies
        .iter()
        .take(10)
        .map(|d| d.name.clone())
        .collect();

    let mut risk_management_doc = BTreeMap::new();
    if !risk_management.risk_register.is_empty() {
        risk_management_doc.insert(
            "review_frequency".to_string(),
            risk_management.review_frequency.clone(),
        );
        if let Some(methodology) = &risk_management.methodology {
            risk_management_doc.insert("methodology".to_string(), methodology.clone());
        }
    }

    TechnicalDocumentation {
        system_name: bom.system_name().to_string(),
        system_version: None,
        risk_level,
        general_description,
        intended_purpose: "To be specified".to_string(),
        context_of_use: "To be specified".to_string(),
        logic_description: "To be specified".to_string(),
        technical_specifications: BTreeMap::new(),
        software_dependencies,
        accuracy_metrics: accuracy_metrics.clone(),
        risk_management: risk_management_doc,
        identified_risks: risk_management
            .risk_register
            .iter()
            .map(|r| r.title.clone())
            .collect(),
        oversight_measures: Vec::new(),
        transparency_measures: Vec::new(),
        human_oversight: None,
    }
}

/// Gap emission in fixed order, so stored results diff cleanly.
fn collect_gaps(requirements: &AnnexIvRequirements, risk_level: RiskLevel) -> Vec<GapCode> {
    let is_high = risk_level == RiskLevel::High;
    let mut gaps = Vec::new();

    if !requirements.article_10_compliant {
        gaps.push(GapCode::DataGovernance);
    }
    if !requirements.article_9_compliant {
        gaps.push(GapCode::RiskManagement);
    }
    if !requirements.article_12_compliant {
        gaps.push(GapCode::Logging);
    }
    if !requirements.article_11_compliant {
        gaps.push(GapCode::TechnicalDocumentation);
    }
    if is_high && !requirements.article_14_compliant {
        gaps.push(GapCode::HumanOversight);
    }
    if !requirements.accuracy.compliant() {
        gaps.push(GapCode::Accuracy);
    }
    if !requirements.robustness.compliant() {
        gaps.push(GapCode::Robustness);
    }
    if !requirements.cybersecurity.compliant() {
        gaps.push(GapCode::Cybersecurity);
    }
    if !requirements.article_16_compliant {
        gaps.push(GapCode::ProviderObligations);
    }
    if is_high && !requirements.quality_management.compliant() {
        gaps.push(GapCode::QualityManagement);
    }
    if is_high && !requirements.eu_database.compliant() {
        gaps.push(GapCode::EuDatabaseRegistration);
    }
    if is_high && !requirements.post_market.compliant() {
        gaps.push(GapCode::PostMarketMonitoring);
    }
    if let Some(gpai) = &requirements.gpai {
        if !gpai.compliant_as_deployer() {
            gaps.push(GapCode::GpaiObligations);
        }
    }
    gaps
}

fn build_report(
    bom: &AiBom,
    requirements: &AnnexIvRequirements,
    compliance_score: f64,
    risk_level: RiskLevel,
    critical_gaps: &[GapCode],
    recommendations: &[String],
) -> serde_json::Value {
    json!({
        "ai_bom_summary": {
            "models": bom.models.len(),
            "datasets": bom.datasets.len(),
            "dependencies": bom.dependencies.len(),
            "ai_dependencies": bom.dependencies.iter().filter(|d| d.is_ai_related).count(),
        },
        "compliance_score": format!("{:.0}%", compliance_score * 100.0),
        "articles_compliant": format!(
            "{}/{}",
            requirements.articles_compliant_count(),
            requirements.total_articles_checked()
        ),
        "risk_level": risk_level.to_string(),
        "high_risk_rationale": requirements.high_risk.rationale,
        "gap_count": critical_gaps.len(),
        "recommendation_count": recommendations.len(),
    })
}
