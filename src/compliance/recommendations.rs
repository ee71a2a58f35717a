//! Prioritized remediation advice derived from an evaluation.
//!
//! Ordering is by severity tier, so the first entries are always the
//! article fixes that block compliance outright. The list is capped:
//! a wall of advice helps nobody.

use crate::bom::AiBom;
use crate::compliance::gaps::GapCode;
use crate::compliance::requirements::{AnnexIvRequirements, RiskLevel};

/// Upper bound on emitted recommendations.
pub const MAX_RECOMMENDATIONS: usize = 15;

pub fn build_recommendations(
    bom: &AiBom,
    requirements: &AnnexIvRequirements,
    gaps: &[GapCode],
    risk_level: RiskLevel,
) -> Vec<String> {
    let mut recs = Vec::new();
    let is_high = risk_level == RiskLevel::High;

    // Tier 1: the article fixes that block compliance outright.
    if gaps.contains(&GapCode::DataGovernance) {
        recs.push(
            "Document purpose, representativeness and GDPR status for every training dataset (Article 10)"
                .to_string(),
        );
    }
    if gaps.contains(&GapCode::RiskManagement) {
        recs.push(format!(
            "Establish a continuous risk management process; {} identified risks await mitigation (Article 9)",
            requirements.risk_management.unmitigated_risks_count()
        ));
    }
    if gaps.contains(&GapCode::Logging) {
        recs.push(
            "Implement automatic, tamper-evident logging of inputs, outputs and decisions with at least 6 months retention (Article 12)"
                .to_string(),
        );
    }
    if gaps.contains(&GapCode::TechnicalDocumentation) {
        let missing = requirements.documentation.missing_fields();
        let shown: Vec<&str> = missing.iter().take(3).copied().collect();
        recs.push(format!(
            "Complete the technical documentation; missing: {} (Article 11)",
            shown.join(", ")
        ));
    }
    if gaps.contains(&GapCode::HumanOversight) {
        recs.push(
            "Define human oversight measures enabling intervention in system decisions (Article 14)"
                .to_string(),
        );
    }

    // Tier 2: high-risk registration and governance duties.
    if is_high {
        if !requirements.eu_database.compliant() {
            recs.push(
                "Register the system in the EU database before placing it on the market (Article 61)"
                    .to_string(),
            );
        }
        if !requirements.post_market.compliant() {
            recs.push(
                "Establish a post-market monitoring plan proportionate to the system risks (Article 72)"
                    .to_string(),
            );
        }
        if !requirements.quality_management.compliant() {
            recs.push(
                "Set up a quality management system covering design, testing and change control (Article 17)"
                    .to_string(),
            );
        }
    }

    // Tier 3: Annex III findings, each with its specific duties.
    if requirements.high_risk.is_high_risk {
        for category in &requirements.high_risk.matched_categories {
            let rationale: String = requirements.high_risk.rationale.chars().take(100).collect();
            recs.push(format!(
                "High-risk use detected ({}): {}",
                category.title(),
                rationale
            ));
        }
        for requirement in requirements.high_risk.additional_requirements.iter().take(2) {
            recs.push(format!("   └─ {}", requirement));
        }
    }

    // Tier 4: GPAI deployer duties.
    if let Some(gpai) = &requirements.gpai {
        let names: Vec<&str> = bom.models.iter().take(3).map(|m| m.name.as_str()).collect();
        recs.push(format!(
            "Verify upstream GPAI provider compliance ({}) and document intended use for: {}",
            gpai.providers.join(", "),
            names.join(", ")
        ));
        if gpai.systemic_risk {
            recs.push(
                "A systemic-risk GPAI model is in use; the extended Annex XIII obligations apply"
                    .to_string(),
            );
        }
    }

    // Tier 5: data quality.
    if requirements.data_governance.datasets_documented
        && requirements.data_governance.overall_quality_score < 0.7
    {
        recs.push(format!(
            "Improve dataset documentation; only {:.0}% of expected facets are present",
            requirements.data_governance.overall_quality_score * 100.0
        ));
    }
    if !requirements.data_governance.bias_categories.is_empty() {
        recs.push(format!(
            "Assess and mitigate the documented bias categories: {}",
            requirements.data_governance.bias_categories.join(", ")
        ));
    }

    // Tier 6: risk register follow-up.
    let critical = requirements.risk_management.critical_risks_count();
    if critical > 0 {
        recs.push(format!(
            "Mitigate the {} critical risk(s) in the register; review {}",
            critical,
            requirements.risk_management.review_frequency.to_lowercase()
        ));
    }

    // Tier 7: measurable accuracy.
    if requirements.accuracy.accuracy_metrics.is_empty() {
        recs.push(
            "Define accuracy metrics (accuracy, F1, precision) and record evaluation results (Article 15)"
                .to_string(),
        );
    }

    // Tier 8: transparency toward users.
    if bom.has_llm() {
        recs.push(
            "Disclose AI interaction to end users and document output limitations (Article 13)"
                .to_string(),
        );
    }

    // Tier 9: provider obligations progress.
    if requirements.provider_obligations.compliance_percentage() < 80.0 {
        recs.push(format!(
            "Work through the Article 16 provider obligation checklist ({:.0}% complete)",
            requirements.provider_obligations.compliance_percentage()
        ));
    }

    // Tier 10: incident readiness.
    if !requirements.post_market.incident_reporting_procedure
        || !requirements.post_market.incident_contact_designated
    {
        recs.push(
            "Establish a serious-incident reporting procedure and designate a contact (Article 73)"
                .to_string(),
        );
    }

    // Tier 11: nothing much to say.
    if recs.len() < 3 {
        recs.push(
            "Maintain the current compliance posture and re-evaluate after significant changes"
                .to_string(),
        );
    }

    recs.truncate(MAX_RECOMMENDATIONS);
    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::{AiBom, LicenseType, ModelComponent, ModelType};
    use crate::compliance::policy_engine::PolicyEngine;

    fn llm_bom() -> AiBom {
        let mut bom = AiBom::new("chatbot");
        bom.models.push(ModelComponent {
            name: "gpt-4".to_string(),
            version: None,
            model_type: ModelType::Llm,
            provider: Some("OpenAI".to_string()),
            api_endpoint: None,
            license: LicenseType::Proprietary,
            source_location: None,
            parameters: None,
            detected_in: vec!["app.py".to_string()],
            detection_locations: vec![],
            usage_context: Some("inference".to_string()),
        });
        bom
    }

    #[test]
    fn test_article_fixes_come_first() {
        let bom = llm_bom();
        let result = PolicyEngine::new().evaluate(&bom, None);
        let recs =
            build_recommendations(&bom, &result.requirements, &result.critical_gaps, result.risk_level);
        assert!(recs[0].contains("Article 10"));
        assert!(recs.iter().any(|r| r.contains("Article 14")));
        assert!(recs.len() <= MAX_RECOMMENDATIONS);
    }

    #[test]
    fn test_systemic_risk_warning_present() {
        let bom = llm_bom();
        let result = PolicyEngine::new().evaluate(&bom, None);
        let recs =
            build_recommendations(&bom, &result.requirements, &result.critical_gaps, result.risk_level);
        assert!(recs.iter().any(|r| r.contains("systemic-risk")));
        assert!(recs.iter().any(|r| r.contains("gpt-4")));
    }

    #[test]
    fn test_quiet_bom_gets_the_maintenance_note() {
        let bom = AiBom::new("fixture");
        let result = PolicyEngine::new().evaluate(&bom, None);
        let mut requirements = result.requirements;
        requirements
            .accuracy
            .accuracy_metrics
            .insert("accuracy".to_string(), 0.93);
        for obligation in &mut requirements.provider_obligations.obligations {
            obligation.compliant = true;
        }
        requirements.post_market.incident_reporting_procedure = true;
        requirements.post_market.incident_contact_designated = true;

        let recs = build_recommendations(&bom, &requirements, &[], RiskLevel::Minimal);
        assert!(recs
            .iter()
            .any(|r| r.contains("Maintain the current compliance posture")));
        assert!(recs.len() < 3);
    }

    #[test]
    fn test_annex_iii_findings_carry_specific_duties() {
        let mut bom = llm_bom();
        bom.repository_url = Some("https://github.com/acme/recruitment-ranker".to_string());
        let result = PolicyEngine::new().evaluate(&bom, None);
        let recs =
            build_recommendations(&bom, &result.requirements, &result.critical_gaps, result.risk_level);
        assert!(recs
            .iter()
            .any(|r| r.contains("Employment and workers management")));
        assert!(recs.iter().any(|r| r.starts_with("   └─")));
        assert!(recs.len() <= MAX_RECOMMENDATIONS);
    }
}
