use serde::{Deserialize, Serialize};

/// Stable identifiers for critical compliance gaps.
///
/// Gap identity is the enum, not its English description: stored results
/// and the diff engine compare codes, while renderers use `description()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapCode {
    DataGovernance,
    RiskManagement,
    Logging,
    TechnicalDocumentation,
    HumanOversight,
    Accuracy,
    Robustness,
    Cybersecurity,
    ProviderObligations,
    QualityManagement,
    EuDatabaseRegistration,
    PostMarketMonitoring,
    GpaiObligations,
}

impl GapCode {
    /// Serialized identifier, stable across releases.
    pub fn as_str(self) -> &'static str {
        match self {
            GapCode::DataGovernance => "data_governance",
            GapCode::RiskManagement => "risk_management",
            GapCode::Logging => "logging",
            GapCode::TechnicalDocumentation => "technical_documentation",
            GapCode::HumanOversight => "human_oversight",
            GapCode::Accuracy => "accuracy",
            GapCode::Robustness => "robustness",
            GapCode::Cybersecurity => "cybersecurity",
            GapCode::ProviderObligations => "provider_obligations",
            GapCode::QualityManagement => "quality_management",
            GapCode::EuDatabaseRegistration => "eu_database_registration",
            GapCode::PostMarketMonitoring => "post_market_monitoring",
            GapCode::GpaiObligations => "gpai_obligations",
        }
    }

    /// The article (or annex) the gap belongs to.
    pub fn article(self) -> &'static str {
        match self {
            GapCode::DataGovernance => "Article 10",
            GapCode::RiskManagement => "Article 9",
            GapCode::Logging => "Article 12",
            GapCode::TechnicalDocumentation => "Article 11",
            GapCode::HumanOversight => "Article 14",
            GapCode::Accuracy | GapCode::Robustness | GapCode::Cybersecurity => "Article 15",
            GapCode::ProviderObligations => "Article 16",
            GapCode::QualityManagement => "Article 17",
            GapCode::EuDatabaseRegistration => "Article 61",
            GapCode::PostMarketMonitoring => "Article 72",
            GapCode::GpaiObligations => "Annex X-XIII",
        }
    }

    /// Human-readable gap text for reports.
    pub fn description(self) -> &'static str {
        match self {
            GapCode::DataGovernance => {
                "Data Governance non-compliant (Article 10) - Quality, bias, lineage"
            }
            GapCode::RiskManagement => "Risk Management System not established (Article 9)",
            GapCode::Logging => "Automatic logging not implemented (Article 12)",
            GapCode::TechnicalDocumentation => "Incomplete technical documentation (Article 11)",
            GapCode::HumanOversight => {
                "Human Oversight missing for HIGH-RISK system (Article 14)"
            }
            GapCode::Accuracy => {
                "Accuracy metrics not properly defined or evaluated (Article 15)"
            }
            GapCode::Robustness => "Robustness measures insufficient (Article 15)",
            GapCode::Cybersecurity => "Cybersecurity requirements not satisfied (Article 15)",
            GapCode::ProviderObligations => "Provider Obligations not satisfied (Article 16)",
            GapCode::QualityManagement => {
                "Quality Management System not established (Article 17)"
            }
            GapCode::EuDatabaseRegistration => {
                "EU Database registration missing for HIGH-RISK system (Article 61)"
            }
            GapCode::PostMarketMonitoring => {
                "Post-Market Monitoring Plan missing (Article 72)"
            }
            GapCode::GpaiObligations => "GPAI Compliance not satisfied (Annex X-XIII)",
        }
    }
}

impl std::fmt::Display for GapCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
