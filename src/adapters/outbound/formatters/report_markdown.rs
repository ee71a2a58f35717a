use crate::compliance::policy_engine::ComplianceResult;

/// Renders an evaluation as a Markdown compliance report.
///
/// Used for the human-facing side of `evaluate`; the machine-facing side
/// is the serialized `ComplianceResult` itself.
pub fn render_compliance_report(result: &ComplianceResult) -> String {
    let mut out = String::new();

    let verdict = if result.compliant { "✅ COMPLIANT" } else { "❌ NON-COMPLIANT" };
    out.push_str(&format!("# EU AI Act compliance report: {}\n\n", result.system_id));
    out.push_str(&format!("**Verdict:** {}\n\n", verdict));
    out.push_str(&format!(
        "| Score | Risk level | Articles | Evaluated |\n|---|---|---|---|\n| {:.0}% | {} | {}/{} | {} |\n\n",
        result.compliance_score * 100.0,
        result.risk_level,
        result.requirements.articles_compliant_count(),
        result.requirements.total_articles_checked(),
        result.evaluated_at.format("%Y-%m-%d %H:%M UTC"),
    ));

    if !result.is_ai_system {
        out.push_str("No AI components were detected; the system is out of scope of the Act.\n");
        return out;
    }

    if result.requirements.high_risk.is_high_risk {
        out.push_str("## High-risk classification\n\n");
        out.push_str(&format!("{}\n\n", result.requirements.high_risk.rationale));
    }

    if !result.critical_gaps.is_empty() {
        out.push_str("## Critical gaps\n\n");
        for gap in &result.critical_gaps {
            out.push_str(&format!("- ❌ {}\n", gap.description()));
        }
        out.push('\n');
    }

    if !result.recommendations.is_empty() {
        out.push_str("## Recommendations\n\n");
        for (i, rec) in result.recommendations.iter().enumerate() {
            if rec.starts_with("   └─") {
                out.push_str(&format!("{}\n", rec));
            } else {
                out.push_str(&format!("{}. {}\n", i + 1, rec));
            }
        }
        out.push('\n');
    }

    if let Some(gpai) = &result.requirements.gpai {
        out.push_str("## General-purpose AI\n\n");
        out.push_str(&format!(
            "Providers: {}. Systemic risk: {}.\n",
            gpai.providers.join(", "),
            if gpai.systemic_risk { "yes" } else { "no" }
        ));
    }

    out
}
