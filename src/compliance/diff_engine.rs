//! Compares two stored evaluations of the same repository.
//!
//! Gap identity is the `GapCode`, so renamed descriptions never show up
//! as churn. Both inputs and the diff itself are content-hashed; the
//! hashes go into evidence packs and let a reviewer re-derive the diff.

use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::compliance::gaps::GapCode;
use crate::compliance::policy_engine::ComplianceResult;

/// Score movements below this are reported as unchanged.
pub const SCORE_EPSILON: f64 = 0.01;

/// Articles surfaced in diff output. The remaining verdicts still count
/// toward the score; these four are the ones reviewers ask about.
const TRACKED_ARTICLES: &[&str] = &["Article 11", "Article 13", "Article 14", "Article 15"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapStatus {
    New,
    Resolved,
    Existing,
}

/// One gap's movement between base and head.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapDelta {
    pub code: GapCode,
    pub status: GapStatus,
    pub article: String,
    pub description: String,
}

/// One tracked article whose verdict changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleDelta {
    pub article: String,
    pub base_compliant: bool,
    pub head_compliant: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDirection {
    Improved,
    Regressed,
    Unchanged,
}

/// The diff between two evaluations of one repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceDiffResult {
    pub schema_version: String,
    pub repo_id: String,
    pub base_commit: String,
    pub head_commit: String,
    pub base_score: f64,
    pub head_score: f64,
    pub score_delta: f64,
    pub direction: ScoreDirection,
    pub article_deltas: Vec<ArticleDelta>,
    pub gap_deltas: Vec<GapDelta>,
    pub base_result_hash: String,
    pub head_result_hash: String,
    pub diff_hash: String,
}

/// Produces `ComplianceDiffResult`s from stored evaluations.
#[derive(Debug, Default)]
pub struct DiffEngine;

impl DiffEngine {
    pub fn new() -> Self {
        DiffEngine
    }

    /// Diffs two evaluations of the same repository.
    ///
    /// # Arguments
    ///
    /// * `repo_id` - Repository identifier both evaluations belong to
    /// * `base_commit` - Commit the `base` evaluation was taken at
    /// * `head_commit` - Commit the `head` evaluation was taken at
    pub fn diff(
        &self,
        repo_id: &str,
        base_commit: &str,
        head_commit: &str,
        base: &ComplianceResult,
        head: &ComplianceResult,
    ) -> ComplianceDiffResult {
        let score_delta = head.compliance_score - base.compliance_score;
        let direction = if score_delta > SCORE_EPSILON {
            ScoreDirection::Improved
        } else if score_delta < -SCORE_EPSILON {
            ScoreDirection::Regressed
        } else {
            ScoreDirection::Unchanged
        };

        let article_deltas = article_deltas(base, head);
        let gap_deltas = gap_deltas(&base.critical_gaps, &head.critical_gaps);

        let base_result_hash = result_hash(base);
        let head_result_hash = result_hash(head);
        let diff_hash = hash_canonical(&json!({
            "schema_version": "1.0.0",
            "repo_id": repo_id,
            "base_commit": base_commit,
            "head_commit": head_commit,
            "base_score": base.compliance_score,
            "head_score": head.compliance_score,
            "score_delta": score_delta,
            "base_result_hash": base_result_hash,
            "head_result_hash": head_result_hash,
        }));

        ComplianceDiffResult {
            schema_version: "1.0.0".to_string(),
            repo_id: repo_id.to_string(),
            base_commit: base_commit.to_string(),
            head_commit: head_commit.to_string(),
            base_score: base.compliance_score,
            head_score: head.compliance_score,
            score_delta,
            direction,
            article_deltas,
            gap_deltas,
            base_result_hash,
            head_result_hash,
            diff_hash,
        }
    }
}

fn article_verdicts(result: &ComplianceResult) -> [(&'static str, bool); 4] {
    let r = &result.requirements;
    [
        ("Article 11", r.article_11_compliant),
        ("Article 13", r.article_13_compliant),
        ("Article 14", r.article_14_compliant),
        ("Article 15", r.article_15_compliant),
    ]
}

fn article_deltas(base: &ComplianceResult, head: &ComplianceResult) -> Vec<ArticleDelta> {
    let base_verdicts = article_verdicts(base);
    let head_verdicts = article_verdicts(head);
    TRACKED_ARTICLES
        .iter()
        .filter_map(|article| {
            let base_compliant = base_verdicts.iter().find(|(a, _)| a == article)?.1;
            let head_compliant = head_verdicts.iter().find(|(a, _)| a == article)?.1;
            (base_compliant != head_compliant).then(|| ArticleDelta {
                article: article.to_string(),
                base_compliant,
                head_compliant,
            })
        })
        .collect()
}

fn gap_deltas(base_gaps: &[GapCode], head_gaps: &[GapCode]) -> Vec<GapDelta> {
    let mut deltas = Vec::new();
    for code in head_gaps {
        let status = if base_gaps.contains(code) {
            GapStatus::Existing
        } else {
            GapStatus::New
        };
        deltas.push(delta(*code, status));
    }
    for code in base_gaps {
        if !head_gaps.contains(code) {
            deltas.push(delta(*code, GapStatus::Resolved));
        }
    }
    deltas
}

fn delta(code: GapCode, status: GapStatus) -> GapDelta {
    GapDelta {
        code,
        status,
        article: code.article().to_string(),
        description: code.description().to_string(),
    }
}

/// Content hash of the verdict-bearing fields of one evaluation. Gaps are
/// sorted first so emission order can change without changing the hash.
pub fn result_hash(result: &ComplianceResult) -> String {
    let mut gaps = result.critical_gaps.clone();
    gaps.sort();
    hash_canonical(&json!({
        "system_id": result.system_id,
        "compliant": result.compliant,
        "compliance_score": result.compliance_score,
        "risk_level": result.risk_level,
        "critical_gaps": gaps,
    }))
}

/// SHA-256 over the canonical (sorted-key) JSON encoding.
fn hash_canonical(value: &serde_json::Value) -> String {
    let canonical = value.to_string();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

impl ComplianceDiffResult {
    /// Renders the diff as a GitHub-flavored markdown comment.
    pub fn format_github_comment(&self) -> String {
        let mut out = String::new();
        let (emoji, verdict) = match self.direction {
            ScoreDirection::Improved => ("✅", "improved"),
            ScoreDirection::Regressed => ("⚠️", "regressed"),
            ScoreDirection::Unchanged => ("➖", "unchanged"),
        };
        out.push_str(&format!("## {} EU AI Act compliance {}\n\n", emoji, verdict));
        out.push_str(&format!(
            "Comparing `{}` → `{}`\n\n",
            short_commit(&self.base_commit),
            short_commit(&self.head_commit)
        ));
        out.push_str("| | Base | Head | Delta |\n|---|---|---|---|\n");
        out.push_str(&format!(
            "| Compliance score | {:.0}% | {:.0}% | {:+.1}% |\n\n",
            self.base_score * 100.0,
            self.head_score * 100.0,
            self.score_delta * 100.0
        ));

        if !self.article_deltas.is_empty() {
            out.push_str("### Changed articles\n\n");
            for delta in self.article_deltas.iter().take(5) {
                let arrow = if delta.head_compliant { "❌ → ✅" } else { "✅ → ❌" };
                out.push_str(&format!("- {}: {}\n", delta.article, arrow));
            }
            out.push('\n');
        }

        let new_gaps: Vec<&GapDelta> = self
            .gap_deltas
            .iter()
            .filter(|d| d.status == GapStatus::New)
            .collect();
        if !new_gaps.is_empty() {
            out.push_str("### New gaps\n\n");
            for gap in new_gaps.iter().take(5) {
                out.push_str(&format!("- ⚠️ {}\n", gap.description));
            }
            out.push('\n');
        }

        let resolved: Vec<&GapDelta> = self
            .gap_deltas
            .iter()
            .filter(|d| d.status == GapStatus::Resolved)
            .collect();
        if !resolved.is_empty() {
            out.push_str("### Resolved gaps\n\n");
            for gap in resolved.iter().take(5) {
                out.push_str(&format!("- ~~{}~~\n", gap.description));
            }
            out.push('\n');
        }

        out.push_str(&format!("<sub>diff `{}`</sub>\n", &self.diff_hash[..16]));
        out
    }
}

/// Changed files plausibly behind one degraded article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationCorrelation {
    pub article: String,
    pub files: Vec<String>,
}

const DOC_EXTENSIONS: &[&str] = &[".md", ".rst", ".txt"];
const CODE_EXTENSIONS: &[&str] = &[".py", ".js", ".ts", ".jsx", ".tsx"];

impl ComplianceDiffResult {
    /// Best-effort mapping of changed files to degraded articles, by file
    /// extension: documentation files to Article 11, source files to the
    /// rest. Empty when no tracked article degraded.
    pub fn correlate_changed_files(&self, changed_files: &[String]) -> Vec<DegradationCorrelation> {
        self.article_deltas
            .iter()
            .filter(|delta| !delta.head_compliant)
            .map(|delta| {
                let extensions = if delta.article == "Article 11" {
                    DOC_EXTENSIONS
                } else {
                    CODE_EXTENSIONS
                };
                DegradationCorrelation {
                    article: delta.article.clone(),
                    files: changed_files
                        .iter()
                        .filter(|f| extensions.iter().any(|ext| f.ends_with(ext)))
                        .cloned()
                        .collect(),
                }
            })
            .collect()
    }
}

fn short_commit(commit: &str) -> &str {
    if commit.len() > 8 {
        &commit[..8]
    } else {
        commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::{AiBom, LicenseType, ModelComponent, ModelType};
    use crate::compliance::policy_engine::PolicyEngine;

    fn evaluate(bom: &AiBom) -> ComplianceResult {
        PolicyEngine::new().evaluate(bom, None)
    }

    fn llm_bom() -> AiBom {
        let mut bom = AiBom::new("chatbot");
        bom.models.push(ModelComponent {
            name: "gpt2".to_string(),
            version: None,
            model_type: ModelType::Llm,
            provider: Some("HuggingFace".to_string()),
            api_endpoint: None,
            license: LicenseType::Unknown,
            source_location: None,
            parameters: None,
            detected_in: vec!["app.py".to_string()],
            detection_locations: vec![],
            usage_context: None,
        });
        bom
    }

    #[test]
    fn test_identical_results_are_unchanged() {
        let result = evaluate(&llm_bom());
        let diff = DiffEngine::new().diff("acme/chatbot", "aaa111", "bbb222", &result, &result);
        assert_eq!(diff.direction, ScoreDirection::Unchanged);
        assert!(diff.article_deltas.is_empty());
        assert!(diff
            .gap_deltas
            .iter()
            .all(|d| d.status == GapStatus::Existing));
        assert_eq!(diff.base_result_hash, diff.head_result_hash);
    }

    #[test]
    fn test_new_and_resolved_gaps() {
        let base = evaluate(&llm_bom());
        let head = evaluate(&AiBom::new("chatbot"));
        let diff = DiffEngine::new().diff("acme/chatbot", "aaa111", "bbb222", &base, &head);
        assert_eq!(diff.direction, ScoreDirection::Improved);
        assert!(diff
            .gap_deltas
            .iter()
            .any(|d| d.status == GapStatus::Resolved));
        assert!(!diff.gap_deltas.iter().any(|d| d.status == GapStatus::New));
        assert_ne!(diff.base_result_hash, diff.head_result_hash);
    }

    #[test]
    fn test_result_hash_ignores_gap_order() {
        let mut a = evaluate(&llm_bom());
        let mut b = a.clone();
        a.critical_gaps = vec![GapCode::Logging, GapCode::DataGovernance];
        b.critical_gaps = vec![GapCode::DataGovernance, GapCode::Logging];
        assert_eq!(result_hash(&a), result_hash(&b));
    }

    #[test]
    fn test_result_hash_tracks_score() {
        let a = evaluate(&llm_bom());
        let mut b = a.clone();
        b.compliance_score += 0.1;
        assert_ne!(result_hash(&a), result_hash(&b));
    }

    #[test]
    fn test_diff_hash_is_stable() {
        let base = evaluate(&llm_bom());
        let head = evaluate(&AiBom::new("chatbot"));
        let engine = DiffEngine::new();
        let first = engine.diff("acme/chatbot", "aaa111", "bbb222", &base, &head);
        let second = engine.diff("acme/chatbot", "aaa111", "bbb222", &base, &head);
        assert_eq!(first.diff_hash, second.diff_hash);
        let other_commit = engine.diff("acme/chatbot", "aaa111", "ccc333", &base, &head);
        assert_ne!(first.diff_hash, other_commit.diff_hash);
    }

    #[test]
    fn test_github_comment_shape() {
        let base = evaluate(&llm_bom());
        let head = evaluate(&AiBom::new("chatbot"));
        let diff = DiffEngine::new().diff(
            "acme/chatbot",
            "0123456789abcdef",
            "fedcba9876543210",
            &base,
            &head,
        );
        let comment = diff.format_github_comment();
        assert!(comment.contains("`01234567`"));
        assert!(comment.contains("`fedcba98`"));
        assert!(comment.contains("Compliance score"));
        assert!(comment.contains("Resolved gaps"));
        assert!(comment.contains("~~"));
    }

    #[test]
    fn test_changed_file_correlation_only_for_degraded_articles() {
        let base = evaluate(&AiBom::new("chatbot"));
        let head = evaluate(&llm_bom());
        let diff = DiffEngine::new().diff("acme/chatbot", "aaa111", "bbb222", &base, &head);
        assert!(diff.article_deltas.iter().any(|d| !d.head_compliant));

        let changed = vec![
            "src/app.py".to_string(),
            "docs/overview.md".to_string(),
            "Makefile".to_string(),
        ];
        let correlations = diff.correlate_changed_files(&changed);
        assert!(!correlations.is_empty());
        for correlation in &correlations {
            if correlation.article == "Article 11" {
                assert_eq!(correlation.files, vec!["docs/overview.md"]);
            } else {
                assert_eq!(correlation.files, vec!["src/app.py"]);
            }
        }

        // The reverse diff has no degraded articles
        let improved = DiffEngine::new().diff("acme/chatbot", "bbb222", "aaa111", &head, &base);
        assert!(improved.correlate_changed_files(&changed).is_empty());
    }

    #[test]
    fn test_round_trip_serialization() {
        let result = evaluate(&llm_bom());
        let diff = DiffEngine::new().diff("acme/chatbot", "aaa", "bbb", &result, &result);
        let json = serde_json::to_string(&diff).unwrap();
        let back: ComplianceDiffResult = serde_json::from_str(&json).unwrap();
        assert_eq!(diff, back);
    }
}
