use std::path::{Path, PathBuf};

use crate::compliance::diff_engine::{ComplianceDiffResult, DiffEngine, GapStatus, ScoreDirection};
use crate::compliance::policy_engine::ComplianceResult;
use crate::ports::outbound::ProgressReporter;
use crate::shared::error::AuditError;
use crate::shared::security::read_text_file;
use crate::shared::Result;

/// DiffComplianceUseCase - Compares two stored compliance evaluations
/// of the same repository and summarises what changed between commits.
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
pub struct DiffComplianceUseCase<PR> {
    progress_reporter: PR,
}

impl<PR> DiffComplianceUseCase<PR>
where
    PR: ProgressReporter,
{
    /// Creates a new DiffComplianceUseCase with injected dependencies
    pub fn new(progress_reporter: PR) -> Self {
        Self { progress_reporter }
    }

    /// Executes the compliance diff use case
    ///
    /// # Arguments
    /// * `repo_id` - Stable repository identifier recorded in the diff
    /// * `base_commit` - Commit SHA the base evaluation was produced from
    /// * `head_commit` - Commit SHA the head evaluation was produced from
    /// * `base_path` - Path to the base policy_results.json
    /// * `head_path` - Path to the head policy_results.json
    ///
    /// # Returns
    /// The commit-to-commit delta, ready for serialization or rendering
    pub fn execute(
        &self,
        repo_id: &str,
        base_commit: &str,
        head_commit: &str,
        base_path: &Path,
        head_path: &Path,
    ) -> Result<ComplianceDiffResult> {
        // Step 1: Load both stored evaluations
        self.progress_reporter.report(&format!(
            "📖 Loading base evaluation from: {}",
            base_path.display()
        ));
        let base = load_result(base_path)?;

        self.progress_reporter.report(&format!(
            "📖 Loading head evaluation from: {}",
            head_path.display()
        ));
        let head = load_result(head_path)?;

        // Step 2: Compute the delta
        self.progress_reporter
            .report("📝 Comparing evaluations...");
        let diff = DiffEngine::new().diff(repo_id, base_commit, head_commit, &base, &head);

        let direction = match diff.direction {
            ScoreDirection::Improved => "✅ Compliance improved",
            ScoreDirection::Regressed => "❌ Compliance regressed",
            ScoreDirection::Unchanged => "✅ Compliance unchanged",
        };
        let new_gaps = diff
            .gap_deltas
            .iter()
            .filter(|d| d.status == GapStatus::New)
            .count();
        let resolved_gaps = diff
            .gap_deltas
            .iter()
            .filter(|d| d.status == GapStatus::Resolved)
            .count();
        self.progress_reporter.report_completion(&format!(
            "{}: {:.0}% -> {:.0}% ({} new gap(s), {} resolved)",
            direction,
            diff.base_score * 100.0,
            diff.head_score * 100.0,
            new_gaps,
            resolved_gaps
        ));

        Ok(diff)
    }
}

/// Reads and parses a stored compliance evaluation.
pub fn load_result(path: &Path) -> Result<ComplianceResult> {
    let content = read_text_file(path, "compliance result")?;
    serde_json::from_str(&content).map_err(|e| {
        AuditError::ResultParseError {
            path: PathBuf::from(path),
            details: e.to_string(),
        }
        .into()
    })
}
