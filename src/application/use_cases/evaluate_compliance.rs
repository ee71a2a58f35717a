use std::path::{Path, PathBuf};

use crate::bom::AiBom;
use crate::compliance::policy_engine::{ComplianceResult, PolicyEngine};
use crate::ports::outbound::ProgressReporter;
use crate::shared::error::AuditError;
use crate::shared::security::read_text_file;
use crate::shared::Result;

/// EvaluateComplianceUseCase - Evaluates a stored AI-BOM against the
/// EU AI Act Annex IV requirement families.
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
pub struct EvaluateComplianceUseCase<PR> {
    progress_reporter: PR,
    engine: PolicyEngine,
}

impl<PR> EvaluateComplianceUseCase<PR>
where
    PR: ProgressReporter,
{
    /// Creates a new EvaluateComplianceUseCase with injected dependencies
    pub fn new(progress_reporter: PR) -> Self {
        Self {
            progress_reporter,
            engine: PolicyEngine::new(),
        }
    }

    /// Executes the compliance evaluation use case
    ///
    /// # Arguments
    /// * `bom_path` - Path to the SPDX AI-BOM document
    /// * `repository_root` - Working tree for the documentation checks,
    ///   when available
    ///
    /// # Returns
    /// The full evaluation, including per-article verdicts and gaps
    pub fn execute(
        &self,
        bom_path: &Path,
        repository_root: Option<&Path>,
    ) -> Result<ComplianceResult> {
        // Step 1: Load and validate the document
        self.progress_reporter
            .report(&format!("📖 Loading AI-BOM from: {}", bom_path.display()));
        let bom = load_bom(bom_path)?;

        // Step 2: Run the policy engine
        Ok(self.evaluate(&bom, repository_root))
    }

    /// Evaluates an in-memory AI-BOM, for when the scan and the evaluation
    /// run in one invocation
    pub fn evaluate(&self, bom: &AiBom, repository_root: Option<&Path>) -> ComplianceResult {
        self.progress_reporter
            .report("📝 Evaluating Annex IV requirements...");
        let result = self.engine.evaluate(bom, repository_root);

        let verdict = if result.compliant {
            format!(
                "✅ COMPLIANT ({:.0}%, risk level: {})",
                result.compliance_score * 100.0,
                result.risk_level
            )
        } else {
            format!(
                "❌ NON-COMPLIANT ({:.0}%, risk level: {}, {} gap(s))",
                result.compliance_score * 100.0,
                result.risk_level,
                result.critical_gaps.len()
            )
        };
        self.progress_reporter.report_completion(&verdict);

        result
    }
}

/// Reads and parses an AI-BOM file.
pub fn load_bom(path: &Path) -> Result<AiBom> {
    let content = read_text_file(path, "AI-BOM document")?;
    AiBom::from_json(&content).map_err(|e| {
        AuditError::BomParseError {
            path: PathBuf::from(path),
            details: e.to_string(),
        }
        .into()
    })
}
