use std::path::Path;

use crate::application::use_cases::diff_compliance::load_result;
use crate::application::use_cases::evaluate_compliance::load_bom;
use crate::compliance::{EvidencePackBuilder, PackManifest};
use crate::ports::outbound::ProgressReporter;
use crate::shared::Result;

/// BuildEvidencePackUseCase - Assembles an audit-ready evidence pack
/// directory from a stored AI-BOM and its compliance evaluation.
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
pub struct BuildEvidencePackUseCase<PR> {
    progress_reporter: PR,
}

impl<PR> BuildEvidencePackUseCase<PR>
where
    PR: ProgressReporter,
{
    /// Creates a new BuildEvidencePackUseCase with injected dependencies
    pub fn new(progress_reporter: PR) -> Self {
        Self { progress_reporter }
    }

    /// Executes the evidence pack build use case
    ///
    /// # Arguments
    /// * `bom_path` - Path to the SPDX AI-BOM document
    /// * `result_path` - Path to the policy_results.json for the same commit
    /// * `output_dir` - Directory the pack is written into
    ///
    /// # Returns
    /// The pack manifest, including the root hash over all pack files
    pub fn execute(
        &self,
        bom_path: &Path,
        result_path: &Path,
        output_dir: &Path,
    ) -> Result<PackManifest> {
        // Step 1: Load the inputs the pack is assembled from
        self.progress_reporter
            .report(&format!("📖 Loading AI-BOM from: {}", bom_path.display()));
        let bom = load_bom(bom_path)?;

        self.progress_reporter.report(&format!(
            "📖 Loading evaluation from: {}",
            result_path.display()
        ));
        let result = load_result(result_path)?;

        // Step 2: Write the pack, manifest last
        self.progress_reporter.report(&format!(
            "📝 Writing evidence pack to: {}",
            output_dir.display()
        ));
        let repo_id = bom.system_name().to_string();
        let commit = bom
            .repository_commit
            .clone()
            .unwrap_or_else(|| "unknown".to_string());
        let manifest =
            EvidencePackBuilder::new(&repo_id, &commit).build(&bom, &result, output_dir)?;

        self.progress_reporter.report_completion(&format!(
            "✅ Evidence pack written: {} file(s), root hash {}",
            manifest.files.len(),
            &manifest.root_hash[..16]
        ));

        Ok(manifest)
    }
}
