use std::path::Path;

use crate::compliance::{verify_pack, PackVerification};
use crate::ports::outbound::ProgressReporter;

/// VerifyEvidencePackUseCase - Re-hashes an evidence pack against its
/// manifest and reports every missing or tampered file.
///
/// Verification never fails with an error: an unreadable or incomplete
/// pack is reported as invalid, and the caller decides the exit code.
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
pub struct VerifyEvidencePackUseCase<PR> {
    progress_reporter: PR,
}

impl<PR> VerifyEvidencePackUseCase<PR>
where
    PR: ProgressReporter,
{
    /// Creates a new VerifyEvidencePackUseCase with injected dependencies
    pub fn new(progress_reporter: PR) -> Self {
        Self { progress_reporter }
    }

    /// Executes the evidence pack verification use case
    ///
    /// # Arguments
    /// * `pack_dir` - Directory containing manifest.json and the pack files
    ///
    /// # Returns
    /// The verification outcome, including per-file findings
    pub fn execute(&self, pack_dir: &Path) -> PackVerification {
        // Step 1: Re-hash every file listed in the manifest
        self.progress_reporter.report(&format!(
            "📖 Verifying evidence pack: {}",
            pack_dir.display()
        ));
        let verification = verify_pack(pack_dir);

        // Step 2: Report the findings
        for path in &verification.missing_files {
            self.progress_reporter
                .report_error(&format!("⚠️ Missing file: {}", path));
        }
        for path in &verification.mismatched_files {
            self.progress_reporter
                .report_error(&format!("⚠️ Hash mismatch: {}", path));
        }
        if let Some(failure) = &verification.failure {
            self.progress_reporter.report_error(failure);
        }

        if verification.valid {
            self.progress_reporter.report_completion(&format!(
                "✅ Pack is intact: {} file(s) verified",
                verification.files_checked
            ));
        } else {
            self.progress_reporter.report_completion(&format!(
                "❌ Pack verification FAILED: {} missing, {} mismatched",
                verification.missing_files.len(),
                verification.mismatched_files.len()
            ));
        }

        verification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::AiBom;
    use crate::compliance::policy_engine::PolicyEngine;
    use crate::compliance::EvidencePackBuilder;
    use std::fs;
    use tempfile::TempDir;

    struct SilentReporter;
    impl ProgressReporter for SilentReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    fn build_pack(dir: &TempDir) {
        let bom = AiBom::new("demo");
        let result = PolicyEngine::new().evaluate(&bom, None);
        EvidencePackBuilder::new("demo", "abc123")
            .build(&bom, &result, dir.path())
            .unwrap();
    }

    #[test]
    fn test_fresh_pack_is_valid() {
        let dir = TempDir::new().unwrap();
        build_pack(&dir);
        let verification = VerifyEvidencePackUseCase::new(SilentReporter).execute(dir.path());
        assert!(verification.valid);
    }

    #[test]
    fn test_tampered_pack_is_invalid() {
        let dir = TempDir::new().unwrap();
        build_pack(&dir);
        fs::write(dir.path().join("README.txt"), "edited").unwrap();
        let verification = VerifyEvidencePackUseCase::new(SilentReporter).execute(dir.path());
        assert!(!verification.valid);
        assert_eq!(verification.mismatched_files, vec!["README.txt"]);
    }

    #[test]
    fn test_empty_directory_is_invalid_without_error() {
        let dir = TempDir::new().unwrap();
        let verification = VerifyEvidencePackUseCase::new(SilentReporter).execute(dir.path());
        assert!(!verification.valid);
        assert!(verification.failure.is_some());
    }
}
