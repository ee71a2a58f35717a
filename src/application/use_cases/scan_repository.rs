use crate::application::dto::{ScanRequest, ScanResponse};
use crate::bom::{BomGenerator, RepositoryInfo};
use crate::detection::ComponentDetector;
use crate::manifest::DependencyExtractor;
use crate::ports::outbound::ProgressReporter;
use crate::shared::Result;

/// ScanRepositoryUseCase - Core use case for AI-BOM generation
///
/// This use case orchestrates the scan workflow: walk the repository,
/// match detection patterns, parse dependency manifests and assemble
/// the SPDX document.
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
pub struct ScanRepositoryUseCase<PR> {
    progress_reporter: PR,
}

impl<PR> ScanRepositoryUseCase<PR>
where
    PR: ProgressReporter,
{
    /// Creates a new ScanRepositoryUseCase with injected dependencies
    pub fn new(progress_reporter: PR) -> Self {
        Self { progress_reporter }
    }

    /// Executes the repository scan use case
    ///
    /// # Arguments
    /// * `request` - Scan request containing repository path and limits
    ///
    /// # Returns
    /// ScanResponse containing the generated AI-BOM document
    pub fn execute(&self, request: ScanRequest) -> Result<ScanResponse> {
        // Step 1: Walk the source tree and collect detections
        self.progress_reporter.report(&format!(
            "📖 Scanning repository: {}",
            request.repository_path.display()
        ));

        let detector = ComponentDetector::with_limits(
            request.max_file_size_mb * 1024 * 1024,
            request.exclude_dirs.clone(),
        )?;
        let report = detector.scan(&request.repository_path)?;

        self.progress_reporter.report(&format!(
            "✅ Scanned {} file(s), {} detection(s)",
            report.files_scanned,
            report.total_detections()
        ));
        for skipped in &report.skipped_files {
            self.progress_reporter.report_error(&format!(
                "⚠️ Skipped {} ({:.1} MB over the size limit)",
                skipped.path, skipped.size_mb
            ));
        }

        // Step 2: Parse dependency manifests
        let declared = DependencyExtractor::new()?.extract(&request.repository_path);
        self.progress_reporter.report(&format!(
            "✅ Found {} declared dependenc(ies)",
            declared.len()
        ));

        // Step 3: Recover git metadata when the repository has any
        let repo = RepositoryInfo::discover(&request.repository_path);

        // Step 4: Assemble and validate the document
        let system_name = system_name_of(&request);
        let bom = BomGenerator::new()?.generate(&system_name, &report, &declared, &repo)?;

        self.progress_reporter.report_completion(&format!(
            "✅ AI-BOM generated: {} model(s), {} dataset(s), {} dependenc(ies)",
            bom.models.len(),
            bom.datasets.len(),
            bom.dependencies.len()
        ));

        Ok(ScanResponse {
            files_scanned: report.files_scanned,
            files_skipped: report.skipped_files.len(),
            bom,
        })
    }
}

/// The scanned directory's name, used as the system name in the document.
fn system_name_of(request: &ScanRequest) -> String {
    request
        .repository_path
        .canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(&request.repository_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "repository".to_string())
}
