mod adapters;
mod application;
mod bom;
mod cli;
mod compliance;
mod config;
mod detection;
mod manifest;
mod ports;
mod shared;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::formatters::render_compliance_report;
use application::dto::ScanRequest;
use application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use application::use_cases::{
    BuildEvidencePackUseCase, DiffComplianceUseCase, EvaluateComplianceUseCase,
    ScanRepositoryUseCase, VerifyEvidencePackUseCase,
};
use cli::{Args, Command, ReportFormat};
use ports::outbound::OutputPresenter;
use shared::error::{AuditError, ExitCode};
use shared::Result;
use std::path::{Path, PathBuf};
use std::process;

/// Scan file-size limit when neither the flag nor the config file sets one.
const DEFAULT_MAX_FILE_SIZE_MB: u64 = 10;

fn main() {
    env_logger::init();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };
    process::exit(exit_code.as_i32());
}

fn run() -> Result<ExitCode> {
    // Parse command-line arguments (clap exits with code 2 on bad input)
    let args = Args::parse_args();

    match args.command {
        Command::Scan {
            path,
            output,
            format,
            max_file_size_mb,
            exclude,
        } => {
            let repo_path = PathBuf::from(path.as_deref().unwrap_or("."));
            validate_repository_path(&repo_path)?;
            let request = build_scan_request(&repo_path, max_file_size_mb, exclude)?;

            let use_case = ScanRepositoryUseCase::new(StderrProgressReporter::new());
            let response = use_case.execute(request)?;

            eprintln!("{}", FormatterFactory::progress_message(format));
            let formatter = FormatterFactory::create(format);
            let formatted_output = formatter.format(&response.bom)?;

            presenter_for(output).present(&formatted_output)?;
            Ok(ExitCode::Success)
        }

        Command::Evaluate {
            bom,
            path,
            output,
            format,
            fail_on_gaps,
        } => {
            let repo_path = path.map(PathBuf::from);
            if let Some(repo) = &repo_path {
                validate_repository_path(repo)?;
            }

            let use_case = EvaluateComplianceUseCase::new(StderrProgressReporter::new());
            let result = match bom {
                Some(bom_path) => use_case.execute(&bom_path, repo_path.as_deref())?,
                None => {
                    // No stored document: scan first, then evaluate in place
                    let repo = repo_path.clone().unwrap_or_else(|| PathBuf::from("."));
                    validate_repository_path(&repo)?;
                    let request = build_scan_request(&repo, None, vec![])?;
                    let response =
                        ScanRepositoryUseCase::new(StderrProgressReporter::new())
                            .execute(request)?;
                    use_case.evaluate(&response.bom, Some(&repo))
                }
            };

            let formatted_output = match format {
                ReportFormat::Json => to_pretty_json(&result)?,
                ReportFormat::Markdown => render_compliance_report(&result),
            };
            presenter_for(output).present(&formatted_output)?;

            if fail_on_gaps && !result.compliant {
                return Ok(ExitCode::ComplianceGapsDetected);
            }
            Ok(ExitCode::Success)
        }

        Command::Diff {
            repo_id,
            base_commit,
            head_commit,
            base,
            head,
            output,
            format,
        } => {
            let use_case = DiffComplianceUseCase::new(StderrProgressReporter::new());
            let diff = use_case.execute(&repo_id, &base_commit, &head_commit, &base, &head)?;

            let formatted_output = match format {
                ReportFormat::Json => to_pretty_json(&diff)?,
                ReportFormat::Markdown => diff.format_github_comment(),
            };
            presenter_for(output).present(&formatted_output)?;
            Ok(ExitCode::Success)
        }

        Command::Pack {
            bom,
            results,
            output,
        } => {
            let use_case = BuildEvidencePackUseCase::new(StderrProgressReporter::new());
            use_case.execute(&bom, &results, &output)?;
            Ok(ExitCode::Success)
        }

        Command::Verify { pack_dir } => {
            let use_case = VerifyEvidencePackUseCase::new(StderrProgressReporter::new());
            let verification = use_case.execute(&pack_dir);

            presenter_for(None).present(&to_pretty_json(&verification)?)?;
            if verification.valid {
                Ok(ExitCode::Success)
            } else {
                Ok(ExitCode::ComplianceGapsDetected)
            }
        }
    }
}

/// Merges command-line scan settings with the repository's optional
/// `ai-act-audit.config.yml`. Flags take precedence over the file.
fn build_scan_request(
    repo_path: &Path,
    max_file_size_mb: Option<u64>,
    mut exclude: Vec<String>,
) -> Result<ScanRequest> {
    let config = config::discover_config(repo_path)?.unwrap_or_default();

    let max_file_size_mb = max_file_size_mb
        .or(config.max_file_size_mb)
        .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB);
    exclude.extend(config.exclude_dirs.unwrap_or_default());

    Ok(ScanRequest::new(
        repo_path.to_path_buf(),
        max_file_size_mb,
        exclude,
    ))
}

fn presenter_for(output: Option<PathBuf>) -> Box<dyn OutputPresenter> {
    let presenter_type = match output {
        Some(output_path) => PresenterType::File(output_path),
        None => PresenterType::Stdout,
    };
    PresenterFactory::create(presenter_type)
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

fn validate_repository_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(AuditError::InvalidRepositoryPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for repository paths
    let metadata =
        std::fs::symlink_metadata(path).map_err(|e| AuditError::InvalidRepositoryPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read path metadata: {}", e),
        })?;

    if metadata.is_symlink() {
        return Err(AuditError::InvalidRepositoryPath {
            path: path.to_path_buf(),
            reason: "Security: Repository path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(AuditError::InvalidRepositoryPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    // Security check: Canonicalize path to prevent path traversal
    let canonical_path = path
        .canonicalize()
        .map_err(|e| AuditError::InvalidRepositoryPath {
            path: path.to_path_buf(),
            reason: format!("Failed to canonicalize path: {}", e),
        })?;

    // Validate that the canonical path is actually a directory
    // (additional check after canonicalization)
    if !canonical_path.is_dir() {
        return Err(AuditError::InvalidRepositoryPath {
            path: path.to_path_buf(),
            reason: "Resolved path is not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_repository_path_valid_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_repository_path(temp_dir.path());
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_repository_path_nonexistent() {
        let nonexistent_path = PathBuf::from("/nonexistent/path/that/does/not/exist");
        let result = validate_repository_path(&nonexistent_path);
        assert!(result.is_err());

        let err = result.unwrap_err();
        let err_string = format!("{}", err);
        assert!(err_string.contains("Directory does not exist"));
    }

    #[test]
    fn test_validate_repository_path_file_not_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test_file.txt");
        fs::write(&file_path, "test content").unwrap();

        let result = validate_repository_path(&file_path);
        assert!(result.is_err());

        let err = result.unwrap_err();
        let err_string = format!("{}", err);
        assert!(err_string.contains("Not a directory"));
    }

    #[test]
    fn test_build_scan_request_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let request = build_scan_request(temp_dir.path(), None, vec![]).unwrap();
        assert_eq!(request.max_file_size_mb, DEFAULT_MAX_FILE_SIZE_MB);
        assert!(request.exclude_dirs.is_empty());
    }

    #[test]
    fn test_build_scan_request_flag_overrides_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("ai-act-audit.config.yml"),
            "max_file_size_mb: 50\nexclude_dirs:\n  - vendor\n",
        )
        .unwrap();

        let request =
            build_scan_request(temp_dir.path(), Some(5), vec!["fixtures".to_string()]).unwrap();
        assert_eq!(request.max_file_size_mb, 5);
        assert_eq!(request.exclude_dirs, vec!["fixtures", "vendor"]);
    }
}
