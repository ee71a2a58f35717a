/// End-to-end tests for the CLI
use std::path::PathBuf;

use ai_act_audit::prelude::*;

// Exit code tests for CLI
mod exit_code_tests {
    use assert_cmd::cargo::cargo_bin_cmd;

    /// Exit code 0: Success - normal scan
    #[test]
    fn test_exit_code_success() {
        cargo_bin_cmd!("ai-act-audit")
            .args(["scan", "-p", "tests/fixtures/sample-project"])
            .assert()
            .code(0);
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("ai-act-audit").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("ai-act-audit")
            .arg("--version")
            .assert()
            .code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("ai-act-audit")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("ai-act-audit")
            .args(["scan", "-f", "invalid_format"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - non-existent repository path
    #[test]
    fn test_exit_code_application_error_nonexistent_path() {
        cargo_bin_cmd!("ai-act-audit")
            .args(["scan", "-p", "/nonexistent/path/that/does/not/exist"])
            .assert()
            .code(3);
    }

    /// Exit code 3: Application error - path is a file, not a directory
    #[test]
    fn test_exit_code_application_error_file_not_directory() {
        cargo_bin_cmd!("ai-act-audit")
            .args(["scan", "-p", "Cargo.toml"])
            .assert()
            .code(3);
    }

    /// Exit code 1: --fail-on-gaps on a repository using an LLM
    #[test]
    fn test_exit_code_fail_on_gaps() {
        cargo_bin_cmd!("ai-act-audit")
            .args([
                "evaluate",
                "-p",
                "tests/fixtures/sample-project",
                "--fail-on-gaps",
            ])
            .assert()
            .code(1);
    }
}

mod cli_output_tests {
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;

    #[test]
    fn test_scan_json_output() {
        cargo_bin_cmd!("ai-act-audit")
            .args(["scan", "-p", "tests/fixtures/sample-project"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"spdx_version\""))
            .stdout(predicate::str::contains("openai"))
            .stdout(predicate::str::contains("gpt-4"));
    }

    #[test]
    fn test_scan_markdown_output() {
        cargo_bin_cmd!("ai-act-audit")
            .args([
                "scan",
                "-p",
                "tests/fixtures/sample-project",
                "-f",
                "markdown",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("# AI-BOM for sample-project"))
            .stdout(predicate::str::contains("## Models"));
    }

    #[test]
    fn test_evaluate_markdown_report() {
        cargo_bin_cmd!("ai-act-audit")
            .args([
                "evaluate",
                "-p",
                "tests/fixtures/sample-project",
                "-f",
                "markdown",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("NON-COMPLIANT"))
            .stdout(predicate::str::contains("Article"));
    }
}

// Full pipeline: scan -> evaluate -> pack -> verify -> tamper -> verify
mod pipeline_tests {
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_evaluate_pack_verify_round_trip() {
        let workdir = TempDir::new().unwrap();
        let bom_path = workdir.path().join("spdx.json");
        let results_path = workdir.path().join("policy_results.json");
        let pack_dir = workdir.path().join("pack");

        cargo_bin_cmd!("ai-act-audit")
            .args(["scan", "-p", "tests/fixtures/sample-project"])
            .args(["-o", bom_path.to_str().unwrap()])
            .assert()
            .code(0);

        cargo_bin_cmd!("ai-act-audit")
            .args(["evaluate", "--bom", bom_path.to_str().unwrap()])
            .args(["-o", results_path.to_str().unwrap()])
            .assert()
            .code(0);

        cargo_bin_cmd!("ai-act-audit")
            .args(["pack", "--bom", bom_path.to_str().unwrap()])
            .args(["--results", results_path.to_str().unwrap()])
            .args(["-o", pack_dir.to_str().unwrap()])
            .assert()
            .code(0);

        assert!(pack_dir.join("manifest.json").exists());
        assert!(pack_dir.join("ai-bom/spdx.json").exists());

        cargo_bin_cmd!("ai-act-audit")
            .arg("verify")
            .arg(pack_dir.to_str().unwrap())
            .assert()
            .code(0)
            .stdout(predicate::str::contains("\"valid\": true"));

        // Tampering with a pack file must fail verification
        fs::write(pack_dir.join("policy/gaps.json"), "{}").unwrap();
        cargo_bin_cmd!("ai-act-audit")
            .arg("verify")
            .arg(pack_dir.to_str().unwrap())
            .assert()
            .code(1)
            .stdout(predicate::str::contains("\"valid\": false"));
    }

    #[test]
    fn test_diff_of_stored_evaluations() {
        let workdir = TempDir::new().unwrap();
        let bom_path = workdir.path().join("spdx.json");
        let results_path = workdir.path().join("policy_results.json");
        let diff_path = workdir.path().join("diff.json");

        cargo_bin_cmd!("ai-act-audit")
            .args(["scan", "-p", "tests/fixtures/sample-project"])
            .args(["-o", bom_path.to_str().unwrap()])
            .assert()
            .code(0);
        cargo_bin_cmd!("ai-act-audit")
            .args(["evaluate", "--bom", bom_path.to_str().unwrap()])
            .args(["-o", results_path.to_str().unwrap()])
            .assert()
            .code(0);

        cargo_bin_cmd!("ai-act-audit")
            .args(["diff", "--repo-id", "acme/sample-project"])
            .args(["--base-commit", "aaa111", "--head-commit", "bbb222"])
            .args(["--base", results_path.to_str().unwrap()])
            .args(["--head", results_path.to_str().unwrap()])
            .args(["-o", diff_path.to_str().unwrap()])
            .assert()
            .code(0);

        let diff = fs::read_to_string(&diff_path).unwrap();
        assert!(diff.contains("\"direction\": \"unchanged\""));
        assert!(diff.contains("acme/sample-project"));
    }
}

#[test]
fn test_e2e_library_scan() {
    let project_path = PathBuf::from("tests/fixtures/sample-project");

    let progress_reporter = StderrProgressReporter::new();
    let use_case = ScanRepositoryUseCase::new(progress_reporter);

    let request = ScanRequest::new(project_path, 10, vec![]);
    let response = use_case.execute(request).unwrap();

    assert!(!response.bom.models.is_empty());
    assert!(response
        .bom
        .dependencies
        .iter()
        .any(|d| d.name == "openai" && d.is_ai_related));

    let formatter = SpdxJsonFormatter::new();
    let json = formatter.format(&response.bom).unwrap();
    assert!(json.contains("\"spdx_version\""));
    assert!(json.contains("gpt-4"));
}

#[test]
fn test_e2e_library_evaluation() {
    let project_path = PathBuf::from("tests/fixtures/sample-project");

    let use_case = ScanRepositoryUseCase::new(StderrProgressReporter::new());
    let response = use_case
        .execute(ScanRequest::new(project_path.clone(), 10, vec![]))
        .unwrap();

    let engine = PolicyEngine::new();
    let result = engine.evaluate(&response.bom, Some(&project_path));

    assert!(result.is_ai_system);
    assert!(!result.compliant);
    assert!(!result.critical_gaps.is_empty());
    assert!(!result.recommendations.is_empty());
}
