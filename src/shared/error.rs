use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - scan completed, or the evaluated system is compliant
    Success = 0,
    /// Compliance gaps were detected (or an evidence pack failed verification)
    ComplianceGapsDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (file I/O error, malformed input, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ComplianceGapsDetected => write!(f, "Compliance Gaps Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for the audit pipeline.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Invalid repository path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid repository directory")]
    InvalidRepositoryPath { path: PathBuf, reason: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to parse AI-BOM document: {path}\nDetails: {details}\n\n💡 Hint: The file must be an SPDX AI-BOM produced by the scan command")]
    BomParseError { path: PathBuf, details: String },

    #[error("Failed to parse compliance result: {path}\nDetails: {details}\n\n💡 Hint: The file must be a policy_results.json produced by the evaluate command")]
    ResultParseError { path: PathBuf, details: String },

    #[error("Invalid evidence pack: {path}\nReason: {reason}\n\n💡 Hint: Point at the pack directory that contains manifest.json")]
    InvalidEvidencePack { path: PathBuf, reason: String },

    /// Validation error for document invariants
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
