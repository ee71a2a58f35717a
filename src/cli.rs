use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::dto::OutputFormat;

/// Output format for compliance reports (evaluate and diff)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Markdown,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json' or 'markdown'",
                s
            )),
        }
    }
}

/// Scan repositories for AI components and audit them against the EU AI Act
#[derive(Parser, Debug)]
#[command(name = "ai-act-audit")]
#[command(version = "0.4.0")]
#[command(
    about = "Scan repositories for AI components and audit them against the EU AI Act",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a repository and emit an SPDX AI-BOM
    Scan {
        /// Path to the repository to scan (defaults to current directory)
        #[arg(short, long)]
        path: Option<String>,

        /// Output file path (if not specified, outputs to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: json, yaml or markdown
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Skip files larger than this size during scanning
        /// (defaults to 10, or the config file value)
        #[arg(long, value_name = "MB")]
        max_file_size_mb: Option<u64>,

        /// Exclude directories by name, in addition to the built-in list.
        /// Can be specified multiple times: -e vendor -e fixtures
        #[arg(short, long = "exclude", value_name = "DIR")]
        exclude: Vec<String>,
    },

    /// Evaluate an AI-BOM against the EU AI Act Annex IV requirements
    Evaluate {
        /// Path to an existing AI-BOM file (scans --path when omitted)
        #[arg(short, long)]
        bom: Option<PathBuf>,

        /// Path to the repository (scanned when --bom is omitted, and used
        /// for documentation checks either way)
        #[arg(short, long)]
        path: Option<String>,

        /// Output file path (if not specified, outputs to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: json or markdown
        #[arg(short, long, default_value = "json")]
        format: ReportFormat,

        /// Exit with code 1 when the system is non-compliant
        #[arg(long)]
        fail_on_gaps: bool,
    },

    /// Compare two stored compliance evaluations of the same repository
    Diff {
        /// Repository identifier recorded in the diff (e.g. org/repo)
        #[arg(long)]
        repo_id: String,

        /// Commit SHA the base evaluation was produced from
        #[arg(long)]
        base_commit: String,

        /// Commit SHA the head evaluation was produced from
        #[arg(long)]
        head_commit: String,

        /// Path to the base policy_results.json
        #[arg(long)]
        base: PathBuf,

        /// Path to the head policy_results.json
        #[arg(long)]
        head: PathBuf,

        /// Output file path (if not specified, outputs to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: json or markdown
        #[arg(short, long, default_value = "json")]
        format: ReportFormat,
    },

    /// Build an audit-ready evidence pack directory
    Pack {
        /// Path to the AI-BOM file
        #[arg(short, long)]
        bom: PathBuf,

        /// Path to the policy_results.json for the same commit
        #[arg(short, long)]
        results: PathBuf,

        /// Directory the pack is written into
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Verify an evidence pack against its manifest
    Verify {
        /// Path to the pack directory containing manifest.json
        pack_dir: PathBuf,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
