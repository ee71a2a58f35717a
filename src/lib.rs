//! ai-act-audit - EU AI Act compliance auditing for source repositories
//!
//! This library scans a repository for AI components (models, datasets,
//! AI-related dependencies), assembles an SPDX AI bill of materials, and
//! evaluates it against the EU AI Act Annex IV requirement families. It
//! follows hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`detection`, `manifest`, `bom`, `compliance`): Pure
//!   business logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use ai_act_audit::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = ScanRepositoryUseCase::new(progress_reporter);
//!
//! // Execute
//! let request = ScanRequest::new(PathBuf::from("."), 10, vec![]);
//! let response = use_case.execute(request)?;
//!
//! // Evaluate the document against the Annex IV requirements
//! let engine = PolicyEngine::new();
//! let result = engine.evaluate(&response.bom, None);
//! println!("compliant: {}", result.compliant);
//!
//! // Format output
//! let formatter = SpdxJsonFormatter::new();
//! let output = formatter.format(&response.bom)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod bom;
pub mod compliance;
pub mod config;
pub mod detection;
pub mod manifest;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{
        render_compliance_report, MarkdownFormatter, SpdxJsonFormatter, SpdxYamlFormatter,
    };
    pub use crate::application::dto::{OutputFormat, ScanRequest, ScanResponse};
    pub use crate::application::use_cases::{
        BuildEvidencePackUseCase, DiffComplianceUseCase, EvaluateComplianceUseCase,
        ScanRepositoryUseCase, VerifyEvidencePackUseCase,
    };
    pub use crate::bom::{AiBom, BomGenerator, RepositoryInfo};
    pub use crate::compliance::diff_engine::{ComplianceDiffResult, DiffEngine};
    pub use crate::compliance::policy_engine::{ComplianceResult, PolicyEngine};
    pub use crate::compliance::{
        verify_pack, EvidencePackBuilder, PackManifest, PackVerification,
    };
    pub use crate::detection::ComponentDetector;
    pub use crate::manifest::DependencyExtractor;
    pub use crate::ports::outbound::{BomFormatter, OutputPresenter, ProgressReporter};
    pub use crate::shared::Result;
}
