use crate::bom::component::{DatasetComponent, DependencyComponent, ModelComponent};
use crate::shared::error::AuditError;
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// SPDX version stamped on every document.
pub const SPDX_VERSION: &str = "SPDX-3.0";

/// SPDX mandates CC0-1.0 for document-level data.
pub const DATA_LICENSE: &str = "CC0-1.0";

const CREATOR: &str = concat!("Tool: ai-act-audit-", env!("CARGO_PKG_VERSION"));

/// An AI Bill of Materials for one repository at one commit.
///
/// A document is immutable once generated: identifiers and timestamps are
/// assigned at construction and the invariants (`spdx_id` prefixed with
/// `SPDXRef-`, namespace an https URL) are enforced both at construction
/// and when loading a document from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiBom {
    pub spdx_version: String,
    pub data_license: String,
    pub spdx_id: String,
    pub name: String,
    pub document_namespace: String,
    pub created: DateTime<Utc>,
    pub creator: String,
    pub models: Vec<ModelComponent>,
    pub datasets: Vec<DatasetComponent>,
    pub dependencies: Vec<DependencyComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_branch: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl AiBom {
    /// Creates an empty document for the named system with fresh
    /// identifiers and the current timestamp.
    pub fn new(system_name: &str) -> Self {
        let id = Uuid::new_v4();
        let short = id.simple().to_string();
        AiBom {
            spdx_version: SPDX_VERSION.to_string(),
            data_license: DATA_LICENSE.to_string(),
            spdx_id: format!("SPDXRef-DOCUMENT-{}", &short[..8]),
            name: format!("AI-BOM for {}", system_name),
            document_namespace: format!("https://ai-act-audit.dev/spdx/{}", id),
            created: Utc::now(),
            creator: CREATOR.to_string(),
            models: Vec::new(),
            datasets: Vec::new(),
            dependencies: Vec::new(),
            repository_url: None,
            repository_commit: None,
            repository_branch: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Checks the SPDX document invariants.
    ///
    /// # Errors
    /// Returns a validation error naming the violated invariant
    pub fn validate(&self) -> Result<()> {
        if !self.spdx_id.starts_with("SPDXRef-") {
            return Err(AuditError::Validation {
                message: format!("spdx_id must start with 'SPDXRef-', got '{}'", self.spdx_id),
            }
            .into());
        }
        if !self.document_namespace.starts_with("https://") {
            return Err(AuditError::Validation {
                message: format!(
                    "document_namespace must start with 'https://', got '{}'",
                    self.document_namespace
                ),
            }
            .into());
        }
        Ok(())
    }

    /// Parses a document from JSON and re-checks its invariants.
    ///
    /// # Errors
    /// Returns an error when the JSON is malformed or an invariant fails
    pub fn from_json(json: &str) -> Result<Self> {
        let bom: AiBom = serde_json::from_str(json)?;
        bom.validate()?;
        Ok(bom)
    }

    /// Whether any detected model is a large language model.
    pub fn has_llm(&self) -> bool {
        self.models
            .iter()
            .any(|m| m.model_type == crate::bom::component::ModelType::Llm)
    }

    /// Name of the repository directory this BOM describes, recovered from
    /// the document name.
    pub fn system_name(&self) -> &str {
        self.name.strip_prefix("AI-BOM for ").unwrap_or(&self.name)
    }
}
