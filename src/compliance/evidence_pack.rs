//! Audit-ready evidence packs.
//!
//! A pack is a directory: the BOM, the evaluation, a gap summary, an
//! evidence index and a manifest hashing everything else. The manifest is
//! written last, so a pack missing it is by definition incomplete. The
//! root hash commits to the whole pack: it is the SHA-256 of the file
//! hashes concatenated in lexicographic order.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::bom::AiBom;
use crate::compliance::policy_engine::ComplianceResult;
use crate::compliance::storage;
use crate::shared::error::AuditError;
use crate::shared::Result;

pub const MANIFEST_FILE: &str = "manifest.json";

/// One hashed file in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackFileEntry {
    pub filename: String,
    pub path: String,
    pub hash: String,
}

/// The pack manifest, written last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackManifest {
    pub schema_version: String,
    pub generated_at: chrono::DateTime<Utc>,
    pub repo_id: String,
    pub commit: String,
    pub scan_run_id: Uuid,
    pub files: Vec<PackFileEntry>,
    pub root_hash: String,
    pub audit_trail_ref: String,
}

/// Outcome of re-hashing a pack against its manifest. Verification never
/// errors: an unreadable pack is an invalid pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackVerification {
    pub valid: bool,
    pub files_checked: usize,
    pub missing_files: Vec<String>,
    pub mismatched_files: Vec<String>,
    pub root_hash_valid: bool,
    pub failure: Option<String>,
}

impl PackVerification {
    fn failed(reason: String) -> Self {
        PackVerification {
            valid: false,
            files_checked: 0,
            missing_files: Vec::new(),
            mismatched_files: Vec::new(),
            root_hash_valid: false,
            failure: Some(reason),
        }
    }
}

/// Writes and verifies evidence pack directories.
#[derive(Debug)]
pub struct EvidencePackBuilder {
    repo_id: String,
    commit: String,
}

impl EvidencePackBuilder {
    pub fn new(repo_id: &str, commit: &str) -> Self {
        EvidencePackBuilder {
            repo_id: repo_id.to_string(),
            commit: commit.to_string(),
        }
    }

    /// Builds the pack under `output_dir`.
    ///
    /// # Errors
    /// Returns an error when a file cannot be written
    pub fn build(
        &self,
        bom: &AiBom,
        result: &ComplianceResult,
        output_dir: &Path,
    ) -> Result<PackManifest> {
        fs::create_dir_all(output_dir.join("ai-bom")).map_err(|e| write_error(output_dir, &e))?;
        fs::create_dir_all(output_dir.join("policy")).map_err(|e| write_error(output_dir, &e))?;
        fs::create_dir_all(output_dir.join("evidence"))
            .map_err(|e| write_error(output_dir, &e))?;

        let mut files = Vec::new();

        self.write_entry(output_dir, "README.txt", self.readme(result), &mut files)?;
        self.write_entry(
            output_dir,
            "ai-bom/spdx.json",
            serde_json::to_string_pretty(bom)?,
            &mut files,
        )?;
        self.write_entry(
            output_dir,
            "policy/policy_results.json",
            serde_json::to_string_pretty(result)?,
            &mut files,
        )?;
        self.write_entry(
            output_dir,
            "policy/gaps.json",
            serde_json::to_string_pretty(&json!({
                "critical_gaps": result.critical_gaps,
                "recommendations": result.recommendations,
                "compliance_score": result.compliance_score,
            }))?,
            &mut files,
        )?;
        self.write_entry(
            output_dir,
            "evidence/evidence_index.json",
            serde_json::to_string_pretty(&self.evidence_index(bom, result))?,
            &mut files,
        )?;

        // The manifest hashes everything above, so it goes last.
        let manifest = PackManifest {
            schema_version: "1.0.0".to_string(),
            generated_at: Utc::now(),
            repo_id: self.repo_id.clone(),
            commit: self.commit.clone(),
            scan_run_id: Uuid::new_v4(),
            root_hash: root_hash(&files),
            files,
            audit_trail_ref: storage::results_key(&self.repo_id, &self.commit),
        };
        let manifest_path = output_dir.join(MANIFEST_FILE);
        fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)
            .map_err(|e| write_error(&manifest_path, &e))?;

        info!(
            "evidence pack for {}@{} written to {}",
            self.repo_id,
            self.commit,
            output_dir.display()
        );
        Ok(manifest)
    }

    fn write_entry(
        &self,
        output_dir: &Path,
        relative: &str,
        content: String,
        files: &mut Vec<PackFileEntry>,
    ) -> Result<()> {
        let path = output_dir.join(relative);
        fs::write(&path, &content).map_err(|e| write_error(&path, &e))?;
        files.push(PackFileEntry {
            filename: relative
                .rsplit('/')
                .next()
                .unwrap_or(relative)
                .to_string(),
            path: relative.to_string(),
            hash: sha256_hex(content.as_bytes()),
        });
        Ok(())
    }

    fn readme(&self, result: &ComplianceResult) -> String {
        format!(
            "EU AI Act evidence pack\n\
             =======================\n\n\
             Repository:  {}\n\
             Commit:      {}\n\
             System:      {}\n\
             Risk level:  {}\n\
             Score:       {:.0}%\n\
             Compliant:   {}\n\n\
             Contents:\n\
             - ai-bom/spdx.json            the scanned AI bill of materials\n\
             - policy/policy_results.json  the full Annex IV evaluation\n\
             - policy/gaps.json            critical gaps and recommendations\n\
             - evidence/evidence_index.json  per-component evidence index\n\
             - manifest.json               file hashes and the pack root hash\n\n\
             Verify integrity with: ai-act-audit verify <this directory>\n",
            self.repo_id,
            self.commit,
            result.system_id,
            result.risk_level,
            result.compliance_score * 100.0,
            if result.compliant { "yes" } else { "no" },
        )
    }

    fn evidence_index(&self, bom: &AiBom, result: &ComplianceResult) -> serde_json::Value {
        let model_entries: Vec<serde_json::Value> = bom
            .models
            .iter()
            .map(|m| {
                json!({
                    "component": m.name,
                    "kind": "model",
                    "detected_in": m.detected_in,
                })
            })
            .collect();
        let dataset_entries: Vec<serde_json::Value> = bom
            .datasets
            .iter()
            .map(|d| {
                json!({
                    "component": d.name,
                    "kind": "dataset",
                    "detected_in": d.detected_in,
                })
            })
            .collect();

        let r = &result.requirements;
        json!({
            "schema_version": "1.0.0",
            "generated_at": Utc::now(),
            "commit": self.commit,
            "files": model_entries.into_iter().chain(dataset_entries).collect::<Vec<_>>(),
            "compliance_mappings": {
                "Article 11": r.article_11_compliant,
                "Article 13": r.article_13_compliant,
                "Article 14": r.article_14_compliant,
                "Article 15": r.article_15_compliant,
            },
        })
    }
}

/// Re-hashes a pack against its manifest.
pub fn verify_pack(pack_dir: &Path) -> PackVerification {
    let manifest_path = pack_dir.join(MANIFEST_FILE);
    let manifest_content = match fs::read_to_string(&manifest_path) {
        Ok(content) => content,
        Err(e) => {
            warn!("cannot read {}: {}", manifest_path.display(), e);
            return PackVerification::failed(format!(
                "{}",
                AuditError::InvalidEvidencePack {
                    path: pack_dir.to_path_buf(),
                    reason: format!("manifest.json not readable: {}", e),
                }
            ));
        }
    };
    let manifest: PackManifest = match serde_json::from_str(&manifest_content) {
        Ok(manifest) => manifest,
        Err(e) => {
            return PackVerification::failed(format!(
                "{}",
                AuditError::InvalidEvidencePack {
                    path: pack_dir.to_path_buf(),
                    reason: format!("manifest.json malformed: {}", e),
                }
            ));
        }
    };

    let mut missing_files = Vec::new();
    let mut mismatched_files = Vec::new();
    for entry in &manifest.files {
        match fs::read(pack_dir.join(&entry.path)) {
            Ok(bytes) => {
                if sha256_hex(&bytes) != entry.hash {
                    mismatched_files.push(entry.path.clone());
                }
            }
            Err(_) => missing_files.push(entry.path.clone()),
        }
    }

    let root_hash_valid = root_hash(&manifest.files) == manifest.root_hash;
    let valid = missing_files.is_empty() && mismatched_files.is_empty() && root_hash_valid;

    PackVerification {
        valid,
        files_checked: manifest.files.len(),
        missing_files,
        mismatched_files,
        root_hash_valid,
        failure: None,
    }
}

/// SHA-256 of the file hashes concatenated in lexicographic order.
fn root_hash(files: &[PackFileEntry]) -> String {
    let mut hashes: Vec<&str> = files.iter().map(|f| f.hash.as_str()).collect();
    hashes.sort_unstable();
    sha256_hex(hashes.concat().as_bytes())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn write_error(path: &Path, e: &std::io::Error) -> anyhow::Error {
    AuditError::FileWriteError {
        path: PathBuf::from(path),
        details: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::policy_engine::PolicyEngine;
    use tempfile::TempDir;

    fn fixture() -> (AiBom, ComplianceResult) {
        let bom = AiBom::new("chatbot");
        let result = PolicyEngine::new().evaluate(&bom, None);
        (bom, result)
    }

    #[test]
    fn test_pack_layout() {
        let (bom, result) = fixture();
        let dir = TempDir::new().unwrap();
        let manifest = EvidencePackBuilder::new("acme/chatbot", "abc123")
            .build(&bom, &result, dir.path())
            .unwrap();

        assert!(dir.path().join("README.txt").exists());
        assert!(dir.path().join("ai-bom/spdx.json").exists());
        assert!(dir.path().join("policy/policy_results.json").exists());
        assert!(dir.path().join("policy/gaps.json").exists());
        assert!(dir.path().join("evidence/evidence_index.json").exists());
        assert!(dir.path().join("manifest.json").exists());

        assert_eq!(manifest.files.len(), 5);
        assert_eq!(
            manifest.audit_trail_ref,
            "acme/chatbot/abc123/policy_results.json"
        );
    }

    #[test]
    fn test_fresh_pack_verifies() {
        let (bom, result) = fixture();
        let dir = TempDir::new().unwrap();
        EvidencePackBuilder::new("acme/chatbot", "abc123")
            .build(&bom, &result, dir.path())
            .unwrap();

        let verification = verify_pack(dir.path());
        assert!(verification.valid);
        assert!(verification.root_hash_valid);
        assert_eq!(verification.files_checked, 5);
        assert!(verification.failure.is_none());
    }

    #[test]
    fn test_tampered_file_is_detected() {
        let (bom, result) = fixture();
        let dir = TempDir::new().unwrap();
        EvidencePackBuilder::new("acme/chatbot", "abc123")
            .build(&bom, &result, dir.path())
            .unwrap();
        fs::write(dir.path().join("policy/gaps.json"), "{}").unwrap();

        let verification = verify_pack(dir.path());
        assert!(!verification.valid);
        assert_eq!(verification.mismatched_files, vec!["policy/gaps.json"]);
        assert!(verification.root_hash_valid);
    }

    #[test]
    fn test_deleted_file_is_detected() {
        let (bom, result) = fixture();
        let dir = TempDir::new().unwrap();
        EvidencePackBuilder::new("acme/chatbot", "abc123")
            .build(&bom, &result, dir.path())
            .unwrap();
        fs::remove_file(dir.path().join("README.txt")).unwrap();

        let verification = verify_pack(dir.path());
        assert!(!verification.valid);
        assert_eq!(verification.missing_files, vec!["README.txt"]);
    }

    #[test]
    fn test_missing_manifest_is_invalid_not_an_error() {
        let dir = TempDir::new().unwrap();
        let verification = verify_pack(dir.path());
        assert!(!verification.valid);
        assert!(verification.failure.unwrap().contains("manifest.json"));
    }

    #[test]
    fn test_root_hash_ignores_file_listing_order() {
        let a = PackFileEntry {
            filename: "a".into(),
            path: "a".into(),
            hash: "11".into(),
        };
        let b = PackFileEntry {
            filename: "b".into(),
            path: "b".into(),
            hash: "22".into(),
        };
        assert_eq!(
            root_hash(&[a.clone(), b.clone()]),
            root_hash(&[b, a])
        );
    }
}
