//! EU AI Act evaluation: requirement records, validators, the policy
//! engine, result diffing and evidence packaging.

pub mod diff_engine;
pub mod evidence_pack;
pub mod gaps;
pub mod policy_engine;
pub mod recommendations;
pub mod requirements;
pub mod storage;
pub mod validators;

pub use diff_engine::{ArticleDelta, ComplianceDiffResult, DiffEngine, GapDelta, GapStatus};
pub use evidence_pack::{verify_pack, EvidencePackBuilder, PackManifest, PackVerification};
pub use gaps::GapCode;
pub use policy_engine::{ComplianceResult, PolicyEngine};
pub use requirements::{AnnexIvRequirements, RiskLevel};
