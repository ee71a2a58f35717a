/// Use cases module containing application business logic orchestration
mod build_evidence_pack;
mod diff_compliance;
mod evaluate_compliance;
mod scan_repository;
mod verify_evidence_pack;

pub use build_evidence_pack::BuildEvidencePackUseCase;
pub use diff_compliance::DiffComplianceUseCase;
pub use evaluate_compliance::EvaluateComplianceUseCase;
pub use scan_repository::ScanRepositoryUseCase;
pub use verify_evidence_pack::VerifyEvidencePackUseCase;
