//! AI-BOM domain model and assembly.

pub mod classify;
pub mod component;
pub mod document;
pub mod generator;
pub mod repo_info;

pub use classify::infer_model_type;
pub use component::{
    DatasetComponent, DatasetType, DependencyComponent, DetectionLocation, LicenseType,
    ModelComponent, ModelType,
};
pub use document::AiBom;
pub use generator::BomGenerator;
pub use repo_info::RepositoryInfo;
