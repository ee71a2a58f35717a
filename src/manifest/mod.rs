//! Declared-dependency extraction from package manifests.

pub mod extractor;
pub mod keywords;

pub use extractor::{DeclaredDependency, DependencyExtractor};
pub use keywords::{is_ai_related, is_core_ai_library, normalize_package_name};
