use std::path::PathBuf;

/// ScanRequest - Internal request DTO for the repository scan use case
///
/// This DTO represents the internal request structure used within
/// the application layer. It may differ from the external CLI surface.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Path to the repository to scan
    pub repository_path: PathBuf,
    /// Maximum size of a single source file, in MiB
    pub max_file_size_mb: u64,
    /// Directory names to exclude in addition to the built-in set
    pub exclude_dirs: Vec<String>,
}

impl ScanRequest {
    pub fn new(repository_path: PathBuf, max_file_size_mb: u64, exclude_dirs: Vec<String>) -> Self {
        Self {
            repository_path,
            max_file_size_mb,
            exclude_dirs,
        }
    }
}
