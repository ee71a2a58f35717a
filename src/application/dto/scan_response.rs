use crate::bom::AiBom;

/// ScanResponse - Internal response DTO from the repository scan use case
///
/// This DTO carries the generated document, which adapters then render
/// into the requested output format.
#[derive(Debug, Clone)]
pub struct ScanResponse {
    /// The generated AI-BOM document
    pub bom: AiBom,
    /// Number of source files inspected
    pub files_scanned: usize,
    /// Number of files skipped for exceeding the size limit
    pub files_skipped: usize,
}
