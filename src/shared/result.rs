/// Result alias using anyhow::Error, the error type used throughout
/// the audit pipeline for propagation with context.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
