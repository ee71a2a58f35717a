/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod output_format;
mod scan_request;
mod scan_response;

pub use output_format::OutputFormat;
pub use scan_request::ScanRequest;
pub use scan_response::ScanResponse;
