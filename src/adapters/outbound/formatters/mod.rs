/// Formatter adapters for the supported AI-BOM output formats, plus the
/// Markdown renderer for compliance reports.
mod markdown;
mod report_markdown;
mod spdx_json;
mod spdx_yaml;

pub use markdown::MarkdownFormatter;
pub use report_markdown::render_compliance_report;
pub use spdx_json::SpdxJsonFormatter;
pub use spdx_yaml::SpdxYamlFormatter;
