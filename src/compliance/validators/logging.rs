use crate::bom::AiBom;
use crate::compliance::requirements::LoggingCapability;
use crate::compliance::validators::any_dependency;
use crate::manifest::normalize_package_name;

/// Article 12 evidence: logging libraries in the dependency set plus
/// retention metadata.
#[derive(Debug, Default)]
pub struct LoggingValidator;

const PYTHON_LOGGING_LIBRARIES: &[&str] = &["structlog", "loguru", "logbook", "eliot"];
const JS_LOGGING_LIBRARIES: &[&str] = &["winston", "bunyan", "pino", "log4js", "morgan"];
const IMMUTABLE_AUDIT_LIBRARIES: &[&str] = &["audit-log", "immutable-log", "blockchain-logger"];
const STRUCTURED_LOGGING_LIBRARIES: &[&str] = &["winston", "pino", "structlog"];

impl LoggingValidator {
    pub fn new() -> Self {
        LoggingValidator
    }

    pub fn validate(&self, bom: &AiBom) -> LoggingCapability {
        let automatic_logging_enabled = any_dependency(bom, PYTHON_LOGGING_LIBRARIES)
            || any_dependency(bom, JS_LOGGING_LIBRARIES);

        let retention_period_months = bom
            .metadata
            .get("log_retention_months")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32;

        // A logging library proves only the basic record shape; the
        // Article 12 event set needs explicit instrumentation.
        let events_logged = if automatic_logging_enabled {
            vec![
                "timestamp".to_string(),
                "log_level".to_string(),
                "message".to_string(),
            ]
        } else {
            Vec::new()
        };

        let audit_trail_immutable = any_dependency(bom, IMMUTABLE_AUDIT_LIBRARIES);

        let structured = bom.dependencies.iter().any(|dep| {
            let name = normalize_package_name(&dep.name);
            STRUCTURED_LOGGING_LIBRARIES
                .iter()
                .any(|lib| name.contains(&normalize_package_name(lib)))
        });
        let log_format = if structured { "JSON" } else { "Text" };

        LoggingCapability {
            automatic_logging_enabled,
            retention_period_months,
            audit_trail_immutable,
            events_logged,
            log_format: log_format.to_string(),
            access_control_enabled: false,
        }
    }
}
