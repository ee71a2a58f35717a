use crate::detection::FileDetection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Broad model families relevant to risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    Llm,
    Vision,
    Audio,
    Embedding,
    FineTuned,
    Custom,
}

/// How a dataset is used within the system lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetType {
    Training,
    Validation,
    Test,
    Production,
}

/// License families tracked on components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseType {
    #[serde(rename = "Apache-2.0")]
    Apache2,
    #[serde(rename = "MIT")]
    Mit,
    #[serde(rename = "GPL-3.0")]
    Gpl3,
    #[serde(rename = "Proprietary")]
    Proprietary,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl std::fmt::Display for LicenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            LicenseType::Apache2 => "Apache-2.0",
            LicenseType::Mit => "MIT",
            LicenseType::Gpl3 => "GPL-3.0",
            LicenseType::Proprietary => "Proprietary",
            LicenseType::Unknown => "Unknown",
        };
        f.write_str(tag)
    }
}

/// Where in the codebase a component was detected.
///
/// Lines and columns are 1-indexed; `end_column` is exclusive. Confidence
/// is always 1.0 for structural matches and exists so future probabilistic
/// detectors can share the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionLocation {
    pub file_path: String,
    pub line_number: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub code_snippet: String,
    pub detection_type: String,
    pub confidence: f64,
}

impl DetectionLocation {
    /// Builds a location from one bucketed detection.
    pub fn from_detection(detection: &FileDetection) -> Self {
        DetectionLocation {
            file_path: detection.file.clone(),
            line_number: detection.matched.line,
            column: detection.matched.column,
            end_line: detection.matched.end_line,
            end_column: detection.matched.end_column,
            code_snippet: detection.snippet.clone(),
            detection_type: detection.matched.intent.as_str().to_string(),
            confidence: 1.0,
        }
    }

    /// Short human-readable pointer, e.g. `src/train.py:42`.
    pub fn to_display_string(&self) -> String {
        format!("{}:{}", self.file_path, self.line_number)
    }
}

/// A model the scanned system loads, trains or calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComponent {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub model_type: ModelType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    pub license: LicenseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
    pub detected_in: Vec<String>,
    pub detection_locations: Vec<DetectionLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_context: Option<String>,
}

impl ModelComponent {
    /// Records a further occurrence of an already known model.
    pub fn add_location(&mut self, location: DetectionLocation) {
        if !self.detected_in.contains(&location.file_path) {
            self.detected_in.push(location.file_path.clone());
        }
        self.detection_locations.push(location);
    }
}

/// A dataset the scanned system reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetComponent {
    pub name: String,
    pub dataset_type: DatasetType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub license: LicenseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gdpr_compliant: Option<bool>,
    pub detected_in: Vec<String>,
    pub detection_locations: Vec<DetectionLocation>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl DatasetComponent {
    pub fn add_location(&mut self, location: DetectionLocation) {
        if !self.detected_in.contains(&location.file_path) {
            self.detected_in.push(location.file_path.clone());
        }
        self.detection_locations.push(location);
    }
}

/// A declared or imported package dependency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyComponent {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub package_manager: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    pub is_ai_related: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vulnerability_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_in: Option<String>,
    #[serde(default)]
    pub detection_locations: Vec<DetectionLocation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(file: &str, line: usize) -> DetectionLocation {
        DetectionLocation {
            file_path: file.to_string(),
            line_number: line,
            column: 1,
            end_line: line,
            end_column: 10,
            code_snippet: "snippet".to_string(),
            detection_type: "huggingface_model".to_string(),
            confidence: 1.0,
        }
    }

    fn model(name: &str) -> ModelComponent {
        ModelComponent {
            name: name.to_string(),
            version: None,
            model_type: ModelType::Llm,
            provider: Some("HuggingFace".to_string()),
            api_endpoint: None,
            license: LicenseType::Unknown,
            source_location: None,
            parameters: None,
            detected_in: vec!["a.py".to_string()],
            detection_locations: vec![location("a.py", 3)],
            usage_context: Some("inference".to_string()),
        }
    }

    #[test]
    fn test_display_string() {
        assert_eq!(location("src/train.py", 42).to_display_string(), "src/train.py:42");
    }

    #[test]
    fn test_add_location_dedups_files_keeps_locations() {
        let mut m = model("gpt2");
        m.add_location(location("a.py", 9));
        m.add_location(location("b.py", 1));
        assert_eq!(m.detected_in, vec!["a.py", "b.py"]);
        assert_eq!(m.detection_locations.len(), 3);
    }

    #[test]
    fn test_model_type_serialization() {
        assert_eq!(serde_json::to_string(&ModelType::Llm).unwrap(), "\"llm\"");
        assert_eq!(
            serde_json::to_string(&ModelType::FineTuned).unwrap(),
            "\"fine_tuned\""
        );
    }

    #[test]
    fn test_license_serialization() {
        assert_eq!(
            serde_json::to_string(&LicenseType::Apache2).unwrap(),
            "\"Apache-2.0\""
        );
        assert_eq!(
            serde_json::to_string(&LicenseType::Unknown).unwrap(),
            "\"Unknown\""
        );
    }

    #[test]
    fn test_license_display_matches_spdx_tags() {
        assert_eq!(LicenseType::Apache2.to_string(), "Apache-2.0");
        assert_eq!(LicenseType::Mit.to_string(), "MIT");
        assert_eq!(LicenseType::Gpl3.to_string(), "GPL-3.0");
        assert_eq!(LicenseType::Proprietary.to_string(), "Proprietary");
        assert_eq!(LicenseType::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_dataset_type_serialization() {
        assert_eq!(
            serde_json::to_string(&DatasetType::Training).unwrap(),
            "\"training\""
        );
    }

    #[test]
    fn test_model_component_round_trip() {
        let m = model("bert-base-uncased");
        let json = serde_json::to_string(&m).unwrap();
        let back: ModelComponent = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }
}
