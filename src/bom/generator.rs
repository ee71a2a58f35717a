use crate::bom::classify::infer_model_type;
use crate::bom::component::{
    DatasetComponent, DatasetType, DependencyComponent, DetectionLocation, LicenseType,
    ModelComponent, ModelType,
};
use crate::bom::document::AiBom;
use crate::bom::repo_info::RepositoryInfo;
use crate::detection::{DetectionIntent, DetectionReport, FileDetection, NameRecovery};
use crate::manifest::{normalize_package_name, DeclaredDependency};
use crate::shared::Result;
use anyhow::Context;
use log::debug;
use regex::Regex;
use serde_json::json;
use std::collections::{HashMap, HashSet};

/// Assembles an [`AiBom`] from a detection report and the declared
/// dependencies.
///
/// Deduplication is keyed per component family and file; the first
/// occurrence creates the component, later occurrences only add locations.
#[derive(Debug)]
pub struct BomGenerator {
    recovery: NameRecovery,
    sklearn_class: Regex,
}

/// Insertion-ordered component accumulator keyed by dedup string.
struct Deduped<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Deduped<T> {
    fn new() -> Self {
        Deduped {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn upsert(&mut self, key: String, create: impl FnOnce() -> T, update: impl FnOnce(&mut T)) {
        match self.index.get(&key) {
            Some(&i) => update(&mut self.items[i]),
            None => {
                self.index.insert(key, self.items.len());
                self.items.push(create());
            }
        }
    }

    fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl BomGenerator {
    /// # Errors
    /// Returns an error only if a static pattern fails to compile
    pub fn new() -> Result<Self> {
        Ok(BomGenerator {
            recovery: NameRecovery::new()?,
            sklearn_class: Regex::new(
                r"(\w+(?:Classifier|Regressor|Clustering|Forest|Boosting|Boost)|LogisticRegression|LinearRegression|SVC|SVR|KMeans|DBSCAN|PCA|StandardScaler|MinMaxScaler|Ridge|Lasso|ElasticNet)",
            )
            .context("invalid estimator pattern")?,
        })
    }

    /// Builds the document for `system_name` from one scan.
    pub fn generate(
        &self,
        system_name: &str,
        report: &DetectionReport,
        declared: &[DeclaredDependency],
        repo: &RepositoryInfo,
    ) -> Result<AiBom> {
        let mut bom = AiBom::new(system_name);

        bom.models = self.collect_models(report);
        bom.datasets = self.collect_datasets(report);
        bom.dependencies = self.collect_dependencies(report, declared);

        bom.repository_url = repo.url.clone();
        bom.repository_commit = repo.commit.clone();
        bom.repository_branch = repo.branch.clone();

        bom.metadata.insert(
            "scan_results".to_string(),
            json!({
                "files_scanned": report.files_scanned,
                "total_detections": report.total_detections(),
                "skipped_files": report
                    .skipped_files
                    .iter()
                    .map(|s| json!({"path": s.path, "size_mb": s.size_mb}))
                    .collect::<Vec<_>>(),
            }),
        );

        bom.validate()?;
        Ok(bom)
    }

    /// API clients and in-repo models, deduplicated per file.
    fn collect_models(&self, report: &DetectionReport) -> Vec<ModelComponent> {
        let mut models: Deduped<ModelComponent> = Deduped::new();

        for detection in &report.ai_clients {
            self.add_client(&mut models, detection);
        }
        for detection in &report.models {
            self.add_model(&mut models, detection, report);
        }

        models.into_vec()
    }

    fn add_client(&self, models: &mut Deduped<ModelComponent>, detection: &FileDetection) {
        let location = DetectionLocation::from_detection(detection);
        let text = &detection.matched.text;

        let (base, display, name, endpoint) = match detection.matched.intent {
            DetectionIntent::OpenAiClient => (
                "OpenAI",
                "OpenAI".to_string(),
                "OpenAI API Model".to_string(),
                Some("https://api.openai.com/v1"),
            ),
            DetectionIntent::AnthropicClient => (
                "Anthropic",
                "Anthropic".to_string(),
                "Anthropic API Model".to_string(),
                Some("https://api.anthropic.com/v1"),
            ),
            DetectionIntent::AiApiCall => {
                if text.contains("messages.create") {
                    (
                        "Anthropic",
                        "Anthropic".to_string(),
                        "Anthropic API Model".to_string(),
                        Some("https://api.anthropic.com/v1"),
                    )
                } else {
                    (
                        "OpenAI",
                        "OpenAI".to_string(),
                        "OpenAI API Model".to_string(),
                        Some("https://api.openai.com/v1"),
                    )
                }
            }
            DetectionIntent::Langchain => {
                let class = detection.matched.capture.as_deref().unwrap_or("LLMChain");
                let display = if class.contains("Chat") {
                    format!("LangChain ({})", class)
                } else {
                    "LangChain".to_string()
                };
                ("LangChain", display, "LangChain Application".to_string(), None)
            }
            _ => return,
        };

        models.upsert(
            format!("{}:{}", base, detection.file),
            || ModelComponent {
                name,
                version: None,
                model_type: ModelType::Llm,
                provider: Some(display),
                api_endpoint: endpoint.map(|e| e.to_string()),
                license: LicenseType::Proprietary,
                source_location: None,
                parameters: None,
                detected_in: vec![detection.file.clone()],
                detection_locations: vec![location.clone()],
                usage_context: Some("inference".to_string()),
            },
            |existing| existing.add_location(location.clone()),
        );
    }

    fn add_model(
        &self,
        models: &mut Deduped<ModelComponent>,
        detection: &FileDetection,
        report: &DetectionReport,
    ) {
        let location = DetectionLocation::from_detection(detection);
        let file = &detection.file;
        let text = &detection.matched.text;

        match detection.matched.intent {
            DetectionIntent::HuggingfaceModel => {
                if let Some(name) = detection.matched.capture.clone() {
                    Self::upsert_hf(models, &name, detection, location);
                }
            }
            DetectionIntent::FromPretrainedAny | DetectionIntent::HuggingfaceAutoClasses => {
                let recovered = report
                    .source_of(file)
                    .and_then(|source| self.recovery.model_name_in_source(source));
                match recovered {
                    Some(name) => Self::upsert_hf(models, &name, detection, location),
                    None => {
                        let loader = detection
                            .matched
                            .capture
                            .as_deref()
                            .unwrap_or("from_pretrained");
                        models.upsert(
                            format!("hf_unknown:{}", file),
                            || ModelComponent {
                                name: format!("HuggingFace Model ({})", loader),
                                version: None,
                                model_type: ModelType::Custom,
                                provider: Some("HuggingFace".to_string()),
                                api_endpoint: None,
                                license: LicenseType::Unknown,
                                source_location: None,
                                parameters: None,
                                detected_in: vec![file.clone()],
                                detection_locations: vec![location.clone()],
                                usage_context: Some("inference".to_string()),
                            },
                            |existing| existing.add_location(location.clone()),
                        );
                    }
                }
            }
            DetectionIntent::SklearnModel => {
                let raw = detection.matched.capture.as_deref().unwrap_or_default();
                let class = self
                    .sklearn_class
                    .captures(raw)
                    .and_then(|c| c.get(1))
                    .map(|c| c.as_str().to_string())
                    .unwrap_or_else(|| raw.to_string());
                if class.is_empty() {
                    return;
                }
                let usage = if detection.snippet.contains(".fit(") {
                    "training"
                } else {
                    "inference"
                };
                models.upsert(
                    format!("sklearn:{}:{}", class, file),
                    || ModelComponent {
                        name: format!("sklearn.{}", class),
                        version: None,
                        model_type: ModelType::Custom,
                        provider: Some("scikit-learn".to_string()),
                        api_endpoint: None,
                        license: LicenseType::Unknown,
                        source_location: None,
                        parameters: None,
                        detected_in: vec![file.clone()],
                        detection_locations: vec![location.clone()],
                        usage_context: Some(usage.to_string()),
                    },
                    |existing| existing.add_location(location.clone()),
                );
            }
            DetectionIntent::Training => {
                models.upsert(
                    format!("training:{}", file),
                    || ModelComponent {
                        name: "Custom Training Model".to_string(),
                        version: None,
                        model_type: ModelType::Custom,
                        provider: None,
                        api_endpoint: None,
                        license: LicenseType::Unknown,
                        source_location: None,
                        parameters: None,
                        detected_in: vec![file.clone()],
                        detection_locations: vec![location.clone()],
                        usage_context: Some("training".to_string()),
                    },
                    |existing| existing.add_location(location.clone()),
                );
            }
            // model_call, pipeline and anything future falls through to the
            // text heuristics
            _ => {
                if let Some(name) = self.recovery.model_name_in_text(text) {
                    Self::upsert_hf(models, &name, detection, location);
                } else if text.to_lowercase().contains("model") || text.contains("predict") {
                    models.upsert(
                        format!("model:{}", file),
                        || ModelComponent {
                            name: "Custom Model".to_string(),
                            version: None,
                            model_type: ModelType::Custom,
                            provider: None,
                            api_endpoint: None,
                            license: LicenseType::Unknown,
                            source_location: None,
                            parameters: None,
                            detected_in: vec![file.clone()],
                            detection_locations: vec![location.clone()],
                            usage_context: Some("inference".to_string()),
                        },
                        |existing| existing.add_location(location.clone()),
                    );
                }
            }
        }
    }

    fn upsert_hf(
        models: &mut Deduped<ModelComponent>,
        name: &str,
        detection: &FileDetection,
        location: DetectionLocation,
    ) {
        models.upsert(
            format!("hf:{}:{}", name, detection.file),
            || ModelComponent {
                name: name.to_string(),
                version: None,
                model_type: infer_model_type(name),
                provider: Some("HuggingFace".to_string()),
                api_endpoint: None,
                license: LicenseType::Unknown,
                source_location: Some(format!("https://huggingface.co/{}", name)),
                parameters: None,
                detected_in: vec![detection.file.clone()],
                detection_locations: vec![location.clone()],
                usage_context: Some("inference".to_string()),
            },
            |existing| existing.add_location(location.clone()),
        );
    }

    /// Datasets grouped per file; nameless data-loading sites are dropped.
    fn collect_datasets(&self, report: &DetectionReport) -> Vec<DatasetComponent> {
        let mut datasets: Deduped<DatasetComponent> = Deduped::new();

        for detection in &report.datasets {
            let name = detection
                .matched
                .capture
                .clone()
                .or_else(|| self.recovery.dataset_name_in_text(&detection.matched.text))
                .or_else(|| {
                    report
                        .source_of(&detection.file)
                        .and_then(|source| self.recovery.dataset_name_in_text(source))
                });
            let Some(name) = name else {
                debug!(
                    "dropping nameless data-loading site at {}:{}",
                    detection.file, detection.matched.line
                );
                continue;
            };

            let location = DetectionLocation::from_detection(detection);
            datasets.upsert(
                format!("dataset:{}:{}", name, detection.file),
                || DatasetComponent {
                    name: name.clone(),
                    dataset_type: DatasetType::Training,
                    source_location: None,
                    size: None,
                    license: LicenseType::Unknown,
                    gdpr_compliant: None,
                    detected_in: vec![detection.file.clone()],
                    detection_locations: vec![location.clone()],
                    metadata: Default::default(),
                },
                |existing| existing.add_location(location.clone()),
            );
        }

        datasets.into_vec()
    }

    /// Declared manifest dependencies first, then unseen code imports.
    fn collect_dependencies(
        &self,
        report: &DetectionReport,
        declared: &[DeclaredDependency],
    ) -> Vec<DependencyComponent> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut dependencies = Vec::new();

        for dep in declared {
            if !seen.insert(normalize_package_name(&dep.name)) {
                continue;
            }
            dependencies.push(DependencyComponent {
                name: dep.name.clone(),
                version: dep.version.clone(),
                package_manager: dep.package_manager.clone(),
                license: None,
                is_ai_related: dep.is_ai_related,
                vulnerability_score: None,
                detected_in: Some(dep.source_file.clone()),
                detection_locations: Vec::new(),
            });
        }

        for detection in &report.ml_libraries {
            let Some(capture) = detection.matched.capture.as_deref() else {
                continue;
            };
            // "google.generativeai" imports the google namespace package
            let library = capture.split('.').next().unwrap_or(capture).to_lowercase();
            if !seen.insert(normalize_package_name(&library)) {
                continue;
            }
            let manager = match detection.matched.intent {
                DetectionIntent::AiLibraryImportJs | DetectionIntent::AiLibraryRequire => "npm",
                _ => "pip",
            };
            dependencies.push(DependencyComponent {
                name: library,
                version: None,
                package_manager: manager.to_string(),
                license: None,
                is_ai_related: true,
                vulnerability_score: None,
                detected_in: Some(detection.file.clone()),
                detection_locations: vec![DetectionLocation::from_detection(detection)],
            });
        }

        dependencies
    }
}
