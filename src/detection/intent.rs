/// The closed set of things the pattern matcher can recognize.
///
/// Every match carries exactly one intent; downstream components never
/// interpret raw pattern text, only intents and typed captures.
/// Serialized locations carry `as_str()` tags, so Python and JS import
/// intents can share one tag without aliasing the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectionIntent {
    // Python
    OpenAiClient,
    AnthropicClient,
    MlLibraryImport,
    AiLibraryImport,
    AiFromImport,
    ModelCall,
    HuggingfaceModel,
    FromPretrainedAny,
    HuggingfaceAutoClasses,
    HuggingfacePipeline,
    DatasetLoad,
    Training,
    SklearnModel,
    Langchain,
    PandasData,
    TorchDataloader,
    // JavaScript / TypeScript
    AiLibraryImportJs,
    AiLibraryRequire,
    AiApiCall,
}

/// Component buckets a match can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectionBucket {
    AiClients,
    MlLibraries,
    Models,
    Datasets,
}

impl DetectionIntent {
    /// Stable identifier used in serialized detection locations.
    pub fn as_str(self) -> &'static str {
        match self {
            DetectionIntent::OpenAiClient => "openai_client",
            DetectionIntent::AnthropicClient => "anthropic_client",
            DetectionIntent::MlLibraryImport => "ml_library_import",
            DetectionIntent::AiLibraryImport => "ai_library_import",
            DetectionIntent::AiFromImport => "ai_from_import",
            DetectionIntent::ModelCall => "model_call",
            DetectionIntent::HuggingfaceModel => "huggingface_model",
            DetectionIntent::FromPretrainedAny => "from_pretrained_any",
            DetectionIntent::HuggingfaceAutoClasses => "huggingface_auto_classes",
            DetectionIntent::HuggingfacePipeline => "huggingface_pipeline",
            DetectionIntent::DatasetLoad => "dataset_load",
            DetectionIntent::Training => "training",
            DetectionIntent::SklearnModel => "sklearn_model",
            DetectionIntent::Langchain => "langchain",
            DetectionIntent::PandasData => "pandas_data",
            DetectionIntent::TorchDataloader => "torch_dataloader",
            DetectionIntent::AiLibraryImportJs => "ai_library_import",
            DetectionIntent::AiLibraryRequire => "ai_library_require",
            DetectionIntent::AiApiCall => "ai_api_call",
        }
    }

    /// Single routing table from intent to component bucket.
    pub fn bucket(self) -> DetectionBucket {
        match self {
            DetectionIntent::OpenAiClient
            | DetectionIntent::AnthropicClient
            | DetectionIntent::AiApiCall
            | DetectionIntent::Langchain => DetectionBucket::AiClients,

            DetectionIntent::MlLibraryImport
            | DetectionIntent::AiLibraryImport
            | DetectionIntent::AiLibraryImportJs
            | DetectionIntent::AiLibraryRequire
            | DetectionIntent::AiFromImport => DetectionBucket::MlLibraries,

            DetectionIntent::ModelCall
            | DetectionIntent::HuggingfaceModel
            | DetectionIntent::FromPretrainedAny
            | DetectionIntent::HuggingfaceAutoClasses
            | DetectionIntent::HuggingfacePipeline
            | DetectionIntent::SklearnModel
            | DetectionIntent::Training => DetectionBucket::Models,

            DetectionIntent::DatasetLoad
            | DetectionIntent::PandasData
            | DetectionIntent::TorchDataloader => DetectionBucket::Datasets,
        }
    }
}

impl std::fmt::Display for DetectionIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
