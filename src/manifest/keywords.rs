//! AI package classification.
//!
//! A dependency counts as AI-related when its normalized name contains one
//! of the keywords below. Normalization folds case and the separator
//! variants package indexes accept (`-`, `.`, `_`), so `scikit-learn`,
//! `Scikit_Learn` and `scikit.learn` all classify identically.

/// Keywords marking a package as AI/ML-related, grouped by ecosystem area.
pub const AI_KEYWORDS: &[&str] = &[
    // API clients and hosted inference
    "openai",
    "anthropic",
    "cohere",
    "replicate",
    "together",
    "groq",
    "fireworks",
    "mistralai",
    "google-generativeai",
    "vertexai",
    "bedrock",
    "ollama",
    // Core ML frameworks
    "torch",
    "tensorflow",
    "keras",
    "sklearn",
    "scikit-learn",
    "pytorch",
    "jax",
    "flax",
    "onnx",
    "xgboost",
    "lightgbm",
    "catboost",
    "prophet",
    "statsmodels",
    // Hugging Face ecosystem
    "transformers",
    "huggingface",
    "huggingface-hub",
    "datasets",
    "tokenizers",
    "accelerate",
    "peft",
    "trl",
    "evaluate",
    "sentence-transformers",
    // LLM application frameworks
    "langchain",
    "llama-index",
    "llamaindex",
    "haystack",
    "guidance",
    "semantic-kernel",
    "autogen",
    "crewai",
    "dspy",
    "instructor",
    "outlines",
    "vllm",
    // Vector stores
    "chromadb",
    "pinecone",
    "weaviate",
    "qdrant",
    "milvus",
    "faiss",
    "pgvector",
    "lancedb",
    // Experiment tracking and orchestration
    "mlflow",
    "wandb",
    "neptune",
    "clearml",
    "optuna",
    "ray",
    "dask",
    "polars",
    // Data science stack
    "pandas",
    "numpy",
    "scipy",
    "matplotlib",
    "seaborn",
    "plotly",
    "bokeh",
    "altair",
    // Computer vision
    "opencv",
    "cv2",
    "pillow",
    "torchvision",
    "detectron2",
    "ultralytics",
    "yolo",
    // Audio
    "whisper",
    "speechrecognition",
    "torchaudio",
    "librosa",
    // NLP
    "spacy",
    "nltk",
    "gensim",
    "flair",
    "stanza",
    // Fairness and explainability
    "fairlearn",
    "aif360",
    "shap",
    "lime",
    "alibi",
    "interpret",
    "eli5",
];

/// Libraries whose presence alone marks a repository as an AI system,
/// used by the compliance short-circuit.
pub const CORE_AI_LIBRARIES: &[&str] = &[
    "openai",
    "anthropic",
    "transformers",
    "torch",
    "tensorflow",
    "langchain",
    "sklearn",
    "keras",
    "huggingface",
    "llama",
    "vllm",
    "ollama",
    "cohere",
    "replicate",
];

/// Folds case and separator variants into one canonical form.
pub fn normalize_package_name(name: &str) -> String {
    name.to_lowercase().replace(['-', '.'], "_")
}

/// Whether a package name matches the AI keyword list.
pub fn is_ai_related(name: &str) -> bool {
    let normalized = normalize_package_name(name);
    AI_KEYWORDS
        .iter()
        .any(|keyword| normalized.contains(&normalize_package_name(keyword)))
}

/// Whether a dependency name contains one of the core AI libraries.
pub fn is_core_ai_library(name: &str) -> bool {
    let normalized = normalize_package_name(name);
    CORE_AI_LIBRARIES
        .iter()
        .any(|lib| normalized.contains(&normalize_package_name(lib)))
}
